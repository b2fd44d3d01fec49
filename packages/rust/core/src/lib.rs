//! Dataset preparation and reporting for the Curry dashboard.
//!
//! This crate reads the orders CSV, cleans it into typed records, applies the
//! per-view filters, and computes the aggregates each view shows.

pub mod clean;
pub mod filter;
pub mod geo;
pub mod ingest;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use clean::clean;
pub use filter::OrderFilter;
pub use pipeline::{PreparedView, ProgressReporter, SilentProgress, View};

#[cfg(test)]
pub(crate) mod testing {
    use chrono::NaiveDate;
    use curry_shared::CleanedOrderRecord;

    pub(crate) fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 3, day).expect("valid day")
    }

    /// A cleaned Urban/Jam/Sunny order by courier `D1`.
    pub(crate) fn make_order(id: &str, order_date: NaiveDate) -> CleanedOrderRecord {
        CleanedOrderRecord {
            id: id.into(),
            delivery_person_id: "D1".into(),
            delivery_person_age: 30,
            delivery_person_rating: 4.5,
            restaurant_latitude: 12.914264,
            restaurant_longitude: 77.6784,
            delivery_latitude: 12.924264,
            delivery_longitude: 77.6884,
            order_date,
            time_ordered: None,
            time_order_picked: None,
            weather_conditions: "conditions Sunny".into(),
            road_traffic_density: "Jam".into(),
            vehicle_condition: 2,
            type_of_order: "Snack".into(),
            type_of_vehicle: "motorcycle".into(),
            multiple_deliveries: 1,
            festival: "No".into(),
            city: "Urban".into(),
            time_taken_min: 30,
        }
    }
}
