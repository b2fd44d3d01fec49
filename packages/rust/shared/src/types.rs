//! Core domain types for the delivery dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder text the source data uses for a missing value.
///
/// Note the trailing space: matching is literal equality on the raw field,
/// so `"NaN"` or `" NaN "` are not treated as missing.
pub const MISSING_SENTINEL: &str = "NaN ";

/// Date format of the `Order_Date` column.
pub const ORDER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Literal prefix wrapped around the `Time_taken(min)` numeral.
pub const TIME_TAKEN_MARKER: &str = "(min) ";

/// Whether a raw field holds the missing-value sentinel.
pub fn is_missing(value: &str) -> bool {
    value == MISSING_SENTINEL
}

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// CSV header names, exactly as they appear in the source file.
pub mod columns {
    pub const ID: &str = "ID";
    pub const DELIVERY_PERSON_ID: &str = "Delivery_person_ID";
    pub const DELIVERY_PERSON_AGE: &str = "Delivery_person_Age";
    pub const DELIVERY_PERSON_RATINGS: &str = "Delivery_person_Ratings";
    pub const RESTAURANT_LATITUDE: &str = "Restaurant_latitude";
    pub const RESTAURANT_LONGITUDE: &str = "Restaurant_longitude";
    pub const DELIVERY_LATITUDE: &str = "Delivery_location_latitude";
    pub const DELIVERY_LONGITUDE: &str = "Delivery_location_longitude";
    pub const ORDER_DATE: &str = "Order_Date";
    pub const TIME_ORDERED: &str = "Time_Orderd";
    pub const TIME_ORDER_PICKED: &str = "Time_Order_picked";
    pub const WEATHER_CONDITIONS: &str = "Weatherconditions";
    pub const ROAD_TRAFFIC_DENSITY: &str = "Road_traffic_density";
    pub const VEHICLE_CONDITION: &str = "Vehicle_condition";
    pub const TYPE_OF_ORDER: &str = "Type_of_order";
    pub const TYPE_OF_VEHICLE: &str = "Type_of_vehicle";
    pub const MULTIPLE_DELIVERIES: &str = "multiple_deliveries";
    pub const FESTIVAL: &str = "Festival";
    pub const CITY: &str = "City";
    pub const TIME_TAKEN: &str = "Time_taken(min)";

    /// Columns that must be present in the header. The two order-time
    /// columns are carried through when present but nothing reads them.
    pub const REQUIRED: &[&str] = &[
        ID,
        DELIVERY_PERSON_ID,
        DELIVERY_PERSON_AGE,
        DELIVERY_PERSON_RATINGS,
        RESTAURANT_LATITUDE,
        RESTAURANT_LONGITUDE,
        DELIVERY_LATITUDE,
        DELIVERY_LONGITUDE,
        ORDER_DATE,
        WEATHER_CONDITIONS,
        ROAD_TRAFFIC_DENSITY,
        VEHICLE_CONDITION,
        TYPE_OF_ORDER,
        TYPE_OF_VEHICLE,
        MULTIPLE_DELIVERIES,
        FESTIVAL,
        CITY,
        TIME_TAKEN,
    ];
}

// ---------------------------------------------------------------------------
// RawOrderRecord
// ---------------------------------------------------------------------------

/// One order row as read from the CSV, before any cleaning.
///
/// Fields that may hold [`MISSING_SENTINEL`] or need coercion stay textual.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOrderRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Delivery_person_ID")]
    pub delivery_person_id: String,
    #[serde(rename = "Delivery_person_Age")]
    pub delivery_person_age: String,
    #[serde(rename = "Delivery_person_Ratings")]
    pub delivery_person_rating: String,
    #[serde(rename = "Restaurant_latitude")]
    pub restaurant_latitude: f64,
    #[serde(rename = "Restaurant_longitude")]
    pub restaurant_longitude: f64,
    #[serde(rename = "Delivery_location_latitude")]
    pub delivery_latitude: f64,
    #[serde(rename = "Delivery_location_longitude")]
    pub delivery_longitude: f64,
    #[serde(rename = "Order_Date")]
    pub order_date: String,
    #[serde(rename = "Time_Orderd", default)]
    pub time_ordered: Option<String>,
    #[serde(rename = "Time_Order_picked", default)]
    pub time_order_picked: Option<String>,
    #[serde(rename = "Weatherconditions")]
    pub weather_conditions: String,
    #[serde(rename = "Road_traffic_density")]
    pub road_traffic_density: String,
    #[serde(rename = "Vehicle_condition")]
    pub vehicle_condition: i64,
    #[serde(rename = "Type_of_order")]
    pub type_of_order: String,
    #[serde(rename = "Type_of_vehicle")]
    pub type_of_vehicle: String,
    #[serde(rename = "multiple_deliveries")]
    pub multiple_deliveries: String,
    #[serde(rename = "Festival")]
    pub festival: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Time_taken(min)")]
    pub time_taken: String,
}

// ---------------------------------------------------------------------------
// CleanedOrderRecord
// ---------------------------------------------------------------------------

/// An order row after cleaning: sentinel rows removed, numbers and dates
/// typed, categorical text trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedOrderRecord {
    pub id: String,
    pub delivery_person_id: String,
    pub delivery_person_age: i64,
    pub delivery_person_rating: f64,
    pub restaurant_latitude: f64,
    pub restaurant_longitude: f64,
    pub delivery_latitude: f64,
    pub delivery_longitude: f64,
    pub order_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ordered: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_order_picked: Option<String>,
    /// Kept verbatim; only the sentinel filter applies to this column.
    pub weather_conditions: String,
    pub road_traffic_density: String,
    pub vehicle_condition: i64,
    pub type_of_order: String,
    pub type_of_vehicle: String,
    pub multiple_deliveries: i64,
    pub festival: String,
    pub city: String,
    pub time_taken_min: i64,
}

impl From<&CleanedOrderRecord> for RawOrderRecord {
    /// Render a cleaned row back into the textual form of the source file.
    fn from(rec: &CleanedOrderRecord) -> Self {
        Self {
            id: rec.id.clone(),
            delivery_person_id: rec.delivery_person_id.clone(),
            delivery_person_age: rec.delivery_person_age.to_string(),
            delivery_person_rating: rec.delivery_person_rating.to_string(),
            restaurant_latitude: rec.restaurant_latitude,
            restaurant_longitude: rec.restaurant_longitude,
            delivery_latitude: rec.delivery_latitude,
            delivery_longitude: rec.delivery_longitude,
            order_date: rec.order_date.format(ORDER_DATE_FORMAT).to_string(),
            time_ordered: rec.time_ordered.clone(),
            time_order_picked: rec.time_order_picked.clone(),
            weather_conditions: rec.weather_conditions.clone(),
            road_traffic_density: rec.road_traffic_density.clone(),
            vehicle_condition: rec.vehicle_condition,
            type_of_order: rec.type_of_order.clone(),
            type_of_vehicle: rec.type_of_vehicle.clone(),
            multiple_deliveries: rec.multiple_deliveries.to_string(),
            festival: rec.festival.clone(),
            city: rec.city.clone(),
            time_taken: format!("{TIME_TAKEN_MARKER}{}", rec.time_taken_min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cleaned() -> CleanedOrderRecord {
        CleanedOrderRecord {
            id: "0x4607".into(),
            delivery_person_id: "INDORES13DEL02".into(),
            delivery_person_age: 37,
            delivery_person_rating: 4.9,
            restaurant_latitude: 22.745049,
            restaurant_longitude: 75.892471,
            delivery_latitude: 22.765049,
            delivery_longitude: 75.912471,
            order_date: NaiveDate::from_ymd_opt(2022, 3, 19).unwrap(),
            time_ordered: Some("11:30:00".into()),
            time_order_picked: Some("11:45:00".into()),
            weather_conditions: "conditions Sunny".into(),
            road_traffic_density: "High".into(),
            vehicle_condition: 2,
            type_of_order: "Snack".into(),
            type_of_vehicle: "motorcycle".into(),
            multiple_deliveries: 0,
            festival: "No".into(),
            city: "Urban".into(),
            time_taken_min: 24,
        }
    }

    #[test]
    fn sentinel_match_is_literal() {
        assert!(is_missing("NaN "));
        assert!(!is_missing("NaN"));
        assert!(!is_missing(" NaN "));
        assert!(!is_missing("nan "));
    }

    #[test]
    fn cleaned_renders_back_to_raw_text() {
        let raw = RawOrderRecord::from(&make_cleaned());
        assert_eq!(raw.order_date, "19-03-2022");
        assert_eq!(raw.time_taken, "(min) 24");
        assert_eq!(raw.delivery_person_age, "37");
        assert_eq!(raw.delivery_person_rating, "4.9");
        assert_eq!(raw.multiple_deliveries, "0");
    }

    #[test]
    fn cleaned_serializes_date_as_iso() {
        let json = serde_json::to_value(make_cleaned()).expect("serialize");
        assert_eq!(json["order_date"], "2022-03-19");
        assert_eq!(json["time_taken_min"], 24);
    }

    #[test]
    fn required_columns_exclude_order_times() {
        assert!(!columns::REQUIRED.contains(&columns::TIME_ORDERED));
        assert!(!columns::REQUIRED.contains(&columns::TIME_ORDER_PICKED));
        assert_eq!(columns::REQUIRED.len(), 18);
    }
}
