//! Row filters applied to the cleaned table before reporting.
//!
//! Filters compose by sequential predicate application. A `None` criterion
//! is skipped; an empty allowed set keeps nothing.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use curry_shared::{CleanedOrderRecord, ViewConfig};

/// The date and category criteria a view applies.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Keep orders dated strictly before this day.
    pub cutoff: Option<NaiveDate>,
    /// Allowed road traffic densities.
    pub traffic: Option<BTreeSet<String>>,
    /// Allowed weather conditions.
    pub weather: Option<BTreeSet<String>>,
}

impl OrderFilter {
    /// Criteria for a view that filters on date and traffic only.
    pub fn date_and_traffic(config: &ViewConfig) -> Self {
        Self {
            cutoff: config.cutoff,
            traffic: config.traffic.clone(),
            weather: None,
        }
    }

    /// Criteria for a view that also filters on weather.
    pub fn date_traffic_and_weather(config: &ViewConfig) -> Self {
        Self {
            weather: config.weather.clone(),
            ..Self::date_and_traffic(config)
        }
    }

    /// Apply every configured criterion in order: date, traffic, weather.
    pub fn apply(&self, mut rows: Vec<CleanedOrderRecord>) -> Vec<CleanedOrderRecord> {
        if let Some(cutoff) = self.cutoff {
            rows = before_cutoff(rows, cutoff);
        }
        if let Some(allowed) = &self.traffic {
            rows = traffic_in(rows, allowed);
        }
        if let Some(allowed) = &self.weather {
            rows = weather_in(rows, allowed);
        }
        rows
    }
}

/// Keep rows whose order date is strictly before `cutoff`.
pub fn before_cutoff(mut rows: Vec<CleanedOrderRecord>, cutoff: NaiveDate) -> Vec<CleanedOrderRecord> {
    let before = rows.len();
    rows.retain(|r| r.order_date < cutoff);
    debug!(%cutoff, dropped = before - rows.len(), "applied date cutoff");
    rows
}

/// Keep rows whose traffic density is one of `allowed`.
pub fn traffic_in(
    mut rows: Vec<CleanedOrderRecord>,
    allowed: &BTreeSet<String>,
) -> Vec<CleanedOrderRecord> {
    let before = rows.len();
    rows.retain(|r| allowed.contains(&r.road_traffic_density));
    debug!(dropped = before - rows.len(), "applied traffic filter");
    rows
}

/// Keep rows whose weather condition is one of `allowed`.
pub fn weather_in(
    mut rows: Vec<CleanedOrderRecord>,
    allowed: &BTreeSet<String>,
) -> Vec<CleanedOrderRecord> {
    let before = rows.len();
    rows.retain(|r| allowed.contains(&r.weather_conditions));
    debug!(dropped = before - rows.len(), "applied weather filter");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::make_order;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 3, d).unwrap()
    }

    #[test]
    fn cutoff_is_strict() {
        let rows = vec![
            make_order("a", day(1)),
            make_order("b", day(5)),
            make_order("c", day(4)),
        ];
        let out = before_cutoff(rows, day(5));
        let ids: Vec<_> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn traffic_membership() {
        let mut jam = make_order("a", day(1));
        jam.road_traffic_density = "Jam".into();
        let mut low = make_order("b", day(1));
        low.road_traffic_density = "Low".into();

        let out = traffic_in(vec![jam, low], &set(&["Low", "Medium"]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "b");
    }

    #[test]
    fn empty_allowed_set_keeps_nothing() {
        let rows = vec![make_order("a", day(1))];
        assert!(weather_in(rows, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn filters_compose_in_sequence() {
        let mut a = make_order("a", day(1));
        a.weather_conditions = "conditions Fog".into();
        let mut b = make_order("b", day(2));
        b.road_traffic_density = "High".into();
        let c = make_order("c", day(20));
        let d = make_order("d", day(3));

        let filter = OrderFilter {
            cutoff: Some(day(10)),
            traffic: Some(set(&["Jam"])),
            weather: Some(set(&["conditions Sunny"])),
        };
        let out = filter.apply(vec![a, b, c, d]);
        let ids: Vec<_> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["d"]);
    }

    #[test]
    fn default_filter_keeps_everything() {
        let rows = vec![make_order("a", day(1)), make_order("b", day(30))];
        assert_eq!(OrderFilter::default().apply(rows).len(), 2);
    }

    #[test]
    fn view_constructors_pick_criteria() {
        let app = curry_shared::AppConfig::default();
        let view = ViewConfig::try_from(&app).unwrap();

        let company = OrderFilter::date_and_traffic(&view);
        assert!(company.weather.is_none());
        assert!(company.traffic.is_some());

        let couriers = OrderFilter::date_traffic_and_weather(&view);
        assert_eq!(couriers.weather.as_ref().map(|w| w.len()), Some(6));
        assert_eq!(couriers.cutoff, NaiveDate::from_ymd_opt(2022, 4, 13));
    }
}
