//! Grouped aggregates behind each dashboard view.
//!
//! Every report is computed from an already cleaned and filtered table and
//! is plain data (`Serialize`), so the CLI can print it as text or JSON.
//! Groups come out ordered by key.

pub mod company;
pub mod couriers;
pub mod restaurants;

use std::collections::BTreeMap;

use serde::Serialize;

use curry_shared::CleanedOrderRecord;

use crate::stats;

pub use company::CompanyReport;
pub use couriers::{CouriersReport, Ranking};
pub use restaurants::RestaurantsReport;

/// Mean and sample standard deviation of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSpread {
    pub group: String,
    pub mean: f64,
    /// `None` when the group has a single row.
    pub std: Option<f64>,
}

/// Mean and sample standard deviation of one (city, category) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityGroupSpread {
    pub city: String,
    pub group: String,
    pub mean: f64,
    pub std: Option<f64>,
}

/// Collect `value` per `key`, keys in ascending order.
pub(crate) fn group_by<K, V>(
    rows: &[CleanedOrderRecord],
    key: impl Fn(&CleanedOrderRecord) -> K,
    value: impl Fn(&CleanedOrderRecord) -> V,
) -> BTreeMap<K, Vec<V>>
where
    K: Ord,
{
    let mut groups: BTreeMap<K, Vec<V>> = BTreeMap::new();
    for row in rows {
        groups.entry(key(row)).or_default().push(value(row));
    }
    groups
}

/// Mean and std per single-key group. Empty groups are skipped.
pub(crate) fn spread_by(
    rows: &[CleanedOrderRecord],
    key: impl Fn(&CleanedOrderRecord) -> String,
    value: impl Fn(&CleanedOrderRecord) -> f64,
) -> Vec<GroupSpread> {
    group_by(rows, key, value)
        .into_iter()
        .filter_map(|(group, values)| {
            Some(GroupSpread {
                group,
                mean: stats::mean(&values)?,
                std: stats::sample_std(&values),
            })
        })
        .collect()
}

/// Mean and std per (city, `key`) group.
pub(crate) fn city_spread_by(
    rows: &[CleanedOrderRecord],
    key: impl Fn(&CleanedOrderRecord) -> String,
    value: impl Fn(&CleanedOrderRecord) -> f64,
) -> Vec<CityGroupSpread> {
    group_by(rows, |r| (r.city.clone(), key(r)), value)
        .into_iter()
        .filter_map(|((city, group), values)| {
            Some(CityGroupSpread {
                city,
                group,
                mean: stats::mean(&values)?,
                std: stats::sample_std(&values),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_order, march};

    #[test]
    fn group_by_orders_keys() {
        let mut rows = vec![
            make_order("a", march(1)),
            make_order("b", march(1)),
            make_order("c", march(1)),
        ];
        rows[0].city = "Urban".into();
        rows[1].city = "Metropolitian".into();
        rows[2].city = "Urban".into();

        let groups = group_by(&rows, |r| r.city.clone(), |r| r.id.clone());
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(keys, vec!["Metropolitian", "Urban"]);
        assert_eq!(groups["Urban"], vec!["a", "c"]);
    }

    #[test]
    fn spread_of_singleton_group_has_no_std() {
        let rows = vec![make_order("a", march(1))];
        let out = spread_by(&rows, |r| r.festival.clone(), |r| r.time_taken_min as f64);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].std, None);
        assert_eq!(out[0].mean, 30.0);
    }

    #[test]
    fn city_spread_groups_by_pair() {
        let mut rows: Vec<_> = (0..3).map(|i| make_order(&i.to_string(), march(1))).collect();
        rows[0].type_of_order = "Meal".into();
        rows[0].time_taken_min = 10;
        rows[1].type_of_order = "Meal".into();
        rows[1].time_taken_min = 20;
        rows[2].type_of_order = "Snack".into();

        let out = city_spread_by(&rows, |r| r.type_of_order.clone(), |r| r.time_taken_min as f64);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].group, "Meal");
        assert_eq!(out[0].mean, 15.0);
        assert!((out[0].std.unwrap() - 50f64.sqrt()).abs() < 1e-9);
    }
}
