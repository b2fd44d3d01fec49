//! Couriers view: age and vehicle extremes, ratings, and delivery speed.

use serde::Serialize;

use curry_shared::CleanedOrderRecord;

use super::{GroupSpread, group_by, spread_by};
use crate::stats;

/// Extremes of courier age and vehicle condition. `None` on an empty table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CourierOverview {
    pub oldest_age: Option<i64>,
    pub youngest_age: Option<i64>,
    pub best_vehicle_condition: Option<i64>,
    pub worst_vehicle_condition: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierRating {
    pub delivery_person_id: String,
    pub mean_rating: f64,
}

/// Mean delivery time of one courier within one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierSpeed {
    pub city: String,
    pub delivery_person_id: String,
    pub mean_time_min: f64,
}

/// Which end of the speed ranking to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    Fastest,
    Slowest,
}

/// Everything the couriers view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouriersReport {
    pub overview: CourierOverview,
    pub avg_rating_per_courier: Vec<CourierRating>,
    pub rating_by_traffic: Vec<GroupSpread>,
    pub rating_by_weather: Vec<GroupSpread>,
    pub fastest: Vec<CourierSpeed>,
    pub slowest: Vec<CourierSpeed>,
}

impl CouriersReport {
    /// Build the report, ranking the first `top_n` couriers of each of `cities`.
    pub fn build(rows: &[CleanedOrderRecord], cities: &[String], top_n: usize) -> Self {
        Self {
            overview: overview(rows),
            avg_rating_per_courier: avg_rating_per_courier(rows),
            rating_by_traffic: rating_by(rows, |r| r.road_traffic_density.clone()),
            rating_by_weather: rating_by(rows, |r| r.weather_conditions.clone()),
            fastest: top_couriers(rows, cities, top_n, Ranking::Fastest),
            slowest: top_couriers(rows, cities, top_n, Ranking::Slowest),
        }
    }
}

pub fn overview(rows: &[CleanedOrderRecord]) -> CourierOverview {
    CourierOverview {
        oldest_age: rows.iter().map(|r| r.delivery_person_age).max(),
        youngest_age: rows.iter().map(|r| r.delivery_person_age).min(),
        best_vehicle_condition: rows.iter().map(|r| r.vehicle_condition).max(),
        worst_vehicle_condition: rows.iter().map(|r| r.vehicle_condition).min(),
    }
}

/// Rows with a NaN rating carry no rating; they are left out of averages.
fn rated(rows: &[CleanedOrderRecord]) -> Vec<CleanedOrderRecord> {
    rows.iter()
        .filter(|r| !r.delivery_person_rating.is_nan())
        .cloned()
        .collect()
}

pub fn avg_rating_per_courier(rows: &[CleanedOrderRecord]) -> Vec<CourierRating> {
    group_by(
        &rated(rows),
        |r| r.delivery_person_id.clone(),
        |r| r.delivery_person_rating,
    )
    .into_iter()
    .filter_map(|(delivery_person_id, ratings)| {
        Some(CourierRating {
            delivery_person_id,
            mean_rating: stats::mean(&ratings)?,
        })
    })
    .collect()
}

/// Mean and std of rating per group.
pub fn rating_by(
    rows: &[CleanedOrderRecord],
    key: impl Fn(&CleanedOrderRecord) -> String,
) -> Vec<GroupSpread> {
    spread_by(&rated(rows), key, |r| r.delivery_person_rating)
}

/// The `top_n` fastest or slowest couriers of each city, cities in the order
/// given. Speed is the courier's mean time taken in that city, rounded to
/// two decimals; ties go to the lower courier id.
pub fn top_couriers(
    rows: &[CleanedOrderRecord],
    cities: &[String],
    top_n: usize,
    ranking: Ranking,
) -> Vec<CourierSpeed> {
    let speeds: Vec<CourierSpeed> = group_by(
        rows,
        |r| (r.city.clone(), r.delivery_person_id.clone()),
        |r| r.time_taken_min as f64,
    )
    .into_iter()
    .filter_map(|((city, delivery_person_id), times)| {
        Some(CourierSpeed {
            city,
            delivery_person_id,
            mean_time_min: stats::round2(stats::mean(&times)?),
        })
    })
    .collect();

    let mut out = Vec::new();
    for city in cities {
        let mut in_city: Vec<&CourierSpeed> = speeds.iter().filter(|s| &s.city == city).collect();
        in_city.sort_by(|a, b| {
            let by_time = a.mean_time_min.total_cmp(&b.mean_time_min);
            let by_time = match ranking {
                Ranking::Fastest => by_time,
                Ranking::Slowest => by_time.reverse(),
            };
            by_time.then_with(|| a.delivery_person_id.cmp(&b.delivery_person_id))
        });
        out.extend(in_city.into_iter().take(top_n).cloned());
    }
    out
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fastest => write!(f, "fastest"),
            Self::Slowest => write!(f, "slowest"),
        }
    }
}
