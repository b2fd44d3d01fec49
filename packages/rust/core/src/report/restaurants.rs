//! Restaurants view: courier count, delivery distance, and delivery time
//! broken down by festival, city, order type, and traffic.

use std::collections::BTreeSet;

use serde::Serialize;

use curry_shared::CleanedOrderRecord;

use super::{CityGroupSpread, GroupSpread, city_spread_by, group_by, spread_by};
use crate::geo::delivery_distance_km;
use crate::stats;

/// Headline metrics of the restaurants view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantOverview {
    pub unique_couriers: usize,
    /// Mean restaurant-to-customer distance, rounded to two decimals.
    pub mean_distance_km: Option<f64>,
    /// Delivery time per festival flag, rounded to two decimals.
    pub festival_time: Vec<GroupSpread>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityDistance {
    pub city: String,
    pub mean_distance_km: f64,
}

/// Everything the restaurants view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantsReport {
    pub overview: RestaurantOverview,
    pub time_by_city: Vec<GroupSpread>,
    pub time_by_city_order_type: Vec<CityGroupSpread>,
    pub time_by_city_traffic: Vec<CityGroupSpread>,
    pub distance_by_city: Vec<CityDistance>,
}

impl RestaurantsReport {
    pub fn build(rows: &[CleanedOrderRecord]) -> Self {
        Self {
            overview: overview(rows),
            time_by_city: spread_by(rows, |r| r.city.clone(), minutes),
            time_by_city_order_type: city_spread_by(rows, |r| r.type_of_order.clone(), minutes),
            time_by_city_traffic: city_spread_by(
                rows,
                |r| r.road_traffic_density.clone(),
                minutes,
            ),
            distance_by_city: distance_by_city(rows),
        }
    }
}

fn minutes(r: &CleanedOrderRecord) -> f64 {
    r.time_taken_min as f64
}

pub fn overview(rows: &[CleanedOrderRecord]) -> RestaurantOverview {
    let unique_couriers = rows
        .iter()
        .map(|r| r.delivery_person_id.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    let distances: Vec<f64> = rows.iter().map(delivery_distance_km).collect();

    let festival_time = festival_time(rows);

    RestaurantOverview {
        unique_couriers,
        mean_distance_km: stats::mean(&distances).map(stats::round2),
        festival_time,
    }
}

/// Mean and std of delivery time for festival and non-festival orders.
pub fn festival_time(rows: &[CleanedOrderRecord]) -> Vec<GroupSpread> {
    spread_by(rows, |r| r.festival.clone(), minutes)
        .into_iter()
        .map(|s| GroupSpread {
            group: s.group,
            mean: stats::round2(s.mean),
            std: s.std.map(stats::round2),
        })
        .collect()
}

pub fn distance_by_city(rows: &[CleanedOrderRecord]) -> Vec<CityDistance> {
    group_by(rows, |r| r.city.clone(), delivery_distance_km)
        .into_iter()
        .filter_map(|(city, distances)| {
            Some(CityDistance {
                city,
                mean_distance_km: stats::mean(&distances)?,
            })
        })
        .collect()
}
