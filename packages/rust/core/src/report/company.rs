//! Company view: order volume over time, traffic mix, and city locations.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use curry_shared::CleanedOrderRecord;

use super::group_by;
use crate::stats;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyOrders {
    pub date: NaiveDate,
    pub orders: usize,
}

/// Orders under one traffic density and their share of all orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficShare {
    pub traffic: String,
    pub orders: usize,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTrafficOrders {
    pub city: String,
    pub traffic: String,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyOrders {
    pub week: u32,
    pub orders: usize,
}

/// Orders per distinct courier within a week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyCourierLoad {
    pub week: u32,
    pub orders: usize,
    pub couriers: usize,
    pub orders_per_courier: f64,
}

/// Median delivery point of a (city, traffic) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTrafficLocation {
    pub city: String,
    pub traffic: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Everything the company view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyReport {
    pub orders_by_day: Vec<DailyOrders>,
    pub traffic_order_share: Vec<TrafficShare>,
    pub traffic_order_city: Vec<CityTrafficOrders>,
    pub orders_by_week: Vec<WeeklyOrders>,
    pub order_share_by_week: Vec<WeeklyCourierLoad>,
    pub city_traffic_locations: Vec<CityTrafficLocation>,
}

impl CompanyReport {
    pub fn build(rows: &[CleanedOrderRecord]) -> Self {
        Self {
            orders_by_day: orders_by_day(rows),
            traffic_order_share: traffic_order_share(rows),
            traffic_order_city: traffic_order_city(rows),
            orders_by_week: orders_by_week(rows),
            order_share_by_week: order_share_by_week(rows),
            city_traffic_locations: city_traffic_locations(rows),
        }
    }
}

/// Week of the year with weeks starting on Sunday; days before the first
/// Sunday fall in week 0 (`strftime`'s `%U`).
pub fn week_of_year(date: NaiveDate) -> u32 {
    (date.ordinal0() + 7 - date.weekday().num_days_from_sunday()) / 7
}

pub fn orders_by_day(rows: &[CleanedOrderRecord]) -> Vec<DailyOrders> {
    group_by(rows, |r| r.order_date, |_| ())
        .into_iter()
        .map(|(date, orders)| DailyOrders {
            date,
            orders: orders.len(),
        })
        .collect()
}

pub fn traffic_order_share(rows: &[CleanedOrderRecord]) -> Vec<TrafficShare> {
    let total = rows.len();
    group_by(rows, |r| r.road_traffic_density.clone(), |_| ())
        .into_iter()
        .map(|(traffic, orders)| TrafficShare {
            traffic,
            orders: orders.len(),
            share: orders.len() as f64 / total as f64,
        })
        .collect()
}

pub fn traffic_order_city(rows: &[CleanedOrderRecord]) -> Vec<CityTrafficOrders> {
    group_by(
        rows,
        |r| (r.city.clone(), r.road_traffic_density.clone()),
        |_| (),
    )
    .into_iter()
    .map(|((city, traffic), orders)| CityTrafficOrders {
        city,
        traffic,
        orders: orders.len(),
    })
    .collect()
}

pub fn orders_by_week(rows: &[CleanedOrderRecord]) -> Vec<WeeklyOrders> {
    group_by(rows, |r| week_of_year(r.order_date), |_| ())
        .into_iter()
        .map(|(week, orders)| WeeklyOrders {
            week,
            orders: orders.len(),
        })
        .collect()
}

pub fn order_share_by_week(rows: &[CleanedOrderRecord]) -> Vec<WeeklyCourierLoad> {
    group_by(
        rows,
        |r| week_of_year(r.order_date),
        |r| r.delivery_person_id.clone(),
    )
    .into_iter()
    .map(|(week, couriers)| {
        let orders = couriers.len();
        let distinct = couriers.into_iter().collect::<BTreeSet<_>>().len();
        WeeklyCourierLoad {
            week,
            orders,
            couriers: distinct,
            orders_per_courier: orders as f64 / distinct as f64,
        }
    })
    .collect()
}

pub fn city_traffic_locations(rows: &[CleanedOrderRecord]) -> Vec<CityTrafficLocation> {
    group_by(
        rows,
        |r| (r.city.clone(), r.road_traffic_density.clone()),
        |r| (r.delivery_latitude, r.delivery_longitude),
    )
    .into_iter()
    .filter_map(|((city, traffic), points)| {
        let (lats, lons): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        Some(CityTrafficLocation {
            city,
            traffic,
            latitude: stats::median(&lats)?,
            longitude: stats::median(&lons)?,
        })
    })
    .collect()
}
