//! Great-circle distance between restaurant and delivery points.

use curry_shared::CleanedOrderRecord;

/// Mean earth radius in kilometres (IUGG).
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Haversine distance in km between two `(latitude, longitude)` points in degrees.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Distance an order travelled from restaurant to delivery location.
pub fn delivery_distance_km(order: &CleanedOrderRecord) -> f64 {
    haversine_km(
        (order.restaurant_latitude, order.restaurant_longitude),
        (order.delivery_latitude, order.delivery_longitude),
    )
}
