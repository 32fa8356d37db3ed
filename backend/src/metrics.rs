use shared::{RouteSummary, Waypoint};

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Fixed walking pace behind the duration estimate. A stated
/// simplification, not a routing ETA.
const AVERAGE_SPEED_KMH: f64 = 5.0;

pub fn haversine_km(a: [f64; 2], b: [f64; 2]) -> f64 {
    let lat1 = a[0].to_radians();
    let lat2 = b[0].to_radians();
    let dlat = (b[0] - a[0]).to_radians();
    let dlon = (b[1] - a[1]).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Cumulative great-circle distance and walking duration over a route.
/// Fewer than two waypoints means there is nothing to traverse.
pub fn summarize_route(waypoints: &[Waypoint]) -> RouteSummary {
    if waypoints.len() < 2 {
        return RouteSummary {
            distance_km: 0.0,
            duration_minutes: 0,
        };
    }

    let total_km: f64 = waypoints
        .windows(2)
        .map(|pair| haversine_km(pair[0].position(), pair[1].position()))
        .sum();

    RouteSummary {
        distance_km: (total_km * 10.0).round() / 10.0,
        // The estimate keeps the unrounded total so it does not inherit
        // the one-decimal display rounding.
        duration_minutes: (total_km / AVERAGE_SPEED_KMH * 60.0).round() as u32,
    }
}
