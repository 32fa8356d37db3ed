use shared::{ItineraryStop, RouteRole, RouteSummary, Waypoint};

/// Numbered list of stops for the route-details panel.
pub fn route_itinerary(waypoints: &[Waypoint]) -> Vec<ItineraryStop> {
    waypoints
        .iter()
        .map(|waypoint| ItineraryStop {
            position: waypoint.sequence_index + 1,
            name: waypoint.name.clone(),
            role: RouteRole::for_position(waypoint.sequence_index, waypoints.len()),
        })
        .collect()
}

/// One-line rendition of the route, "A → B → C".
pub fn format_itinerary(waypoints: &[Waypoint]) -> String {
    waypoints
        .iter()
        .map(|waypoint| waypoint.name.as_str())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Info-box text next to the map. The distance always shows one decimal.
pub fn format_summary(summary: RouteSummary) -> String {
    format!(
        "{:.1} km, {} min",
        summary.distance_km, summary.duration_minutes
    )
}
