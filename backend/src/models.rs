use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared::{ItineraryStop, RouteSummary, RouteView, Waypoint};

/// Event resource as served by the upstream events backend. Only the
/// fields the route views consume are modeled; unknown fields are ignored
/// and missing ones default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub starting_point: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Raw route field; stays untyped until the decoder has had its say.
    #[serde(default)]
    pub route: Value,
}

/// Every derived route artifact for one raw route field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteViewResponse {
    pub waypoints: Vec<Waypoint>,
    pub view: RouteView,
    pub summary: RouteSummary,
    pub itinerary: Vec<ItineraryStop>,
    /// "11.6 km, 139 min" info-box text.
    pub summary_text: String,
    /// "A → B → C" one-liner; empty when there is no route.
    pub itinerary_text: String,
    /// Present only when the route decoded to at least one waypoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpx_base64: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRouteView {
    pub event: Event,
    pub route: RouteViewResponse,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EventsQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}
