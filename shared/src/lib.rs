use serde::{Deserialize, Serialize};

/// A single stop along an event route, after decoding and validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Zero-based position in the route, assigned after invalid entries
    /// have been dropped.
    pub sequence_index: usize,
    /// Shape-only points extend the polyline but never get their own pin.
    #[serde(default)]
    pub shape_only: bool,
}

impl Waypoint {
    pub fn position(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteRole {
    Start,
    Checkpoint,
    End,
}

impl RouteRole {
    /// A route of length 1 counts its only stop as the start.
    pub fn for_position(index: usize, route_len: usize) -> Self {
        if index == 0 {
            RouteRole::Start
        } else if index + 1 == route_len {
            RouteRole::End
        } else {
            RouteRole::Checkpoint
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RouteRole::Start => "Starting Point",
            RouteRole::Checkpoint => "Checkpoint",
            RouteRole::End => "Final Destination",
        }
    }
}

/// A pin on the map with its popup content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerView {
    pub position: [f64; 2],
    pub title: String,
    pub role: RouteRole,
    /// One-based position shown in the marker popup.
    pub sequence_index: usize,
}

/// Everything the map library needs to draw a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteView {
    pub center: [f64; 2],
    pub markers: Vec<MarkerView>,
    pub polyline: Vec<[f64; 2]>,
}

/// Walking distance and duration shown in the info box next to the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_minutes: u32,
}

/// One entry of the numbered route-details list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryStop {
    /// One-based position in the numbered list.
    pub position: usize,
    pub name: String,
    pub role: RouteRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
