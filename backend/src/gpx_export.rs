use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment};

use crate::error::RouteError;

/// Encode a decoded route as a base64 GPX 1.1 track named after the event.
pub fn encode_route_as_gpx(
    name: &str,
    waypoints: &[shared::Waypoint],
) -> Result<String, RouteError> {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("event-routes".into()),
        ..Default::default()
    };
    let mut track = Track {
        name: Some(name.into()),
        ..Default::default()
    };

    let mut segment = TrackSegment::new();
    for point in waypoints.iter().map(to_track_point) {
        segment.points.push(point);
    }
    track.segments.push(segment);
    gpx.tracks.push(track);

    let mut buffer = Vec::new();
    gpx::write(&gpx, &mut buffer)?;
    Ok(BASE64.encode(buffer))
}

fn to_track_point(waypoint: &shared::Waypoint) -> gpx::Waypoint {
    let mut point = gpx::Waypoint::new(Point::new(waypoint.longitude, waypoint.latitude));
    point.name = Some(waypoint.name.clone());
    point
}
