use shared::{MarkerView, RouteRole, RouteView, Waypoint};

/// Map center when an event carries no usable route: Kathmandu.
pub const DEFAULT_CENTER: [f64; 2] = [27.7172, 85.3240];

/// Turn a decoded waypoint sequence into the primitives the map library
/// draws: pin markers, the connecting polyline and the initial center.
///
/// Bounds fitting stays with the map library; it gets the full point list.
pub fn project_route(waypoints: &[Waypoint]) -> RouteView {
    let center = waypoints
        .first()
        .map(Waypoint::position)
        .unwrap_or(DEFAULT_CENTER);

    let markers = waypoints
        .iter()
        .filter(|waypoint| !waypoint.shape_only)
        .map(|waypoint| MarkerView {
            position: waypoint.position(),
            title: waypoint.name.clone(),
            role: RouteRole::for_position(waypoint.sequence_index, waypoints.len()),
            sequence_index: waypoint.sequence_index + 1,
        })
        .collect();

    // A single point is not a line.
    let polyline = if waypoints.len() < 2 {
        Vec::new()
    } else {
        waypoints.iter().map(Waypoint::position).collect()
    };

    RouteView {
        center,
        markers,
        polyline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waypoint(name: &str, latitude: f64, longitude: f64, sequence_index: usize) -> Waypoint {
        Waypoint {
            name: name.to_owned(),
            latitude,
            longitude,
            sequence_index,
            shape_only: false,
        }
    }

    #[test]
    fn empty_route_uses_default_center() {
        let view = project_route(&[]);
        assert_eq!(view.center, DEFAULT_CENTER);
        assert!(view.markers.is_empty());
        assert!(view.polyline.is_empty());
    }

    #[test]
    fn single_waypoint_is_a_start_with_no_line() {
        let view = project_route(&[waypoint("Only", 27.7, 85.3, 0)]);
        assert_eq!(view.center, [27.7, 85.3]);
        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].role, RouteRole::Start);
        assert_eq!(view.markers[0].sequence_index, 1);
        assert!(view.polyline.is_empty());
    }

    #[test]
    fn roles_follow_sequence_order() {
        let route = [
            waypoint("A", 1.0, 1.0, 0),
            waypoint("B", 2.0, 2.0, 1),
            waypoint("C", 3.0, 3.0, 2),
        ];
        let view = project_route(&route);
        let roles: Vec<RouteRole> = view.markers.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            [RouteRole::Start, RouteRole::Checkpoint, RouteRole::End]
        );
        assert_eq!(view.center, [1.0, 1.0]);
        assert_eq!(view.polyline, [[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]);
    }

    #[test]
    fn shape_points_draw_the_line_but_get_no_pin() {
        let mut route = [
            waypoint("A", 1.0, 1.0, 0),
            waypoint("bend", 1.5, 1.5, 1),
            waypoint("B", 2.0, 2.0, 2),
        ];
        route[1].shape_only = true;

        let view = project_route(&route);
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.markers[0].title, "A");
        assert_eq!(view.markers[1].title, "B");
        assert_eq!(view.markers[1].role, RouteRole::End);
        // The hidden point still shapes the polyline.
        assert_eq!(view.polyline.len(), 3);
    }
}
