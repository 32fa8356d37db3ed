// Route field decoding.
// The events backend serves the route as a JSON array, as a JSON-encoded
// string, or as a string wrapped in one extra layer of quoting with escaped
// inner quotes. All of them must render, and a corrupt route must never
// take the event page down with it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use shared::Waypoint;

static LAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""lat":\s*([0-9.-]+)"#).expect("valid pattern"));
static LNG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""lng":\s*([0-9.-]+)"#).expect("valid pattern"));
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""name":\s*"([^"]+)""#).expect("valid pattern"));

/// Which strategy produced the waypoints.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedRoute {
    /// The payload was a JSON array, directly or after unwrapping.
    Parsed(Vec<Waypoint>),
    /// JSON parsing failed but the regex scan recovered coordinate pairs.
    Extracted(Vec<Waypoint>),
    /// Nothing usable in the payload.
    Empty,
}

impl DecodedRoute {
    pub fn waypoints(&self) -> &[Waypoint] {
        match self {
            DecodedRoute::Parsed(waypoints) | DecodedRoute::Extracted(waypoints) => waypoints,
            DecodedRoute::Empty => &[],
        }
    }

    pub fn into_waypoints(self) -> Vec<Waypoint> {
        match self {
            DecodedRoute::Parsed(waypoints) | DecodedRoute::Extracted(waypoints) => waypoints,
            DecodedRoute::Empty => Vec::new(),
        }
    }
}

/// Decode a raw route field into an ordered waypoint list.
///
/// Malformed payloads decode to an empty list and invalid entries are
/// dropped silently; this function never fails.
pub fn decode_route(raw: &Value) -> Vec<Waypoint> {
    decode_route_tagged(raw).into_waypoints()
}

/// As [`decode_route`], but reporting which parse strategy succeeded.
/// A result with zero waypoints always collapses to [`DecodedRoute::Empty`].
pub fn decode_route_tagged(raw: &Value) -> DecodedRoute {
    let decoded = match raw {
        Value::Array(entries) => DecodedRoute::Parsed(validate_entries(entries)),
        Value::String(text) => decode_string(text),
        _ => DecodedRoute::Empty,
    };
    match decoded {
        DecodedRoute::Parsed(waypoints) if waypoints.is_empty() => DecodedRoute::Empty,
        DecodedRoute::Extracted(waypoints) if waypoints.is_empty() => DecodedRoute::Empty,
        other => other,
    }
}

fn decode_string(text: &str) -> DecodedRoute {
    let mut inner = text;
    // Strip exactly one redundant layer of outer quoting.
    if inner.len() >= 2 && inner.starts_with('"') && inner.ends_with('"') {
        inner = &inner[1..inner.len() - 1];
    }
    let unescaped = inner.replace("\\\"", "\"");

    match serde_json::from_str::<Value>(&unescaped) {
        Ok(Value::Array(entries)) => DecodedRoute::Parsed(validate_entries(&entries)),
        // Valid JSON that is not an array carries no waypoints.
        Ok(_) => DecodedRoute::Empty,
        Err(err) => {
            tracing::warn!(error = %err, "route string is not valid JSON, trying regex extraction");
            extract_with_regex(&unescaped)
        }
    }
}

/// Keep the entries whose coordinates survive coercion, in input order,
/// and number them after filtering.
fn validate_entries(entries: &[Value]) -> Vec<Waypoint> {
    let mut waypoints = Vec::new();
    for entry in entries {
        let Some(fields) = entry.as_object() else {
            continue;
        };
        let Some(latitude) = finite_coordinate(fields.get("lat")) else {
            continue;
        };
        let Some(longitude) = finite_coordinate(fields.get("lng")) else {
            continue;
        };

        let sequence_index = waypoints.len();
        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| placeholder_name(sequence_index));
        let shape_only = fields
            .get("isRoutePoint")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        waypoints.push(Waypoint {
            name,
            latitude,
            longitude,
            sequence_index,
            shape_only,
        });
    }
    waypoints
}

/// Last-chance extraction over text JSON refused: pair the i-th "lat"
/// match with the i-th "lng" and the i-th "name" found anywhere in the
/// string, dropping pairs whose numbers do not parse.
fn extract_with_regex(text: &str) -> DecodedRoute {
    let latitudes: Vec<Option<f64>> = LAT_PATTERN
        .captures_iter(text)
        .map(|capture| parse_finite(&capture[1]))
        .collect();
    let longitudes: Vec<Option<f64>> = LNG_PATTERN
        .captures_iter(text)
        .map(|capture| parse_finite(&capture[1]))
        .collect();
    let names: Vec<String> = NAME_PATTERN
        .captures_iter(text)
        .map(|capture| capture[1].to_owned())
        .collect();

    let count = latitudes.len().min(longitudes.len());
    let mut waypoints = Vec::new();
    for i in 0..count {
        let (Some(latitude), Some(longitude)) = (latitudes[i], longitudes[i]) else {
            continue;
        };
        let sequence_index = waypoints.len();
        let name = names
            .get(i)
            .cloned()
            .unwrap_or_else(|| placeholder_name(sequence_index));
        waypoints.push(Waypoint {
            name,
            latitude,
            longitude,
            sequence_index,
            shape_only: false,
        });
    }

    if waypoints.is_empty() {
        DecodedRoute::Empty
    } else {
        DecodedRoute::Extracted(waypoints)
    }
}

fn placeholder_name(sequence_index: usize) -> String {
    format!("Point {}", sequence_index + 1)
}

/// Coordinates arrive as JSON numbers or as numeric strings; anything that
/// does not parse to a finite value disqualifies the entry.
fn finite_coordinate(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => parse_finite(text.trim()),
        _ => None,
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_route_decodes_to_nothing() {
        assert!(decode_route(&Value::Null).is_empty());
        assert_eq!(decode_route_tagged(&Value::Null), DecodedRoute::Empty);
    }

    #[test]
    fn pre_parsed_array_keeps_input_order() {
        let raw = json!([
            {"lat": 1.0, "lng": 1.0, "name": "A"},
            {"lat": 2.0, "lng": 2.0, "name": "B"}
        ]);
        let waypoints = decode_route(&raw);
        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints[0].name, "A");
        assert_eq!(waypoints[0].sequence_index, 0);
        assert_eq!(waypoints[1].name, "B");
        assert_eq!(waypoints[1].sequence_index, 1);
    }

    #[test]
    fn plain_json_string_parses() {
        let raw = json!("[{\"name\":\"Basantapur\",\"lat\":27.7044,\"lng\":85.3075}]");
        let decoded = decode_route_tagged(&raw);
        let DecodedRoute::Parsed(waypoints) = decoded else {
            panic!("expected the JSON path, got {decoded:?}");
        };
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].name, "Basantapur");
    }

    #[test]
    fn double_encoded_string_round_trips() {
        let raw = json!("\"[{\\\"lat\\\":27.7,\\\"lng\\\":85.3,\\\"name\\\":\\\"Kathmandu\\\"}]\"");
        let decoded = decode_route_tagged(&raw);
        let DecodedRoute::Parsed(waypoints) = decoded else {
            panic!("expected the JSON path, got {decoded:?}");
        };
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].name, "Kathmandu");
        assert_eq!(waypoints[0].latitude, 27.7);
        assert_eq!(waypoints[0].longitude, 85.3);
    }

    #[test]
    fn invalid_entries_are_dropped_and_reindexed() {
        let raw = json!([
            {"lat": "x", "lng": 2.0, "name": "Bad"},
            {"lat": 1.0, "lng": 1.0, "name": "Good"}
        ]);
        let waypoints = decode_route(&raw);
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].name, "Good");
        assert_eq!(waypoints[0].sequence_index, 0);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let raw = json!([{"lat": "27.7", "lng": " 85.3 "}]);
        let waypoints = decode_route(&raw);
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].latitude, 27.7);
        assert_eq!(waypoints[0].longitude, 85.3);
    }

    #[test]
    fn blank_names_get_placeholders() {
        let raw = json!([
            {"lat": 1.0, "lng": 1.0, "name": ""},
            {"lat": 2.0, "lng": 2.0}
        ]);
        let waypoints = decode_route(&raw);
        assert_eq!(waypoints[0].name, "Point 1");
        assert_eq!(waypoints[1].name, "Point 2");
    }

    #[test]
    fn shape_points_keep_their_flag() {
        let raw = json!([{"lat": 1.0, "lng": 1.0, "isRoutePoint": true}]);
        let waypoints = decode_route(&raw);
        assert!(waypoints[0].shape_only);
    }

    #[test]
    fn regex_fallback_recovers_truncated_payloads() {
        let raw =
            json!("[{\"name\":\"A\",\"lat\":27.71,\"lng\":85.32},{\"name\":\"B\",\"lat\":27.68,\"lng\":85.43");
        let decoded = decode_route_tagged(&raw);
        let DecodedRoute::Extracted(waypoints) = decoded else {
            panic!("expected the regex path, got {decoded:?}");
        };
        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints[0].name, "A");
        assert_eq!(waypoints[1].name, "B");
        assert_eq!(waypoints[1].latitude, 27.68);
        assert_eq!(waypoints[1].longitude, 85.43);
        assert_eq!(waypoints[1].sequence_index, 1);
    }

    #[test]
    fn fallback_pairs_lat_and_lng_positionally() {
        // Two lat matches but a single lng match: only one pair survives.
        let raw = json!("garbage \"lat\": 1.5 more \"lat\": 2.5 and \"lng\": 3.5");
        let waypoints = decode_route(&raw);
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].latitude, 1.5);
        assert_eq!(waypoints[0].longitude, 3.5);
        assert_eq!(waypoints[0].name, "Point 1");
    }

    #[test]
    fn total_leniency_over_garbage() {
        let cases = [
            json!("not json"),
            json!("{\"a\":1}"),
            json!({}),
            json!(42),
            json!([[1, 2], [3]]),
            json!([{"lat": null, "lng": null}]),
            json!(""),
        ];
        for raw in &cases {
            assert!(decode_route(raw).is_empty(), "expected empty for {raw}");
        }
    }

    #[test]
    fn decoding_is_idempotent() {
        let raw = json!([{"lat": 1.0, "lng": 2.0, "name": "A"}]);
        assert_eq!(decode_route(&raw), decode_route(&raw));
        let broken = json!("[{\"lat\":1.0,\"lng\":2.0");
        assert_eq!(decode_route(&broken), decode_route(&broken));
    }
}
