pub mod decoder;
pub mod error;
pub mod events;
pub mod gpx_export;
pub mod itinerary;
pub mod metrics;
pub mod models;
pub mod projector;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};

use shared::ApiError;

use crate::error::RouteError;
use crate::events::{EventsClient, UpstreamError};
use crate::models::{Event, EventRouteView, EventsQuery, RouteViewResponse};

#[derive(Clone)]
pub struct AppState {
    pub events: Arc<EventsClient>,
    /// Base URL that relative event images resolve against.
    pub media_base: String,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/route/view", post(route_view_handler))
        .route("/api/events", get(list_events_handler))
        .route("/api/events/:id/view", get(event_view_handler))
        .layer(cors)
        .with_state(state)
}

/// Build every derived route artifact from one raw route field.
pub fn build_route_view(track_name: &str, raw: &Value) -> Result<RouteViewResponse, RouteError> {
    let waypoints = decoder::decode_route(raw);
    let view = projector::project_route(&waypoints);
    let summary = metrics::summarize_route(&waypoints);
    let stops = itinerary::route_itinerary(&waypoints);
    let summary_text = itinerary::format_summary(summary);
    let itinerary_text = itinerary::format_itinerary(&waypoints);
    let gpx_base64 = if waypoints.is_empty() {
        None
    } else {
        Some(gpx_export::encode_route_as_gpx(track_name, &waypoints)?)
    };

    Ok(RouteViewResponse {
        waypoints,
        view,
        summary,
        itinerary: stops,
        summary_text,
        itinerary_text,
        gpx_base64,
    })
}

/// POST /api/route/view - decode a raw route field (any JSON shape) into a
/// map-ready view. Mirrors the in-memory navigation-state path: no event
/// lookup, just the pipeline.
async fn route_view_handler(
    Json(raw): Json<Value>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiError>)> {
    let response = build_route_view("route", &raw).map_err(error_response)?;
    Ok(Json(response))
}

/// GET /api/events - list upstream events, optionally narrowed to a
/// calendar month (and day) via ?year=&month=&day=.
async fn list_events_handler(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiError>)> {
    let fetched = state
        .events
        .fetch_events()
        .await
        .map_err(|err| error_response(err.into()))?;

    let selected = match (query.year, query.month) {
        (Some(year), Some(month)) => events::events_on(&fetched, year, month, query.day),
        _ => fetched,
    };
    let selected: Vec<Event> = selected
        .into_iter()
        .map(|event| resolve_image(event, &state.media_base))
        .collect();

    Ok(Json(selected))
}

/// GET /api/events/:id/view - fetch one upstream event and run the full
/// route pipeline over its route field.
async fn event_view_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiError>)> {
    let event = state
        .events
        .fetch_event(id)
        .await
        .map_err(|err| error_response(err.into()))?;

    let route = build_route_view(&event.title, &event.route).map_err(error_response)?;
    let event = resolve_image(event, &state.media_base);

    Ok(Json(EventRouteView { event, route }))
}

fn resolve_image(event: Event, media_base: &str) -> Event {
    let image = events::image_url(event.image.as_deref(), media_base);
    Event { image, ..event }
}

fn error_response(err: RouteError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        RouteError::Upstream(UpstreamError::NotFound(_)) => StatusCode::NOT_FOUND,
        RouteError::Upstream(UpstreamError::Request(_)) => StatusCode::BAD_GATEWAY,
        RouteError::Gpx(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
