// Client for the external events backend, plus the pure helpers the event
// views need: calendar filtering and media URL resolution.

use chrono::{Datelike, NaiveDate};
use reqwest::StatusCode;

use crate::models::Event;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("events backend request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("event {0} not found")]
    NotFound(i64),
}

/// Thin HTTP client for the events REST backend.
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: reqwest::Client,
    base_url: String,
}

impl EventsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET {base}/events/
    pub async fn fetch_events(&self) -> Result<Vec<Event>, UpstreamError> {
        let url = format!("{}/events/", self.base_url);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let events: Vec<Event> = response.json().await?;
        tracing::debug!(count = events.len(), "fetched events from the events backend");
        Ok(events)
    }

    /// GET {base}/events/{id}/
    pub async fn fetch_event(&self, id: i64) -> Result<Event, UpstreamError> {
        let url = format!("{}/events/{}/", self.base_url, id);
        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound(id));
        }
        Ok(response.error_for_status()?.json().await?)
    }
}

/// Keep the events that fall in the given month, optionally on one day.
/// Events with a missing or unparseable date are excluded.
pub fn events_on(events: &[Event], year: i32, month: u32, day: Option<u32>) -> Vec<Event> {
    events
        .iter()
        .filter(|event| {
            event_date(event).map_or(false, |date| {
                date.year() == year
                    && date.month() == month
                    && day.map_or(true, |day| date.day() == day)
            })
        })
        .cloned()
        .collect()
}

fn event_date(event: &Event) -> Option<NaiveDate> {
    let date = event.date.as_deref()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Resolve an event image against the media base URL. Absolute URLs pass
/// through untouched.
pub fn image_url(image: Option<&str>, media_base: &str) -> Option<String> {
    let image = image?;
    if image.is_empty() {
        return None;
    }
    if image.starts_with("http") {
        Some(image.to_owned())
    } else {
        Some(format!(
            "{}/{}",
            media_base.trim_end_matches('/'),
            image.trim_start_matches('/')
        ))
    }
}
