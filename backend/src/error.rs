use thiserror::Error;

use crate::events::UpstreamError;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    #[error("events backend error: {0}")]
    Upstream(#[from] UpstreamError),
}
