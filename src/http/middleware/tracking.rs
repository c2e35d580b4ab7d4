//! Level outcome tracking.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;
use crate::quest::Level;

/// Count the attempt, and the solve when the level hands out its reward.
pub async fn track_level(
    State(level): State<Level>,
    req: Request<Body>,
    next: Next,
) -> Response {
    metrics::record_attempt(level);

    let response = next.run(req).await;
    let status = response.status();

    if status == StatusCode::OK {
        metrics::record_solved(level);
    }

    tracing::debug!(
        level = level.name(),
        status = status.as_u16(),
        "Level attempted"
    );

    response
}
