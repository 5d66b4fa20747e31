use crate::{timestamp::TimestampResult, SharedState};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, warn};

/// `GET /api/timestamp`: the current time.
pub async fn current(State(state): State<SharedState>) -> Json<TimestampResult> {
    Json(resolve(&state, None))
}

/// `GET /api/timestamp/:timestamp`: the given epoch milliseconds or date string.
///
/// Invalid input is still answered with `200 OK` and the `Invalid Date` body.
pub async fn timestamp(
    State(state): State<SharedState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    match path {
        Ok(Path(raw)) => Json(resolve(&state, Some(&raw))).into_response(),
        Err(e) => {
            warn!("Error decoding timestamp segment: {}", e);
            (e.status(), e.body_text()).into_response()
        }
    }
}

fn resolve(state: &SharedState, raw: Option<&str>) -> TimestampResult {
    let result = state.resolver.resolve(raw);
    if result.is_valid() {
        debug!(input = ?raw, unix = ?result.unix, utc = %result.utc, "resolved timestamp");
    } else {
        debug!(input = ?raw, "input is not a valid date");
    }
    result
}
