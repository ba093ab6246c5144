//! Run handler implementations

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Submission, Verdict},
    services::RunService,
    state::AppState,
};

use super::request::RunRequest;

/// Run a submission through the sentinel engine.
///
/// Checks run in a fixed order: engine availability, request shape, then
/// code size. The body rejection is taken as a value so the engine check
/// still comes first for malformed requests.
pub async fn run_submission(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Verdict>> {
    RunService::ensure_engine_available(state.invoker()).await?;

    let Json(body) = payload?;
    let request = RunRequest::try_from(body)?;
    request.validate()?;

    let verdict = RunService::run(
        &state.config().engine,
        state.invoker(),
        Submission::from(request),
    )
    .await?;

    Ok(Json(verdict))
}
