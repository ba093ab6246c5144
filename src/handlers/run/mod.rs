//! Run handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{routing::post, Router};

use crate::state::AppState;

/// Run routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/run", post(handler::run_submission))
}
