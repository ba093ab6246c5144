//! Sentinel Gateway - HTTP broker for the sentinel execution engine
//!
//! This library accepts untrusted source-code submissions over HTTP and has
//! them compiled and run by the external, already-sandboxed `sentinel`
//! engine, returning the engine's verdict to the caller.
//!
//! # Features
//!
//! - Input bounded before it reaches the filesystem or a subprocess
//! - One temporary workspace file per submission, always removed
//! - Wall-clock bounded engine runs with full stdout/stderr capture
//! - Tolerant parsing of the engine's line-oriented JSON protocol
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Submission orchestration
//! - **Engine**: Workspace, invoker and output interpreter
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use axum::{extract::DefaultBodyLimit, Router};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router with its routes and body limit
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config().server.max_body_bytes;

    Router::new()
        .merge(handlers::routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
