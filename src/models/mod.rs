//! Domain models
//!
//! This module contains the domain models that flow through the gateway.

pub mod submission;
pub mod verdict;

pub use submission::*;
pub use verdict::*;
