//! Utility functions

pub mod validation;

pub use validation::validate_code_size;
