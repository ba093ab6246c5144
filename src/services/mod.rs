//! Business logic services

pub mod run_service;

pub use run_service::RunService;
