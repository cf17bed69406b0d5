//! Competitor Intelligence: dealer promotion monitoring dashboard
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod data;
pub mod analysis;
pub mod alerts;
pub mod session;
pub mod dashboard;
