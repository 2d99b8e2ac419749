//! HealthCrew API Library
//!
//! This library provides the core functionality for the HealthCrew API:
//! the agent crew that turns a user's profile into fitness, nutrition
//! and health advice, the external service clients it runs on, and the
//! HTTP layer that serves the analysis form.

pub mod agents;
pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
