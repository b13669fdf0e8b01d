//! HTTP handlers for all API routes.

pub mod detect;
pub mod health;
pub mod metrics;
