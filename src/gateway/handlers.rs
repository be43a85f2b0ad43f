//! HTTP handlers
//!
//! Thin glue: each handler forwards to the store or the engine and maps the
//! error. No business rules live here.

pub mod benefit;
pub mod health;
pub mod transfer;

pub use benefit::{create_benefit, delete_benefit, get_benefit, list_benefits, update_benefit};
pub use health::{HealthResponse, health_check};
pub use transfer::create_transfer;
