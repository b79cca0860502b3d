//! Shared Axum plumbing: application state and operational routes.

mod health;
mod router;
mod state;

pub use router::system_router;
pub use state::ApiState;
