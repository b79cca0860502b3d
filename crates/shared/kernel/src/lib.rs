//! Kernel utilities shared across slices.
//! Keep this crate lightweight: layered config loading plus, behind the `server` feature,
//! the shared Axum state and operational routes.
//!
//! ## Config loading
//! ```rust,no_run
//! use valida_kernel::config::load_config;
//! use valida_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap_or_default();
//! assert!(cfg.server.port > 0);
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use valida_domain as domain;
