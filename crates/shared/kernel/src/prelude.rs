pub use crate::config::{ConfigError, ConfigErrorExt, load_config};
pub use valida_domain::config::ApiConfig;

#[cfg(feature = "server")]
pub use crate::server::{ApiState, system_router};
