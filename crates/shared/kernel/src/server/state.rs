use axum::extract::FromRef;
use valida_domain::config::{ApiConfig, CpfConfig};

/// Cheaply cloneable state handed to every Axum handler.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub config: ApiConfig,
}

impl ApiState {
    #[must_use]
    pub const fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.config.clone()
    }
}

impl FromRef<ApiState> for CpfConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.config.cpf.clone()
    }
}
