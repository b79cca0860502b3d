//! Axum surface of the slice: request/response models, the handler and its router.

mod handler;
mod model;

pub use handler::validate_handler;
pub use model::{CpfQuery, CpfRequest, CpfResponse};

use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use valida_domain::config::CpfConfig;

/// Route of the validation endpoint.
pub const CPF_ROUTE: &str = "/api/cpf";

/// Routes of the CPF slice (`GET`/`POST /api/cpf`).
///
/// Any state works as long as the endpoint limits can be pulled out of it.
pub fn cpf_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
    CpfConfig: axum::extract::FromRef<S>,
{
    OpenApiRouter::<S>::new().routes(routes!(handler::validate_handler))
}
