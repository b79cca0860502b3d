use axum::Router;
use axum::response::{IntoResponse, Response};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};
use valida_cpf::server::cpf_router;
use valida_cpf::{CpfError, Verdict};
use valida_kernel::prelude::{ApiState, system_router};

#[derive(OpenApi)]
#[openapi(info(title = "Valida CPF", description = "Brazilian CPF validation service"))]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let api = ApiDoc::openapi();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(system_router())
        .merge(cpf_router())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/docs", api_doc);

    Router::new().merge(openapi_routes).merge(scalar_routes)
}

/// Answers a panicking handler with the same JSON shape as every other failure.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| (*s).to_owned()))
        .unwrap_or_else(|| "handler panicked".to_owned());

    let error = CpfError::from(message);
    tracing::error!(error = %error, "Request handler panicked");
    Verdict::failure(&error).into_response()
}
