use super::model::{CpfQuery, CpfRequest, CpfResponse};
use crate::error::{CpfError, CpfErrorExt};
use crate::extract;
use crate::validator::{Verdict, validate_and_format};
use axum::Json;
use axum::body::{Body, to_bytes};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{debug, error, info};
use valida_domain::config::CpfConfig;
use valida_domain::constants::CPF_TAG;

impl Verdict {
    /// `200` for a valid CPF, `400` for rejected input, `500` for internal failures.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Valid(_) => StatusCode::OK,
            Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Verdict {
    fn into_response(self) -> Response {
        (self.status(), Json(CpfResponse::from(&self))).into_response()
    }
}

impl IntoResponse for CpfError {
    fn into_response(self) -> Response {
        error!(error = %self, "CPF request failed");
        Verdict::failure(&self).into_response()
    }
}

/// Validates a CPF sent as `?cpf=`, as a JSON body or as a plain-text body.
#[utoipa::path(
    method(get, post),
    path = "/api/cpf",
    params(CpfQuery),
    request_body(
        content = CpfRequest,
        description = "Used only by POST without a `cpf` query parameter. Plain text is accepted too.",
        content_type = "application/json",
    ),
    responses(
        (status = OK, description = "The CPF is valid", body = CpfResponse),
        (status = BAD_REQUEST, description = "Missing CPF, wrong digit count or bad check digits", body = CpfResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Unexpected failure while processing the request", body = CpfResponse),
    ),
    tag = CPF_TAG,
)]
pub async fn validate_handler(
    State(cfg): State<CpfConfig>,
    method: Method,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    body: Body,
) -> Result<Verdict, CpfError> {
    let Query(pairs) = query.context("Failed to decode query string")?;
    let query = extract::query_value(&pairs);

    let body = if extract::reads_body(query, method.as_str()) {
        Some(read_body(body, cfg.max_body_bytes).await?)
    } else {
        None
    };

    let candidate = extract::extract(query, method.as_str(), body.as_deref());
    debug!(origin = %candidate.origin(), "CPF candidate extracted");

    let verdict = validate_and_format(candidate.value());
    match &verdict {
        Verdict::Valid(cpf) => {
            info!(origin = %candidate.origin(), "CPF is valid");
            debug!(%cpf, "Validated CPF");
        },
        Verdict::Rejected(rejection) => {
            info!(origin = %candidate.origin(), gate = rejection.gate(), "CPF rejected");
        },
        Verdict::Failed(_) => {},
    }

    Ok(verdict)
}

/// Reads at most `limit` bytes; invalid UTF-8 is replaced rather than refused.
async fn read_body(body: Body, limit: usize) -> Result<String, CpfError> {
    let bytes = to_bytes(body, limit).await.context("Failed to read request body")?;
    debug!(len = bytes.len(), "Request body received");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
