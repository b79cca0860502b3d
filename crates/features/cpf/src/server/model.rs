use crate::validator::Verdict;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query string of the validation endpoint, as documented.
///
/// The handler decodes the raw pairs instead, so a repeated or differently cased `cpf` key
/// never rejects the request; the first occurrence wins.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CpfQuery {
    /// Candidate CPF, with or without punctuation. Takes precedence over the body.
    pub cpf: Option<String>,
}

/// JSON body accepted by `POST`. Any other body is read as plain text.
///
/// The key match is case-insensitive at runtime; `Cpf` is the documented spelling.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CpfRequest {
    #[serde(rename = "Cpf")]
    pub cpf: Option<String>,
}

/// Body of every response of the validation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CpfResponse {
    /// Whether the CPF is structurally valid.
    pub valido: bool,
    /// Canonical `DDD.DDD.DDD-DD` form, the stripped input, or `null`.
    pub cpf: Option<String>,
    /// Outcome description.
    pub mensagem: String,
}

impl From<&Verdict> for CpfResponse {
    fn from(verdict: &Verdict) -> Self {
        Self { valido: verdict.is_valid(), cpf: verdict.formatted(), mensagem: verdict.message() }
    }
}
