use crate::cpf::{Cpf, Rejection};
use std::fmt::Display;

/// Message attached to a valid verdict.
pub const VALID_MESSAGE: &str = "valid";

/// Outcome of one validation request.
///
/// A valid verdict always carries the canonical CPF; a rejection carries whatever the failing
/// gate echoes back; an internal failure carries only its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid(Cpf),
    Rejected(Rejection),
    /// Something unexpected went wrong while handling the request.
    Failed(String),
}

impl Verdict {
    /// Builds a server-side failure verdict from any error.
    pub fn failure(reason: &impl Display) -> Self {
        Self::Failed(reason.to_string())
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// `true` for verdicts caused by the client's input rather than by the service.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The canonical CPF once eleven digits were found, otherwise the best-effort original.
    #[must_use]
    pub fn formatted(&self) -> Option<String> {
        match self {
            Self::Valid(cpf) => Some(cpf.to_string()),
            Self::Rejected(rejection) => rejection.echo().map(ToOwned::to_owned),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Valid(_) => VALID_MESSAGE.to_owned(),
            Self::Rejected(rejection) => rejection.to_string(),
            Self::Failed(reason) => format!("failed to process the request: {reason}"),
        }
    }
}

impl From<Result<Cpf, Rejection>> for Verdict {
    fn from(result: Result<Cpf, Rejection>) -> Self {
        result.map_or_else(Self::Rejected, Self::Valid)
    }
}

/// Normalizes `candidate`, runs every gate and reports the verdict.
///
/// # Example
/// ```rust
/// use valida_cpf::validate_and_format;
///
/// let verdict = validate_and_format("529.982.247-25");
/// assert!(verdict.is_valid());
/// assert_eq!(verdict.formatted().as_deref(), Some("529.982.247-25"));
///
/// let verdict = validate_and_format("123");
/// assert_eq!(verdict.message(), "must contain exactly 11 digits, you supplied 3");
/// ```
#[must_use]
pub fn validate_and_format(candidate: &str) -> Verdict {
    Verdict::from(Cpf::parse(candidate))
}
