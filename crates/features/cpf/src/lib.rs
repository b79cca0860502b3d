//! # CPF feature slice
//!
//! Validates Brazilian individual taxpayer numbers (CPF).
//!
//! The slice is split into two pure steps and an optional HTTP surface:
//!
//! 1. **Extraction ([`extract`])**: picks the candidate from the query string, a JSON body
//!    (`{"Cpf": "..."}`) or a plain-text body.
//! 2. **Validation ([`validate_and_format`])**: strips everything but digits, enforces the
//!    length, repeated-digit and check-digit gates, and renders `DDD.DDD.DDD-DD`.
//! 3. **HTTP ([`server`], `server` feature)**: the Axum handler answering
//!    `{"valido", "cpf", "mensagem"}` with `200`, `400` or `500`.
//!
//! ## Example
//! ```rust
//! use valida_cpf::{extract, validate_and_format};
//!
//! let candidate = extract::extract(None, "POST", Some("{not json"));
//! let verdict = validate_and_format(candidate.value());
//! assert_eq!(verdict.message(), "must contain exactly 11 digits, you supplied 0");
//! ```

mod cpf;
mod error;
pub mod extract;
#[cfg(feature = "server")]
pub mod server;
mod validator;

pub use crate::cpf::{BASE_LEN, CPF_LEN, Cpf, Rejection, check_digits, format_canonical};
pub use crate::error::{CpfError, CpfErrorExt};
pub use crate::validator::{VALID_MESSAGE, Verdict, validate_and_format};
