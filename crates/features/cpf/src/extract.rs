//! Picks the candidate CPF out of a request.
//!
//! The query parameter wins whenever it is non-blank. Otherwise only a `POST` body is
//! consulted: first as a JSON object with a `Cpf` field, then, if that decode fails for any
//! reason, as plain text.

use serde_json::{Map, Number, Value};
use std::fmt;
use tracing::debug;
use valida_domain::constants::{CPF_JSON_FIELD, CPF_QUERY_PARAM};

const POST: &str = "POST";

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Query,
    JsonField,
    RawText,
    /// Nothing usable was supplied; the candidate is empty.
    Absent,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Query => "query",
            Self::JsonField => "json_field",
            Self::RawText => "raw_text",
            Self::Absent => "absent",
        })
    }
}

/// An unvalidated CPF candidate tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    value: String,
    origin: Origin,
}

impl Candidate {
    fn new(value: impl Into<String>, origin: Origin) -> Self {
        Self { value: value.into(), origin }
    }

    const fn absent() -> Self {
        Self { value: String::new(), origin: Origin::Absent }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn origin(&self) -> Origin {
        self.origin
    }
}

/// Reasons a body is not treated as a JSON CPF request.
#[derive(Debug, thiserror::Error)]
enum JsonFallback {
    #[error("malformed JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("unexpected JSON shape: {0}")]
    Shape(&'static str),
}

/// `true` when the body has to be read to find the candidate.
#[must_use]
pub fn reads_body(query: Option<&str>, method: &str) -> bool {
    non_blank(query).is_none() && method == POST
}

/// The first `cpf` value of a decoded query string, matching the key in any ASCII casing.
///
/// Later repetitions of the key are ignored.
#[must_use]
pub fn query_value<K, V>(pairs: &[(K, V)]) -> Option<&str>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .find(|(key, _)| key.as_ref().eq_ignore_ascii_case(CPF_QUERY_PARAM))
        .map(|(_, value)| value.as_ref())
}

/// Produces the candidate for one request.
///
/// `body` is only looked at for `POST` requests without a usable query parameter; callers
/// can skip reading it when [`reads_body`] returns `false`.
///
/// # Example
/// ```rust
/// use valida_cpf::extract::{Origin, extract};
///
/// let candidate = extract(None, "POST", Some(r#"{"Cpf":"52998224725"}"#));
/// assert_eq!(candidate.value(), "52998224725");
/// assert_eq!(candidate.origin(), Origin::JsonField);
///
/// let candidate = extract(Some("111.444.777-35"), "POST", Some("ignored"));
/// assert_eq!(candidate.origin(), Origin::Query);
/// ```
#[must_use]
pub fn extract(query: Option<&str>, method: &str, body: Option<&str>) -> Candidate {
    if let Some(value) = non_blank(query) {
        return Candidate::new(value, Origin::Query);
    }

    if method != POST {
        return Candidate::absent();
    }

    body.map_or_else(Candidate::absent, from_body)
}

/// Interprets a request body as a JSON CPF object, falling back to the trimmed text.
#[must_use]
pub fn from_body(body: &str) -> Candidate {
    let text = body.trim();
    if text.is_empty() {
        return Candidate::absent();
    }

    match decode_json(text) {
        Ok(Some(value)) => Candidate::new(value, Origin::JsonField),
        Ok(None) => Candidate::absent(),
        Err(reason) => {
            debug!(%reason, "Body is not a JSON CPF request, using it as plain text");
            Candidate::new(text, Origin::RawText)
        },
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// `Ok(None)` means valid JSON without a CPF (`null`, or an object missing the field).
fn decode_json(text: &str) -> Result<Option<String>, JsonFallback> {
    match serde_json::from_str::<Value>(text)? {
        Value::Null => Ok(None),
        Value::Object(fields) => field_value(&fields),
        _ => Err(JsonFallback::Shape("expected an object")),
    }
}

/// Looks up the CPF field, preferring the exact key and accepting any ASCII casing.
fn field_value(fields: &Map<String, Value>) -> Result<Option<String>, JsonFallback> {
    let value = fields.get(CPF_JSON_FIELD).or_else(|| {
        fields.iter().find(|(key, _)| key.eq_ignore_ascii_case(CPF_JSON_FIELD)).map(|(_, v)| v)
    });

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(number_text(n))),
        Some(_) => Err(JsonFallback::Shape("the CPF field must be a string or a number")),
    }
}

/// Decimal text of a JSON number; an integral float such as `52998224725.0` loses its `.0`.
fn number_text(n: &Number) -> String {
    if let Some(v) = n.as_u64() {
        return v.to_string();
    }
    let text = n.to_string();
    match text.strip_suffix(".0") {
        Some(integral) => integral.to_owned(),
        None => text,
    }
}
