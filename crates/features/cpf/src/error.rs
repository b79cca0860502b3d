use std::borrow::Cow;

/// Failures of the service itself, as opposed to rejected input.
#[derive(Debug, thiserror::Error)]
pub enum CpfError {
    /// The request body could not be read (client disconnect, size limit).
    #[cfg(feature = "server")]
    #[error("Request body error{}: {source}", format_context(.context))]
    Body { source: axum::Error, context: Option<Cow<'static, str>> },

    /// The query string could not be decoded into key/value pairs.
    #[cfg(feature = "server")]
    #[error("Query string error{}: {source}", format_context(.context))]
    Query {
        source: axum::extract::rejection::QueryRejection,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal CPF error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Adds `.context(..)` to results that convert into [`CpfError`].
pub trait CpfErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, CpfError>;
}

impl<T> CpfErrorExt<T> for Result<T, CpfError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                #[cfg(feature = "server")]
                CpfError::Body { context: c, .. } | CpfError::Query { context: c, .. } => {
                    *c = Some(context.into());
                },
                CpfError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

#[cfg(feature = "server")]
impl<T> CpfErrorExt<T> for Result<T, axum::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, CpfError> {
        self.map_err(|source| CpfError::Body { source, context: Some(context.into()) })
    }
}

#[cfg(feature = "server")]
impl<T> CpfErrorExt<T> for Result<T, axum::extract::rejection::QueryRejection> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, CpfError> {
        self.map_err(|source| CpfError::Query { source, context: Some(context.into()) })
    }
}

#[cfg(feature = "server")]
impl From<axum::Error> for CpfError {
    fn from(source: axum::Error) -> Self {
        Self::Body { source, context: None }
    }
}

impl From<&'static str> for CpfError {
    fn from(s: &'static str) -> Self {
        Self::Internal { message: Cow::Borrowed(s), context: None }
    }
}

impl From<String> for CpfError {
    fn from(s: String) -> Self {
        Self::Internal { message: Cow::Owned(s), context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
