//! Names shared between the HTTP surface, the `OpenAPI` document and the config loader.

/// `OpenAPI` tag for operational endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the CPF validation endpoint.
pub const CPF_TAG: &str = "CPF";

/// Query string parameter carrying the candidate CPF.
pub const CPF_QUERY_PARAM: &str = "cpf";
/// Field name of the JSON request body, as documented on the wire.
pub const CPF_JSON_FIELD: &str = "Cpf";

/// Prefix of environment variables overriding file configuration (`VALIDA__SERVER__PORT`).
pub const ENV_PREFIX: &str = "VALIDA";
/// Separator between nested keys in environment overrides.
pub const ENV_SEPARATOR: &str = "__";
/// Configuration file stem loaded when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "server";
