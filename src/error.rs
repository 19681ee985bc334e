//! Error types for the openapi-resources crate.

use thiserror::Error;

/// Boxed cause of a transport-level failure.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while turning a document into the schema model.
///
/// All of these are fatal: the command tree is never built from a partial load.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaLoadError {
    #[error("failed to read API description: {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("API description is neither valid JSON nor YAML")]
    Parse(#[source] serde_yaml::Error),

    #[error("malformed API description: {reason}")]
    Malformed { reason: String },

    #[error("unresolvable reference: {reference}")]
    UnresolvedRef { reference: String },

    #[error("parameter {param} of operation {operation} has no resolvable type")]
    UnresolvableParam { operation: String, param: String },

    #[error("path placeholder {{{placeholder}}} of operation {operation} does not match a declared path parameter")]
    PlaceholderMismatch {
        operation: String,
        placeholder: String,
    },
}

/// Errors raised while deriving flags for an operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindingError {
    #[error("no free shorthand for flag --{flag} of command {command}")]
    ShorthandExhausted { command: String, flag: String },

    #[error("flag --{flag} is declared twice on command {command}")]
    DuplicateFlag { command: String, flag: String },

    #[error("command {resource} {command} is declared twice")]
    DuplicateCommand { resource: String, command: String },

    #[error("operation {operation} is bound twice")]
    DuplicateOperation { operation: String },

    #[error("command name {name} is reserved")]
    ReservedName { name: String },
}

/// Errors from a single API call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("HTTP request failed")]
    Transport(#[source] TransportError),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Errors that can occur while building or sending a request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispatchError {
    #[error("invalid JSON in --data argument")]
    InvalidInput(#[source] serde_json::Error),

    #[error("request body is required (use --data)")]
    BodyRequired,

    #[error("missing value for path parameter: {name}")]
    MissingPathParam { name: String },

    #[error("path {path} still contains unresolved placeholders")]
    UnresolvedPlaceholder { path: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors resolving per-invocation configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("access token is required (use --access-token or set {env})")]
    MissingAccessToken { env: String },

    #[error("API description is required (pass --schema before the resource name or set {env})")]
    MissingSchema { env: String },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}
