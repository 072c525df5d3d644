//! Error types for the EveryAction client.
//!
//! # Design
//! Argument problems are detected locally, before any request is sent, and
//! each gets its own variant so callers can match on the exact misuse.
//! Everything the network or the server produced lands in `TransportError`,
//! which keeps the parsed `errors` array from the response body alongside
//! the raw status and body.

use serde::Deserialize;

/// Errors returned by the client, the object model and the resolver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// An object could not be built from the given primary value.
    #[error("cannot construct {kind}: {reason}")]
    Construction { kind: &'static str, reason: String },

    /// Two supplied names resolve to the same property.
    #[error("`{first}` and `{second}` both set `{canonical}`")]
    AmbiguousArgument {
        canonical: String,
        first: String,
        second: String,
    },

    /// A singular alias was used to read a list property.
    #[error("`{alias}` is a singular alias of list property `{canonical}` and cannot be read")]
    AmbiguousAccess { alias: String, canonical: String },

    /// A name that none of the accepted spellings match.
    #[error("unknown parameter `{name}` for {scope}")]
    UnknownParameter { name: String, scope: String },

    /// A value whose shape does not fit the property it was given for.
    #[error("invalid value for `{name}`: expected {expected}")]
    InvalidValue { name: String, expected: String },

    /// One alias claimed by two different properties of the same table.
    #[error("alias `{alias}` maps to both `{first}` and `{second}`")]
    AliasConflict {
        alias: String,
        first: String,
        second: String,
    },

    /// A type or endpoint table that refers to something undefined.
    #[error("invalid definition of {scope}: {reason}")]
    InvalidDefinition { scope: String, reason: String },

    #[error("{endpoint} takes {expected} path parameter(s), got {got}")]
    PathArity {
        endpoint: &'static str,
        expected: usize,
        got: usize,
    },

    /// `limit` or `skip` given to an endpoint that does not page.
    #[error("{endpoint} is not paginated; `{argument}` is not accepted")]
    PaginationNotSupported {
        endpoint: &'static str,
        argument: &'static str,
    },

    /// A lookup by name matched no record or more than one.
    #[error("could not find {kind} named {name:?}: {reason}")]
    FindFailed {
        kind: &'static str,
        name: String,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A response body that parsed as JSON but does not fit the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Transport(TransportError::Http { status: 404, .. }))
    }

    /// Parsed server errors, if this error came from an HTTP response.
    pub fn server_errors(&self) -> &[ErrorDetail] {
        match self {
            ApiError::Transport(TransportError::Http { errors, .. }) => errors,
            _ => &[],
        }
    }
}

/// Failures produced by the network or the remote service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {}", summarize(.errors, .body))]
    Http {
        status: u16,
        body: String,
        errors: Vec<ErrorDetail>,
    },

    /// A 2xx response whose body is not valid JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// One entry of the `errors` array EveryAction returns with failed requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub reference_code: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

impl TransportError {
    /// Build an `Http` error from a failed response, parsing its `errors` array when present.
    pub fn from_response(status: u16, body: &str) -> Self {
        let errors = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.errors)
            .unwrap_or_default();
        TransportError::Http {
            status,
            body: body.to_string(),
            errors,
        }
    }
}

fn summarize(errors: &[ErrorDetail], body: &str) -> String {
    if errors.is_empty() {
        return body.to_string();
    }
    errors
        .iter()
        .map(|e| {
            let code = e.code.as_deref().unwrap_or("?");
            let text = e.text.as_deref().unwrap_or("");
            if e.properties.is_empty() {
                format!("[{code}] {text}")
            } else {
                format!("[{code}] {text} ({})", e.properties.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
