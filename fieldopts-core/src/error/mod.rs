use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Raised when a form schema cannot be built. Carries every violation found, not just the first.
#[derive(Debug, Error)]
#[error("form schema is misconfigured ({violations_len} violations)")]
pub struct ConfigurationError {
    pub violations: Vec<Violation>,
    violations_len: usize,
}

impl ConfigurationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let violations_len = violations.len();
        Self {
            violations,
            violations_len,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(|v| format!("{}: {}", v.path, v.message))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("field `{field}` has an incompatible value: {reason}")]
    InvalidField { field: String, reason: String },
    #[error("decode target must be a struct-like type that serializes to an object")]
    NotAnObject,
    #[error("decode failed: {0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("provider timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("provider broke the options contract: {0}")]
    ContractViolation(String),
    #[error("no options provider bound to field `{0}`")]
    Unbound(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
