use fieldopts_core::{DynamicOptionsResponse, ProviderError};

/// Where a dynamic field stands. Failure and "no options" are different states.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FieldState {
    Unresolved,
    Resolved { response: DynamicOptionsResponse },
    Failed {
        error: String,
        #[serde(skip)]
        source: ProviderError,
    },
    /// Not fetched because a dynamic field it depends on did not resolve in this cascade.
    Blocked { by: String },
}

impl FieldState {
    pub fn resolved(response: DynamicOptionsResponse) -> Self {
        Self::Resolved { response }
    }

    pub fn failed(error: ProviderError) -> Self {
        Self::Failed {
            error: error.to_string(),
            source: error,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    pub fn response(&self) -> Option<&DynamicOptionsResponse> {
        match self {
            Self::Resolved { response } => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ProviderError> {
        match self {
            Self::Failed { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldResolution {
    pub field_id: String,
    #[serde(flatten)]
    pub state: FieldState,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CascadeReport {
    pub changed: String,
    pub generation: u64,
    /// Fields grouped in the order they were (or would have been) resolved.
    pub levels: Vec<Vec<String>>,
    pub resolutions: Vec<FieldResolution>,
    pub cancelled: bool,
}

impl CascadeReport {
    pub fn get(&self, field_id: &str) -> Option<&FieldState> {
        self.resolutions
            .iter()
            .find(|r| r.field_id == field_id)
            .map(|r| &r.state)
    }

    pub fn resolved_count(&self) -> usize {
        self.count(|s| s.is_resolved())
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, FieldState::Failed { .. }))
    }

    pub fn blocked_count(&self) -> usize {
        self.count(|s| matches!(s, FieldState::Blocked { .. }))
    }

    /// Affected fields that never got a state because the cascade was cancelled.
    pub fn pending(&self) -> Vec<String> {
        self.levels
            .iter()
            .flatten()
            .filter(|f| self.get(f).is_none())
            .cloned()
            .collect()
    }

    fn count(&self, pred: impl Fn(&FieldState) -> bool) -> usize {
        self.resolutions.iter().filter(|r| pred(&r.state)).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field `{0}` is static and has no options provider")]
    NotDynamic(String),
}
