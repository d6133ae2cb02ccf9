use serde_json::Value;

/// RFC 6901 pointer into a response body. `""` addresses the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPointer {
    raw: String,
}

impl JsonPointer {
    pub fn root() -> Self {
        Self { raw: String::new() }
    }

    pub fn parse(pointer: &str) -> Result<Self, JsonPointerError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        if !pointer.starts_with('/') {
            return Err(JsonPointerError::InvalidPrefix(pointer.to_string()));
        }

        let mut chars = pointer.chars();
        while let Some(ch) = chars.next() {
            if ch == '~' && !matches!(chars.next(), Some('0' | '1')) {
                return Err(JsonPointerError::InvalidEscape(pointer.to_string()));
            }
        }

        Ok(Self {
            raw: pointer.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn resolve<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        doc.pointer(&self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonPointerError {
    #[error("json pointer `{0}` must be empty or start with '/'")]
    InvalidPrefix(String),
    #[error("json pointer `{0}` contains an invalid escape (only ~0 and ~1 are allowed)")]
    InvalidEscape(String),
}
