use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ConfigurationError, Violation};
use crate::types::Field;

use super::rules;

pub(crate) static FIELD_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-\.]+$").expect("valid"));

pub(crate) struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<(), ConfigurationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError::new(self.violations))
        }
    }

    pub fn validate_schema(&mut self, name: &str, fields: &[Field], allow_unbound: bool) {
        rules::schema::validate_schema(self, name, fields, allow_unbound);
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }
}
