use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};

/// Credentials a REST provider understands. Pass them through [`fieldopts_core::AuthContext`].
pub enum ApiCredentials {
    Bearer(SecretString),
    Header { name: String, value: SecretString },
}

impl ApiCredentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(SecretString::from(token.into()))
    }

    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Header {
            name: name.into(),
            value: SecretString::from(value.into()),
        }
    }

    pub(crate) fn apply(&self, headers: &mut BTreeMap<String, String>) {
        match self {
            Self::Bearer(token) => {
                headers.insert(
                    "authorization".to_string(),
                    format!("Bearer {}", token.expose_secret()),
                );
            }
            Self::Header { name, value } => {
                headers.insert(name.to_ascii_lowercase(), value.expose_secret().to_string());
            }
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("ApiCredentials::Bearer(<redacted>)"),
            Self::Header { name, .. } => write!(f, "ApiCredentials::Header({name}: <redacted>)"),
        }
    }
}
