use std::collections::BTreeMap;
use std::time::Duration;

use fieldopts_core::{AuthContext, FieldValues, Pagination};

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Upper bound on provider calls in flight for one resolver.
    pub global_concurrency: usize,
    /// Per-provider caps keyed by provider registry name.
    pub per_provider_concurrency: BTreeMap<String, usize>,
    /// Bound on a single provider call. `None` waits indefinitely.
    pub provider_timeout: Option<Duration>,
    /// Turn provider responses that break the `total`/page-size contract into errors.
    pub enforce_contract: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            global_concurrency: 8,
            per_provider_concurrency: BTreeMap::new(),
            provider_timeout: Some(Duration::from_secs(30)),
            enforce_contract: true,
        }
    }
}

/// An on-demand resolution of one field (focus, search, next page).
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub field_id: String,
    pub values: FieldValues,
    pub auth: AuthContext,
    pub pagination: Option<Pagination>,
    pub search_term: Option<String>,
}

impl ResolveRequest {
    pub fn new(field_id: impl Into<String>, values: FieldValues) -> Self {
        Self {
            field_id: field_id.into(),
            values,
            auth: AuthContext::none(),
            pagination: None,
            search_term: None,
        }
    }

    pub fn auth(mut self, auth: AuthContext) -> Self {
        self.auth = auth;
        self
    }

    pub fn page(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }
}

/// "Field `field_id` now has the value found in `values`."
#[derive(Debug, Clone)]
pub struct FieldChange {
    pub field_id: String,
    /// Every current form value, taken as one snapshot when the change happened.
    pub values: FieldValues,
    pub auth: AuthContext,
}

impl FieldChange {
    pub fn new(field_id: impl Into<String>, values: FieldValues, auth: AuthContext) -> Self {
        Self {
            field_id: field_id.into(),
            values,
            auth,
        }
    }
}
