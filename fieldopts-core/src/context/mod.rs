mod auth;
mod decode;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DecodeError;
use crate::types::{DynamicOptionsResponse, Field, FieldValues, OptionItem, Pagination};

pub use auth::AuthContext;
pub use decode::decode_values;

/// Everything a provider may look at for one resolution call.
///
/// Built fresh per call from an immutable snapshot of the form values and dropped afterwards.
#[derive(Debug, Clone)]
pub struct DynamicFieldContext {
    field_id: String,
    auth: AuthContext,
    dependency_values: FieldValues,
    pagination: Option<Pagination>,
    search_term: Option<String>,
}

impl DynamicFieldContext {
    pub fn new(field_id: impl Into<String>, auth: AuthContext, dependency_values: FieldValues) -> Self {
        Self {
            field_id: field_id.into(),
            auth,
            dependency_values,
            pagination: None,
            search_term: None,
        }
    }

    /// Snapshots the values `field` declares, and applies its search/paging declarations.
    ///
    /// A search term is dropped unless the field supports search. Paging is only exposed
    /// when the field declares a page size; the requested size is clamped to that size.
    pub fn for_field(
        field: &Field,
        auth: AuthContext,
        values: &FieldValues,
        pagination: Option<Pagination>,
        search_term: Option<String>,
    ) -> Self {
        let Some(binding) = &field.binding else {
            return Self::new(field.id.clone(), auth, FieldValues::new());
        };

        let dependency_values = binding
            .triggers()
            .filter_map(|id| values.get(id).map(|v| (id.to_string(), v.clone())))
            .collect();

        let search_term = match search_term {
            Some(term) if binding.supports_search => Some(term),
            Some(_) => {
                tracing::debug!(field = %field.id, "search term ignored: field does not support search");
                None
            }
            None => None,
        };

        let pagination = binding.page_size.map(|declared| match pagination {
            Some(p) => Pagination::new(p.page, p.page_size.max(1).min(declared.max(1))),
            None => Pagination::first(declared),
        });

        Self {
            field_id: field.id.clone(),
            auth,
            dependency_values,
            pagination,
            search_term,
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn dependency_values(&self) -> &FieldValues {
        &self.dependency_values
    }

    pub fn value(&self, field_id: &str) -> Option<&serde_json::Value> {
        self.dependency_values.get(field_id)
    }

    pub fn str_value(&self, field_id: &str) -> Option<&str> {
        self.value(field_id).and_then(|v| v.as_str())
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// The search term, or `""` when none applies.
    pub fn filter_term(&self) -> &str {
        self.search_term.as_deref().unwrap_or("")
    }

    /// Decodes the dependency snapshot into a typed struct. See [`decode_values`].
    pub fn decode<T>(&self) -> Result<T, DecodeError>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        decode_values(&self.dependency_values)
    }

    /// Maps provider records to options.
    ///
    /// `total` is taken from the caller rather than from `records`, so paged providers
    /// report the true count. `hasMore` is derived when the call is paged.
    pub fn respond<R, I, F>(&self, records: I, total: u64, map: F) -> DynamicOptionsResponse
    where
        I: IntoIterator<Item = R>,
        F: FnMut(R) -> OptionItem,
    {
        let items: Vec<OptionItem> = records.into_iter().map(map).collect();
        let has_more = self
            .pagination
            .map(|p| p.has_more(items.len(), total));
        DynamicOptionsResponse {
            items,
            total,
            has_more,
        }
    }
}
