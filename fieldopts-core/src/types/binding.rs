use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::provider::OptionsProvider;
use crate::types::FieldId;

/// How a dynamic field obtains its options.
#[derive(Clone, Default)]
pub struct DynamicBinding {
    /// Fields whose values the provider reads.
    pub depends_on: BTreeSet<FieldId>,
    /// Fields whose change forces a refetch without their values being read.
    pub refresh_on: BTreeSet<FieldId>,
    pub supports_search: bool,
    pub page_size: Option<u32>,
    /// Registry name of the provider, kept in the serialized descriptor.
    pub provider_name: Option<String>,
    pub provider: Option<Arc<dyn OptionsProvider>>,
}

impl DynamicBinding {
    /// `depends_on ∪ refresh_on`, deduplicated and sorted.
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.depends_on
            .union(&self.refresh_on)
            .map(String::as_str)
    }

    pub fn is_bound(&self) -> bool {
        self.provider.is_some()
    }
}

impl fmt::Debug for DynamicBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicBinding")
            .field("depends_on", &self.depends_on)
            .field("refresh_on", &self.refresh_on)
            .field("supports_search", &self.supports_search)
            .field("page_size", &self.page_size)
            .field("provider_name", &self.provider_name)
            .field("bound", &self.provider.is_some())
            .finish()
    }
}
