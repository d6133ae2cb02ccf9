use std::collections::BTreeMap;
use std::sync::Arc;

use crate::provider::OptionsProvider;

/// Named providers, used to bind serialized descriptors back to code.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn OptionsProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<P>(&mut self, name: impl Into<String>, provider: P) -> &mut Self
    where
        P: OptionsProvider + 'static,
    {
        self.providers.insert(name.into(), Arc::new(provider));
        self
    }

    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        provider: Arc<dyn OptionsProvider>,
    ) -> &mut Self {
        self.providers.insert(name.into(), provider);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn OptionsProvider>> {
        self.providers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
