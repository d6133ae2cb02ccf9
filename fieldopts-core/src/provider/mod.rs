mod registry;

use std::future::Future;

use async_trait::async_trait;

use crate::context::DynamicFieldContext;
use crate::error::ProviderError;
use crate::types::{paginate_slice, DynamicOptionsResponse, OptionItem};

pub use registry::ProviderRegistry;

/// Answers "what can be selected in this field, given this context".
///
/// Implementations apply the search term and page window themselves (usually by
/// forwarding them to the wrapped API). The resolver never re-filters their output.
#[async_trait]
pub trait OptionsProvider: Send + Sync {
    async fn fetch(&self, ctx: &DynamicFieldContext)
        -> Result<DynamicOptionsResponse, ProviderError>;
}

/// Adapts an async closure into a provider.
pub struct FnProvider<F> {
    f: F,
}

impl<F, Fut> FnProvider<F>
where
    F: Fn(DynamicFieldContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<DynamicOptionsResponse, ProviderError>> + Send,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> OptionsProvider for FnProvider<F>
where
    F: Fn(DynamicFieldContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<DynamicOptionsResponse, ProviderError>> + Send,
{
    async fn fetch(
        &self,
        ctx: &DynamicFieldContext,
    ) -> Result<DynamicOptionsResponse, ProviderError> {
        (self.f)(ctx.clone()).await
    }
}

/// Serves a fixed list of options. Search matches labels case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct StaticOptionsProvider {
    items: Vec<OptionItem>,
}

impl StaticOptionsProvider {
    pub fn new(items: Vec<OptionItem>) -> Self {
        Self { items }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(id, label)| OptionItem::new(id, label))
                .collect(),
        )
    }
}

#[async_trait]
impl OptionsProvider for StaticOptionsProvider {
    async fn fetch(
        &self,
        ctx: &DynamicFieldContext,
    ) -> Result<DynamicOptionsResponse, ProviderError> {
        let term = ctx.filter_term().to_lowercase();
        let matching: Vec<OptionItem> = self
            .items
            .iter()
            .filter(|item| term.is_empty() || item.label.to_lowercase().contains(&term))
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let page = paginate_slice(&matching, ctx.pagination());
        Ok(ctx.respond(page, total, |item| item))
    }
}
