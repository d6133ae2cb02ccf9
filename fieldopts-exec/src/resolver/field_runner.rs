use fieldopts_core::{DynamicFieldContext, DynamicOptionsResponse, Field, ProviderError};

use crate::resolver::concurrency::ConcurrencyLimits;
use crate::resolver::events::{EventSink, ResolutionEvent};
use crate::resolver::result::FieldState;
use crate::resolver::types::ResolverConfig;

pub(crate) struct FieldDeps<'a> {
    pub limits: &'a ConcurrencyLimits,
    pub events: &'a dyn EventSink,
    pub config: &'a ResolverConfig,
}

/// Runs one provider call for `field` and turns the outcome into a state. Never stores it.
pub(crate) async fn run_field(
    field: &Field,
    ctx: DynamicFieldContext,
    generation: u64,
    deps: &FieldDeps<'_>,
) -> FieldState {
    deps.events
        .emit(ResolutionEvent::FieldStarted {
            generation,
            field_id: field.id.clone(),
        })
        .await;

    match fetch(field, &ctx, deps).await {
        Ok(response) => {
            tracing::debug!(field = %field.id, generation, items = response.items.len(), total = response.total, "field resolved");
            deps.events
                .emit(ResolutionEvent::FieldResolved {
                    generation,
                    field_id: field.id.clone(),
                    items: response.items.len(),
                    total: response.total,
                })
                .await;
            FieldState::resolved(response)
        }
        Err(error) => {
            tracing::warn!(field = %field.id, generation, %error, "field resolution failed");
            deps.events
                .emit(ResolutionEvent::FieldFailed {
                    generation,
                    field_id: field.id.clone(),
                    error: error.to_string(),
                })
                .await;
            FieldState::failed(error)
        }
    }
}

async fn fetch(
    field: &Field,
    ctx: &DynamicFieldContext,
    deps: &FieldDeps<'_>,
) -> Result<DynamicOptionsResponse, ProviderError> {
    let unbound = || ProviderError::Unbound(field.id.clone());
    let binding = field.binding.as_ref().ok_or_else(unbound)?;
    let provider = binding.provider.as_ref().ok_or_else(unbound)?;

    let _permit = deps.limits.acquire(binding.provider_name.as_deref()).await?;

    let response = match deps.config.provider_timeout {
        Some(limit) => tokio::time::timeout(limit, provider.fetch(ctx))
            .await
            .map_err(|_| ProviderError::Timeout {
                timeout_ms: limit.as_millis() as u64,
            })??,
        None => provider.fetch(ctx).await?,
    };

    if deps.config.enforce_contract {
        let page_size = ctx.pagination().map(|p| p.page_size);
        response
            .check_contract(page_size)
            .map_err(ProviderError::ContractViolation)?;
    }
    Ok(response)
}
