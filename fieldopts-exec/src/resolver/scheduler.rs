use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::future::join_all;

use fieldopts_core::{DynamicFieldContext, DynamicOptionsResponse, Field, FieldValues, FormSchema};

use crate::resolver::concurrency::ConcurrencyLimits;
use crate::resolver::events::{EventSink, NoOpEventSink, ResolutionEvent};
use crate::resolver::field_runner::{run_field, FieldDeps};
use crate::resolver::result::{CascadeReport, FieldResolution, FieldState, ResolveError};
use crate::resolver::state::FieldStateStore;
use crate::resolver::types::{FieldChange, ResolveRequest, ResolverConfig};

/// Resolves dynamic options for one live form.
///
/// Holds the current state of every dynamic field. Each call takes a new generation
/// number; results from an older generation never overwrite newer ones.
pub struct Resolver {
    schema: Arc<FormSchema>,
    config: ResolverConfig,
    limits: ConcurrencyLimits,
    states: FieldStateStore,
    event_sink: Arc<dyn EventSink>,
    generation: AtomicU64,
}

impl Resolver {
    pub fn new(schema: Arc<FormSchema>, config: ResolverConfig) -> Self {
        let limits = ConcurrencyLimits::new(
            config.global_concurrency,
            &config.per_provider_concurrency,
        );
        Self {
            schema,
            config,
            limits,
            states: FieldStateStore::new(),
            event_sink: Arc::new(NoOpEventSink),
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub async fn state(&self, field_id: &str) -> FieldState {
        self.states.get(field_id).await
    }

    pub async fn states(&self) -> BTreeMap<String, FieldState> {
        self.states.snapshot().await
    }

    /// Resolves a single field on demand (focus, search, next page). Touches no other field.
    pub async fn resolve_field(
        &self,
        request: ResolveRequest,
    ) -> Result<FieldResolution, ResolveError> {
        let field = self.dynamic_field(&request.field_id)?;
        let generation = self.next_generation();
        let ctx = DynamicFieldContext::for_field(
            field,
            request.auth,
            &request.values,
            request.pagination,
            request.search_term,
        );
        let state = run_field(field, ctx, generation, &self.field_deps()).await;
        self.commit(&field.id, &state, generation).await;
        Ok(FieldResolution {
            field_id: field.id.clone(),
            state,
        })
    }

    /// Re-resolves every dynamic field affected by `change`, dependencies first.
    pub async fn on_field_changed(&self, change: FieldChange) -> Result<CascadeReport, ResolveError> {
        self.on_field_changed_with_cancel(change, std::future::pending())
            .await
    }

    /// Like [`Resolver::on_field_changed`], but stops when `cancel` completes.
    ///
    /// Results are stored one level at a time. Levels that had not finished when the
    /// cancel fired store nothing, so those fields keep their previous state.
    pub async fn on_field_changed_with_cancel<C>(
        &self,
        change: FieldChange,
        cancel: C,
    ) -> Result<CascadeReport, ResolveError>
    where
        C: Future<Output = ()>,
    {
        if self.schema.field(&change.field_id).is_none() {
            return Err(ResolveError::UnknownField(change.field_id));
        }
        let generation = self.next_generation();
        let levels = self.schema.graph().cascade_levels(&change.field_id);
        let affected: Vec<String> = levels.iter().flatten().cloned().collect();
        tracing::debug!(changed = %change.field_id, generation, affected = ?affected, "cascade started");

        self.event_sink
            .emit(ResolutionEvent::CascadeStarted {
                generation,
                changed: change.field_id.clone(),
                affected,
            })
            .await;

        let mut report = CascadeReport {
            changed: change.field_id.clone(),
            generation,
            levels,
            ..Default::default()
        };

        let cancelled = {
            let run = self.run_cascade(&change, generation, &mut report);
            tokio::select! {
                _ = run => false,
                _ = cancel => true,
            }
        };

        if cancelled {
            report.cancelled = true;
            let pending = report.pending();
            tracing::info!(changed = %change.field_id, generation, pending = ?pending, "cascade cancelled");
            self.event_sink
                .emit(ResolutionEvent::CascadeCancelled { generation, pending })
                .await;
        } else {
            self.event_sink
                .emit(ResolutionEvent::CascadeFinished {
                    generation,
                    resolved: report.resolved_count(),
                    failed: report.failed_count(),
                    blocked: report.blocked_count(),
                })
                .await;
        }
        Ok(report)
    }

    async fn run_cascade(&self, change: &FieldChange, generation: u64, report: &mut CascadeReport) {
        let deps = self.field_deps();
        let levels = report.levels.clone();
        let mut values = change.values.clone();
        for level in &levels {
            let planned: Vec<(&Field, Option<String>)> = level
                .iter()
                .filter_map(|id| self.schema.field(id))
                .map(|field| (field, self.blocker(field, report)))
                .collect();

            let jobs = planned.into_iter().map(|(field, blocker)| {
                let deps = &deps;
                let values = &values;
                async move {
                    let state = match blocker {
                        Some(by) => {
                            tracing::debug!(field = %field.id, %by, "field blocked by failed dependency");
                            self.event_sink
                                .emit(ResolutionEvent::FieldBlocked {
                                    generation,
                                    field_id: field.id.clone(),
                                    by: by.clone(),
                                })
                                .await;
                            FieldState::Blocked { by }
                        }
                        None => {
                            let ctx = DynamicFieldContext::for_field(
                                field,
                                change.auth.clone(),
                                values,
                                None,
                                None,
                            );
                            run_field(field, ctx, generation, deps).await
                        }
                    };
                    (field.id.clone(), state)
                }
            });

            let finished = join_all(jobs).await;
            for (field_id, state) in finished {
                self.commit(&field_id, &state, generation).await;
                if let Some(response) = state.response() {
                    retain_offered(&mut values, &field_id, response);
                }
                report.resolutions.push(FieldResolution { field_id, state });
            }
        }
    }

    /// The first dependency of `field` that did not resolve earlier in this cascade.
    fn blocker(&self, field: &Field, report: &CascadeReport) -> Option<String> {
        self.schema
            .graph()
            .dependencies_of(&field.id)
            .iter()
            .find(|dep| matches!(report.get(dep), Some(s) if !s.is_resolved()))
            .cloned()
    }

    async fn commit(&self, field_id: &str, state: &FieldState, generation: u64) {
        if !self.states.commit(field_id, state.clone(), generation).await {
            tracing::debug!(field = %field_id, generation, "discarding stale result");
            self.event_sink
                .emit(ResolutionEvent::StaleDiscarded {
                    generation,
                    field_id: field_id.to_string(),
                })
                .await;
        }
    }

    fn dynamic_field(&self, field_id: &str) -> Result<&Field, ResolveError> {
        let field = self
            .schema
            .field(field_id)
            .ok_or_else(|| ResolveError::UnknownField(field_id.to_string()))?;
        if !field.is_dynamic() {
            return Err(ResolveError::NotDynamic(field_id.to_string()));
        }
        Ok(field)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn field_deps(&self) -> FieldDeps<'_> {
        FieldDeps {
            limits: &self.limits,
            events: self.event_sink.as_ref(),
            config: &self.config,
        }
    }
}

/// Drops the part of `field_id`'s current selection that its fresh options no longer offer,
/// so dependents further down the cascade never see a selection made against old options.
fn retain_offered(values: &mut FieldValues, field_id: &str, response: &DynamicOptionsResponse) {
    let Some(selected) = values.get_mut(field_id) else {
        return;
    };
    let offered = |v: &serde_json::Value| {
        let id = match v {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            _ => return false,
        };
        response.items.iter().any(|item| item.id == id)
    };

    let keep = match selected {
        serde_json::Value::Null => false,
        serde_json::Value::Array(items) => {
            items.retain(|v| offered(v));
            !items.is_empty()
        }
        other => offered(other),
    };
    if !keep {
        tracing::debug!(field = %field_id, "selection not among refreshed options; withholding it from dependents");
        values.remove(field_id);
    }
}
