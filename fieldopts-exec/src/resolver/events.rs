use std::sync::Arc;

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type")]
pub enum ResolutionEvent {
    #[serde(rename = "cascade.started")]
    CascadeStarted {
        generation: u64,
        changed: String,
        affected: Vec<String>,
    },
    #[serde(rename = "cascade.finished")]
    CascadeFinished {
        generation: u64,
        resolved: usize,
        failed: usize,
        blocked: usize,
    },
    #[serde(rename = "cascade.cancelled")]
    CascadeCancelled {
        generation: u64,
        pending: Vec<String>,
    },
    #[serde(rename = "field.started")]
    FieldStarted { generation: u64, field_id: String },
    #[serde(rename = "field.resolved")]
    FieldResolved {
        generation: u64,
        field_id: String,
        items: usize,
        total: u64,
    },
    #[serde(rename = "field.failed")]
    FieldFailed {
        generation: u64,
        field_id: String,
        error: String,
    },
    #[serde(rename = "field.blocked")]
    FieldBlocked {
        generation: u64,
        field_id: String,
        by: String,
    },
    /// A finished result lost to a newer generation and was not stored.
    #[serde(rename = "field.stale")]
    StaleDiscarded { generation: u64, field_id: String },
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: ResolutionEvent);
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: ResolutionEvent) {}
}

/// Writes one JSON object per event to stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: ResolutionEvent) {
        println!("{}", serde_json::to_string(&event).unwrap_or_default());
    }
}

/// Forwards events to `tracing` at debug level (warn for failures).
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: ResolutionEvent) {
        match &event {
            ResolutionEvent::FieldFailed {
                generation,
                field_id,
                error,
            } => tracing::warn!(generation, field = %field_id, %error, "field resolution failed"),
            other => tracing::debug!(event = ?other, "resolution event"),
        }
    }
}

#[derive(Default)]
pub struct CompositeEventSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: ResolutionEvent) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}
