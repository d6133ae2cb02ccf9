pub mod concurrency;
pub mod events;
mod field_runner;
mod result;
mod scheduler;
pub mod state;
mod types;

pub use concurrency::{ConcurrencyLimits, ConcurrencyPermit};
pub use events::{
    CompositeEventSink, EventSink, NoOpEventSink, ResolutionEvent, StdoutEventSink,
    TracingEventSink,
};
pub use result::{CascadeReport, FieldResolution, FieldState, ResolveError};
pub use scheduler::Resolver;
pub use state::FieldStateStore;
pub use types::{FieldChange, ResolveRequest, ResolverConfig};
