#![forbid(unsafe_code)]

//! Runtime side of dynamic field options: the resolver and a REST provider.
//!
//! Schemas, providers and contexts are defined in `fieldopts-core`.

pub mod http;
pub mod resolver;

pub use crate::http::{ApiCredentials, HttpClient, ReqwestHttpClient, RestOptionsConfig, RestOptionsProvider};
pub use crate::resolver::{
    CascadeReport, EventSink, FieldChange, FieldResolution, FieldState, ResolutionEvent,
    ResolveError, ResolveRequest, Resolver, ResolverConfig,
};
