//! A generic options provider for JSON REST endpoints.

mod auth;
mod client;
mod pointer;
mod rest;

pub use auth::ApiCredentials;
pub use client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use pointer::{JsonPointer, JsonPointerError};
pub use rest::{PagingStyle, RestOptionsConfig, RestOptionsProvider};
