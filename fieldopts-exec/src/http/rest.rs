use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use fieldopts_core::types::is_blank;
use fieldopts_core::{
    DynamicFieldContext, DynamicOptionsResponse, OptionItem, OptionsProvider, ProviderError,
    RecordMapping,
};

use crate::http::auth::ApiCredentials;
use crate::http::client::{HttpClient, HttpError, HttpRequest};
use crate::http::pointer::{JsonPointer, JsonPointerError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagingStyle {
    /// `?page=2&per_page=25`, pages counted from 1.
    Page {
        page_param: String,
        size_param: String,
    },
    /// `?offset=25&limit=25`.
    Offset {
        offset_param: String,
        limit_param: String,
    },
}

#[derive(Debug, Clone)]
pub struct RestOptionsConfig {
    /// URL with `{fieldId}` placeholders filled from the field's dependency values.
    pub url_template: String,
    pub query: BTreeMap<String, String>,
    pub search_param: Option<String>,
    pub paging: Option<PagingStyle>,
    /// Where the record array lives in the body. Empty means the body is the array.
    pub items_pointer: String,
    /// Where the total count lives. Without it the total covers the records seen so far.
    pub total_pointer: Option<String>,
    pub mapping: RecordMapping,
    pub timeout: Duration,
    pub max_response_bytes: usize,
}

impl RestOptionsConfig {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            query: BTreeMap::new(),
            search_param: None,
            paging: None,
            items_pointer: String::new(),
            total_pointer: None,
            mapping: RecordMapping::default(),
            timeout: Duration::from_secs(10),
            max_response_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Fetches options from a JSON REST endpoint.
///
/// Status 401/403 maps to [`ProviderError::Auth`], other non-2xx statuses to
/// [`ProviderError::Network`], and bodies that don't match the configured shape to
/// [`ProviderError::MalformedResponse`].
pub struct RestOptionsProvider {
    config: RestOptionsConfig,
    items: JsonPointer,
    total: Option<JsonPointer>,
    http: Arc<dyn HttpClient>,
}

impl RestOptionsProvider {
    pub fn new(config: RestOptionsConfig, http: Arc<dyn HttpClient>) -> Result<Self, JsonPointerError> {
        let items = JsonPointer::parse(&config.items_pointer)?;
        let total = config
            .total_pointer
            .as_deref()
            .map(JsonPointer::parse)
            .transpose()?;
        Ok(Self {
            config,
            items,
            total,
            http,
        })
    }

    fn build_request(&self, ctx: &DynamicFieldContext) -> Result<HttpRequest, ProviderError> {
        let raw = expand_template(&self.config.url_template, ctx)?;
        let mut url = url::Url::parse(&raw)
            .map_err(|e| ProviderError::other(format!("invalid url `{raw}`: {e}")))?;

        {
            let mut q = url.query_pairs_mut();
            for (k, v) in &self.config.query {
                q.append_pair(k, v);
            }
            if let Some(param) = &self.config.search_param {
                if !ctx.filter_term().is_empty() {
                    q.append_pair(param, ctx.filter_term());
                }
            }
            if let (Some(style), Some(p)) = (&self.config.paging, ctx.pagination()) {
                match style {
                    PagingStyle::Page {
                        page_param,
                        size_param,
                    } => {
                        q.append_pair(page_param, &p.page.to_string());
                        q.append_pair(size_param, &p.page_size.to_string());
                    }
                    PagingStyle::Offset {
                        offset_param,
                        limit_param,
                    } => {
                        q.append_pair(offset_param, &p.offset().to_string());
                        q.append_pair(limit_param, &p.page_size.to_string());
                    }
                }
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        let mut req = HttpRequest::get(url);
        req.headers
            .insert("accept".to_string(), "application/json".to_string());
        if let Some(creds) = ctx.auth().downcast_ref::<ApiCredentials>() {
            creds.apply(&mut req.headers);
        }
        Ok(req)
    }

    fn parse_body(
        &self,
        ctx: &DynamicFieldContext,
        body: &[u8],
    ) -> Result<DynamicOptionsResponse, ProviderError> {
        let doc: Value = serde_json::from_slice(body)
            .map_err(|e| ProviderError::MalformedResponse(format!("body is not JSON: {e}")))?;

        let records = self
            .items
            .resolve(&doc)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ProviderError::MalformedResponse(format!(
                    "no record array at `{}`",
                    self.items.as_str()
                ))
            })?;

        let items = records
            .iter()
            .map(|r| OptionItem::from_record(r, &self.config.mapping))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ProviderError::MalformedResponse)?;

        let total = match &self.total {
            Some(ptr) => ptr.resolve(&doc).and_then(Value::as_u64).ok_or_else(|| {
                ProviderError::MalformedResponse(format!(
                    "no unsigned integer total at `{}`",
                    ptr.as_str()
                ))
            })?,
            None => ctx.pagination().map(|p| p.offset()).unwrap_or(0) + items.len() as u64,
        };

        Ok(ctx.respond(items, total, |item| item))
    }
}

#[async_trait]
impl OptionsProvider for RestOptionsProvider {
    async fn fetch(
        &self,
        ctx: &DynamicFieldContext,
    ) -> Result<DynamicOptionsResponse, ProviderError> {
        let req = self.build_request(ctx)?;
        tracing::debug!(field = %ctx.field_id(), request = ?req, "fetching options");

        let resp = self
            .http
            .send(req, self.config.timeout, self.config.max_response_bytes)
            .await
            .map_err(|e| map_http_error(e, self.config.timeout))?;

        match resp.status {
            200..=299 => self.parse_body(ctx, &resp.body),
            401 | 403 => Err(ProviderError::Auth(format!(
                "upstream answered {}",
                resp.status
            ))),
            status => Err(ProviderError::Network(format!(
                "unexpected status {status}"
            ))),
        }
    }
}

/// Replaces each `{id}` with the url-encoded value of dependency `id`.
fn expand_template(template: &str, ctx: &DynamicFieldContext) -> Result<String, ProviderError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            return Err(ProviderError::other(format!(
                "unterminated placeholder in url template `{template}`"
            )));
        };
        let name = &after[..end];
        let value = ctx
            .value(name)
            .filter(|v| !is_blank(v))
            .and_then(scalar_text)
            .ok_or_else(|| {
                ProviderError::other(format!("url template needs a value for `{name}`"))
            })?;
        out.push_str(&urlencoding::encode(&value));
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn map_http_error(e: HttpError, timeout: Duration) -> ProviderError {
    match e {
        HttpError::Timeout => ProviderError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        },
        HttpError::ResponseTooLarge { .. } => ProviderError::MalformedResponse(e.to_string()),
        HttpError::Network(msg) | HttpError::Other(msg) => ProviderError::Network(msg),
    }
}
