use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use fieldopts_core::{OptionItem, ProviderRegistry, RecordMapping, StaticOptionsProvider};
use fieldopts_exec::http::{
    HttpClient, PagingStyle, RestOptionsConfig, RestOptionsProvider,
};
use serde::Deserialize;

use crate::utils::{parse_json_or_yaml, read_file, LoadError};

/// `providers:` section of a provider definitions file.
#[derive(Debug, Deserialize)]
pub struct ProvidersFile {
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderDef>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderDef {
    Static { options: Vec<OptionItem> },
    Rest(RestDef),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestDef {
    pub url: String,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    pub search_param: Option<String>,
    pub paging: Option<PagingDef>,
    #[serde(default)]
    pub items_pointer: String,
    pub total_pointer: Option<String>,
    pub id_key: Option<String>,
    pub label_key: Option<String>,
    #[serde(default)]
    pub extra_keys: Vec<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum PagingDef {
    #[serde(rename_all = "camelCase")]
    Page {
        #[serde(default = "default_page_param")]
        page_param: String,
        #[serde(default = "default_size_param")]
        size_param: String,
    },
    #[serde(rename_all = "camelCase")]
    Offset {
        #[serde(default = "default_offset_param")]
        offset_param: String,
        #[serde(default = "default_limit_param")]
        limit_param: String,
    },
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_size_param() -> String {
    "per_page".to_string()
}

fn default_offset_param() -> String {
    "offset".to_string()
}

fn default_limit_param() -> String {
    "limit".to_string()
}

impl RestDef {
    fn into_config(self) -> RestOptionsConfig {
        let mut cfg = RestOptionsConfig::new(self.url);
        cfg.query = self.query;
        cfg.search_param = self.search_param;
        cfg.paging = self.paging.map(|p| match p {
            PagingDef::Page {
                page_param,
                size_param,
            } => PagingStyle::Page {
                page_param,
                size_param,
            },
            PagingDef::Offset {
                offset_param,
                limit_param,
            } => PagingStyle::Offset {
                offset_param,
                limit_param,
            },
        });
        cfg.items_pointer = self.items_pointer;
        cfg.total_pointer = self.total_pointer;

        let defaults = RecordMapping::default();
        let mut mapping = RecordMapping::new(
            self.id_key.unwrap_or(defaults.id_key),
            self.label_key.unwrap_or(defaults.label_key),
        );
        for key in self.extra_keys {
            mapping = mapping.keep(key);
        }
        cfg.mapping = mapping;
        if let Some(ms) = self.timeout_ms {
            cfg.timeout = Duration::from_millis(ms);
        }
        cfg
    }
}

pub fn load_registry(path: &Path, http: Arc<dyn HttpClient>) -> Result<ProviderRegistry, LoadError> {
    let content = read_file(path)?;
    let file: ProvidersFile = parse_json_or_yaml(&content, "providers file")?;

    let mut registry = ProviderRegistry::new();
    let mut errors = Vec::new();
    for (name, def) in file.providers {
        tracing::debug!(provider = %name, "registering provider");
        match def {
            ProviderDef::Static { options } => {
                registry.register(name, StaticOptionsProvider::new(options));
            }
            ProviderDef::Rest(rest) => {
                match RestOptionsProvider::new(rest.into_config(), http.clone()) {
                    Ok(p) => {
                        registry.register(name, p);
                    }
                    Err(e) => errors.push(format!("providers.{name}: {e}")),
                }
            }
        }
    }
    if errors.is_empty() {
        Ok(registry)
    } else {
        Err(LoadError::Invalid(errors))
    }
}
