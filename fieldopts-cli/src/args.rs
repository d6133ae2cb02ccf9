use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SchemaArgs {
    /// Read the file as an older field-builder form definition.
    #[arg(long)]
    pub legacy: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ValuesArgs {
    /// JSON or YAML object with the current form values.
    #[arg(long)]
    pub values: Option<PathBuf>,
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct QueryArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ResolverArgs {
    #[arg(long, default_value_t = 8)]
    pub max_concurrency: usize,
    #[arg(long = "max-concurrency-provider", value_name = "NAME=N")]
    pub max_concurrency_provider: Vec<String>,
    /// Per provider call, in milliseconds.
    #[arg(long, default_value_t = 30000)]
    pub timeout: u64,
    /// Environment variable holding a bearer token for REST providers.
    #[arg(long, value_name = "VAR")]
    pub bearer_env: Option<String>,
    /// Stream resolution events to stdout as JSON lines.
    #[arg(long)]
    pub events: bool,
}
