use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use fieldopts_core::{AuthContext, FieldValues, LoadOptions, Pagination};
use fieldopts_exec::resolver::{EventSink, StdoutEventSink, TracingEventSink};
use fieldopts_exec::{
    ApiCredentials, FieldChange, FieldResolution, FieldState, ReqwestHttpClient, ResolveRequest,
    Resolver, ResolverConfig,
};

use crate::cmd::providers::load_registry;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::{load_schema, parse_json_or_yaml, read_file, LoadError};
use crate::{OutputArgs, QueryArgs, ResolverArgs, SchemaArgs, ValuesArgs};

pub enum Target {
    Field(String),
    Changed(String),
}

impl Target {
    /// clap guarantees exactly one of the two is present.
    pub fn from_args(field: Option<String>, changed: Option<String>) -> Self {
        match (field, changed) {
            (Some(f), _) => Self::Field(f),
            (None, Some(c)) => Self::Changed(c),
            (None, None) => Self::Field(String::new()),
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn resolve_cmd(
    path: &Path,
    providers: &Path,
    target: Target,
    schema: SchemaArgs,
    values: ValuesArgs,
    query: QueryArgs,
    resolver_args: ResolverArgs,
    output: OutputArgs,
) -> i32 {
    let registry = match load_registry(providers, Arc::new(ReqwestHttpClient::default())) {
        Ok(r) => r,
        Err(e) => return e.report(&output),
    };
    let schema = match load_schema(path, schema.legacy, &registry, LoadOptions::default()) {
        Ok(s) => s,
        Err(e) => return e.report(&output),
    };
    let values = match load_values(&values) {
        Ok(v) => v,
        Err(e) => return e.report(&output),
    };
    let config = match build_resolver_config(&resolver_args) {
        Ok(c) => c,
        Err(e) => return e.report(&output),
    };
    let auth = match resolver_args.bearer_env.as_deref() {
        None => AuthContext::none(),
        Some(var) => match std::env::var(var) {
            Ok(token) => AuthContext::new(ApiCredentials::bearer(token)),
            Err(_) => {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("environment variable {var} is not set"),
                );
                return exit_codes::RUNTIME_ERROR;
            }
        },
    };

    let sink: Arc<dyn EventSink> = if resolver_args.events {
        Arc::new(StdoutEventSink)
    } else {
        Arc::new(TracingEventSink)
    };
    let resolver = Resolver::new(Arc::new(schema), config)
        .with_event_sink(sink);

    let resolutions = match target {
        Target::Field(field_id) => {
            let mut request = ResolveRequest::new(field_id, values).auth(auth);
            if query.page.is_some() || query.page_size.is_some() {
                request = request.page(Pagination::new(
                    query.page.unwrap_or(1),
                    query.page_size.unwrap_or(u32::MAX),
                ));
            }
            if let Some(term) = query.search {
                request = request.search(term);
            }
            resolver.resolve_field(request).await.map(|r| vec![r])
        }
        Target::Changed(field_id) => resolver
            .on_field_changed(FieldChange::new(field_id, values, auth))
            .await
            .map(|report| report.resolutions),
    };

    let resolutions = match resolutions {
        Ok(r) => r,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::VALIDATION_FAILED;
        }
    };

    if output.format == OutputFormat::Text && !output.quiet {
        for r in &resolutions {
            println!("{}", describe(r));
        }
    } else {
        print_result(output.format, output.quiet, &resolutions);
    }

    if resolutions.iter().all(|r| r.state.is_resolved()) {
        exit_codes::SUCCESS
    } else {
        exit_codes::RESOLUTION_FAILED
    }
}

fn describe(r: &FieldResolution) -> String {
    match &r.state {
        FieldState::Resolved { response } => {
            let mut line = format!(
                "{}: {} of {} options",
                r.field_id,
                response.items.len(),
                response.total
            );
            if response.has_more == Some(true) {
                line.push_str(" (more available)");
            }
            for item in &response.items {
                line.push_str(&format!("\n  {} = {}", item.id, item.label));
            }
            line
        }
        FieldState::Failed { error, .. } => format!("{}: failed: {error}", r.field_id),
        FieldState::Blocked { by } => format!("{}: blocked by {by}", r.field_id),
        FieldState::Unresolved => format!("{}: unresolved", r.field_id),
    }
}

fn load_values(args: &ValuesArgs) -> Result<FieldValues, LoadError> {
    let mut values = match &args.values {
        Some(path) => parse_json_or_yaml(&read_file(path)?, "values file")?,
        None => FieldValues::new(),
    };
    for s in &args.set_values {
        match s.split_once('=') {
            Some((k, v)) => {
                values.insert(k.to_string(), serde_json::Value::String(v.to_string()));
            }
            None => {
                return Err(LoadError::Parse(format!(
                    "--set expects FIELD=VALUE, got `{s}`"
                )))
            }
        }
    }
    Ok(values)
}

fn build_resolver_config(args: &ResolverArgs) -> Result<ResolverConfig, LoadError> {
    let mut per_provider = BTreeMap::new();
    for s in &args.max_concurrency_provider {
        let parsed = s
            .split_once('=')
            .filter(|(name, _)| !name.trim().is_empty())
            .and_then(|(name, n)| n.trim().parse::<usize>().ok().map(|n| (name.trim(), n)));
        match parsed {
            Some((name, n)) => {
                per_provider.insert(name.to_string(), n);
            }
            None => {
                return Err(LoadError::Parse(format!(
                    "--max-concurrency-provider expects NAME=N, got `{s}`"
                )))
            }
        }
    }

    Ok(ResolverConfig {
        global_concurrency: args.max_concurrency,
        per_provider_concurrency: per_provider,
        provider_timeout: Some(Duration::from_millis(args.timeout)),
        ..Default::default()
    })
}
