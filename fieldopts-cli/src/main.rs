use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;
mod utils;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "fieldopts", version, about = "Dynamic form field options toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

/// Logs go to stderr so stdout stays machine-readable. Filter via `FIELDOPTS_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("FIELDOPTS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Validate {
            path,
            schema,
            output,
        } => cmd::validate::validate_cmd(&path, schema, output),
        Command::Describe {
            path,
            schema,
            output,
        } => cmd::describe::describe_cmd(&path, schema, output),
        Command::Graph {
            path,
            schema,
            output,
        } => cmd::graph::graph_cmd(&path, schema, output),
        Command::Cascade {
            path,
            changed,
            schema,
            output,
        } => cmd::graph::cascade_cmd(&path, &changed, schema, output),
        Command::Migrate { path, output } => cmd::migrate::migrate_cmd(&path, output),
        Command::Resolve {
            path,
            providers,
            field,
            changed,
            schema,
            values,
            query,
            resolver,
            output,
        } => {
            cmd::resolve::resolve_cmd(
                &path,
                &providers,
                cmd::resolve::Target::from_args(field, changed),
                schema,
                values,
                query,
                resolver,
                output,
            )
            .await
        }
    }
}
