use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a form schema and report every violation.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        schema: SchemaArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the normalized descriptor.
    Describe {
        path: PathBuf,
        #[command(flatten)]
        schema: SchemaArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the dependency graph (topological order, levels, DOT).
    Graph {
        path: PathBuf,
        #[command(flatten)]
        schema: SchemaArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the fields that re-resolve when one field changes, in order.
    Cascade {
        path: PathBuf,
        #[arg(long)]
        changed: String,
        #[command(flatten)]
        schema: SchemaArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Convert a legacy form definition to a descriptor.
    Migrate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Resolve options for one field, or for every field a change affects.
    Resolve {
        path: PathBuf,
        /// Provider definitions (JSON or YAML), keyed by provider name.
        #[arg(long)]
        providers: PathBuf,
        #[arg(long, required_unless_present = "changed", conflicts_with = "changed")]
        field: Option<String>,
        #[arg(long)]
        changed: Option<String>,
        #[command(flatten)]
        schema: SchemaArgs,
        #[command(flatten)]
        values: ValuesArgs,
        #[command(flatten)]
        query: QueryArgs,
        #[command(flatten)]
        resolver: ResolverArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
