//! pql — build PQL statements from the command line
//!
//! # Usage
//!
//! ```bash
//! # Render a statement as wire JSON
//! pql build --select id,name --from Line_Item --where "orderId = :id" --bind id=42
//!
//! # Human-readable output
//! pql build --where "status = :s" --bind s=DELIVERING --format text
//!
//! # Coerce a single value
//! pql coerce '{"year": 2024, "month": 3, "day": 1}'
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use pql::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pql")]
#[command(version)]
#[command(about = "Build PQL statements with typed bound values", long_about = None)]
#[command(after_help = "EXAMPLES:
    pql build --select id,name --from Line_Item --limit 10
    pql build --where 'id IN (:ids)' --bind 'ids=[1,2,3]'
    pql coerce '\"hello\"'")]
struct Cli {
    /// Config file (defaults to ./pql.toml, then the user config dir)
    #[arg(long, global = true, env = "PQL_CONFIG")]
    config: Option<PathBuf>,

    /// Publisher API version used for the value namespace
    #[arg(long, global = true, env = "PQL_API_VERSION")]
    api_version: Option<String>,

    /// Explicit value namespace (overrides --api-version)
    #[arg(long, global = true)]
    namespace: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a statement from clauses and bindings
    Build(BuildArgs),
    /// Coerce a single JSON value into its typed form
    Coerce {
        /// JSON value; bare words are taken as text
        value: String,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Columns to select
    #[arg(long, value_delimiter = ',')]
    select: Option<Vec<String>>,

    /// Table to select from
    #[arg(long)]
    from: Option<String>,

    /// Filter clause, passed through as-is
    #[arg(long = "where")]
    where_: Option<String>,

    /// Fields to order by
    #[arg(long, value_delimiter = ',')]
    order_by: Option<Vec<String>>,

    /// Sort descending
    #[arg(long, requires = "order_by")]
    desc: bool,

    /// Row count
    #[arg(long)]
    limit: Option<u64>,

    /// Row offset; requires --limit
    #[arg(long, requires = "limit")]
    offset: Option<u64>,

    /// Bindings as key=value, value parsed as JSON
    #[arg(short, long)]
    bind: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "pql=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let coercer = resolve_config(cli)?.coercer();
    tracing::debug!("Using namespace {}", coercer.namespace());

    match &cli.command {
        Commands::Build(args) => {
            let statement = build_statement(args, coercer)?;
            print_statement(&statement, cli.format)
        }
        Commands::Coerce { value } => {
            let typed = coercer.coerce(parse_value(value))?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&typed)?),
                OutputFormat::Text => println!("{}", describe(&typed)),
            }
            Ok(())
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<PqlConfig> {
    let mut config = match &cli.config {
        Some(path) => PqlConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PqlConfig::discover()?,
    };
    if let Some(version) = &cli.api_version {
        config.api_version = version.clone();
    }
    if let Some(namespace) = &cli.namespace {
        config.namespace = Some(namespace.clone());
    }
    Ok(config)
}

fn build_statement(args: &BuildArgs, coercer: Coercer) -> Result<Statement> {
    let mut builder = StatementBuilder::with_coercer(coercer);

    if let Some(columns) = &args.select {
        builder = builder.select(columns.iter().cloned());
    }
    if let Some(table) = &args.from {
        builder = builder.from(table.as_str());
    }
    if let Some(clause) = &args.where_ {
        builder = builder.where_(clause.as_str());
    }
    if let Some(fields) = &args.order_by {
        builder = builder.order_by(fields.clone(), !args.desc);
    }
    builder = match (args.offset, args.limit) {
        (Some(offset), Some(count)) => builder.limit_offset(offset, count),
        (None, Some(count)) => builder.limit(count),
        _ => builder,
    };

    for binding in &args.bind {
        let (key, raw) = binding
            .split_once('=')
            .with_context(|| format!("Binding '{}' is not in key=value form", binding))?;
        builder = builder
            .bind(key, parse_value(raw))
            .with_context(|| format!("Cannot bind '{}'", key))?;
    }

    Ok(builder.to_statement()?)
}

/// Parse a CLI value as JSON, falling back to plain text.
fn parse_value(raw: &str) -> NativeValue {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => json.into(),
        Err(_) => NativeValue::Text(raw.to_string()),
    }
}

fn print_statement(statement: &Statement, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", statement.to_json_pretty()?),
        OutputFormat::Text => {
            println!("{}", "Query:".green().bold());
            if statement.query.is_empty() {
                println!("  {}", "(empty)".dimmed());
            } else {
                println!("  {}", statement.query.white());
            }

            if !statement.values.is_empty() {
                println!();
                println!("{}", "Values:".cyan());
                for param in &statement.values {
                    println!("  :{} = {}", param.key.yellow(), describe(&param.value));
                }
            }
        }
    }
    Ok(())
}

fn describe(value: &TypedValue) -> String {
    let payload = match &value.payload {
        Payload::Text(s) => format!("'{}'", s),
        Payload::Boolean(b) => b.to_string(),
        Payload::Number(n) => n.to_string(),
        Payload::Date(d) => format!("{}-{}-{}", d.year, d.month, d.day),
        Payload::DateTime(dt) => format!(
            "{}-{}-{} {:02}:{:02}:{:02} {}",
            dt.date.year, dt.date.month, dt.date.day, dt.hour, dt.minute, dt.second, dt.time_zone_id
        ),
        Payload::Set(items) => {
            let inner: Vec<String> = items.iter().map(describe).collect();
            format!("[{}]", inner.join(", "))
        }
    };
    format!("{} {}", payload, format!("({})", value.type_tag()).dimmed())
}
