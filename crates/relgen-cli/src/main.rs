mod config_file;
mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::info;

use relgen_core::{Error as CoreError, ResolvedConfig, SUPPORTED_CLIENTS};
use relgen_emit::{emit_schema, EmitError, RecordingRenderer};
use relgen_extract::extract_schema;
use relgen_introspect::{Adapter, IntrospectOptions, PostgresAdapter, RawSchema};

use config_file::{load_config, ConfigFileError, FileConfig};

#[derive(Debug, Error)]
enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("config file error: {0}")]
    ConfigFile(#[from] ConfigFileError),
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unsupported client: {0}")]
    UnsupportedClient(String),
}

#[derive(Parser, Debug)]
#[command(name = "relgen", version, about = "Relational schema code generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Introspect the catalog and write the full declaration snapshot.
    Extract(ExtractArgs),
    /// Introspect, compile, and print the emission file plan.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct SharedArgs {
    /// Configuration file.
    #[arg(long, short = 'c', default_value = "relgen.toml")]
    config: PathBuf,
    /// Connection string; overrides the config file and DATABASE_URL.
    #[arg(long, value_name = "CONNECTION_STRING")]
    conn: Option<String>,
    /// Schema name(s) to include; overrides the config file.
    #[arg(long, value_name = "SCHEMA")]
    schema: Vec<String>,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    #[command(flatten)]
    shared: SharedArgs,
    /// Output path for the declaration snapshot.
    #[arg(long, default_value = "relgen.schema.json")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    shared: SharedArgs,
    /// Root directory output paths are computed against.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Extract(args) => run_extract(args).await,
        Command::Plan(args) => run_plan(args).await,
    }
}

async fn run_extract(args: ExtractArgs) -> Result<(), CliError> {
    let (config, raw) = introspect_catalog(&args.shared).await?;
    let schema = extract_schema(&raw, &config);

    std::fs::write(&args.out, serde_json::to_vec_pretty(&schema)?)?;
    info!(out = %args.out.display(), "declaration snapshot written");

    Ok(())
}

async fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let (config, raw) = introspect_catalog(&args.shared).await?;
    let schema = extract_schema(&raw, &config);

    let renderer = RecordingRenderer::new();
    let report = emit_schema(&args.root, &config, &schema, &renderer).await?;

    for call in renderer.calls() {
        let policy = if call.overwrite { "overwrite" } else { "keep" };
        println!("{:<14} {:<9} {}", call.template.name(), policy, call.path.display());
    }
    info!(
        files = report.files,
        snapshots = report.snapshots,
        "emission plan complete"
    );

    Ok(())
}

/// Shared front half of every command: load configuration, gate on the
/// client, introspect the catalog, and release the pool on both paths.
async fn introspect_catalog(
    args: &SharedArgs,
) -> Result<(ResolvedConfig, Vec<RawSchema>), CliError> {
    let file = load_config(&args.config)?;
    let url = connection_url(args, &file)?;

    // fail fast on unsupported clients, before any catalog call
    let client = file.connection.client.as_deref().unwrap_or("pg");
    if !SUPPORTED_CLIENTS.contains(&client) {
        return Err(CliError::UnsupportedClient(format!(
            "{client} (supported: {})",
            SUPPORTED_CLIENTS.join(", ")
        )));
    }

    let mut config = file.codegen.resolve()?;
    if !args.schema.is_empty() {
        config.schemas = args.schema.clone();
    }

    let opts = IntrospectOptions {
        schemas: if config.schemas.is_empty() {
            None
        } else {
            Some(config.schemas.clone())
        },
        ..IntrospectOptions::default()
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;
    let adapter = PostgresAdapter::new(pool.clone());

    info!(engine = adapter.engine(), "introspecting catalog");
    let result = adapter.introspect(&opts).await;
    pool.close().await;

    let raw = result?;
    Ok((config, raw))
}

fn connection_url(args: &SharedArgs, file: &FileConfig) -> Result<String, CliError> {
    if let Some(conn) = &args.conn {
        return Ok(conn.clone());
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        if !url.is_empty() {
            return Ok(url);
        }
    }
    if let Some(url) = &file.connection.url {
        return Ok(url.clone());
    }
    Err(CliError::InvalidConfig(
        "no connection string: pass --conn, set DATABASE_URL, or set connection.url".to_string(),
    ))
}
