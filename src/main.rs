use std::fs;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use stipend_engine::api::{AppState, FinancialsRequest, create_router};
use stipend_engine::calculation::derive_financials;
use stipend_engine::config::ConfigLoader;
use stipend_engine::error::EngineError;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Failures surfaced by the command line entry point.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("invalid log level/filter '{value}'")]
    LogFilter {
        value: String,
        #[source]
        source: ParseError,
    },

    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid listen address: {0}")]
    Address(#[from] AddrParseError),

    #[error("failed to read '{path}': {source}")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "stipend-engine",
    about = "Split travel pay offers into tax-free stipend and taxable wages",
    version
)]
struct Cli {
    /// Directory holding policy.yaml and boundary.yaml
    #[arg(long, global = true, default_value = "./config/default")]
    config: PathBuf,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Derive financials for one request file and print the result as JSON
    Derive(DeriveArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Args, Debug)]
struct DeriveArgs {
    /// Path to a request body as accepted by POST /v1/financials
    #[arg(long)]
    input: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) -> Result<(), CliError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|source| CliError::LogFilter {
            value: log_level.to_string(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(CliError::Subscriber)
}

async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = ConfigLoader::load(&cli.config)?;
    info!(config = %cli.config.display(), "configuration loaded");

    match cli.command.unwrap_or_else(|| Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => run_server(config, args).await,
        Command::Derive(args) => run_derive(&config, args),
    }
}

async fn run_server(config: ConfigLoader, args: ServeArgs) -> Result<(), CliError> {
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "stipend engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_derive(config: &ConfigLoader, args: DeriveArgs) -> Result<(), CliError> {
    let body = fs::read_to_string(&args.input).map_err(|source| CliError::ReadInput {
        path: args.input.display().to_string(),
        source,
    })?;
    let request: FinancialsRequest = serde_json::from_str(&body)?;
    let resolved = request.resolve(
        config.boundary(),
        &config.policy().contract,
        Utc::now().date_naive(),
    )?;

    let financials = derive_financials(&resolved.input, config.policy());
    println!("{}", serde_json::to_string_pretty(&financials)?);
    Ok(())
}
