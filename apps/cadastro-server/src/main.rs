use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use db::{ConnectOpts, DbEngine, DbHandle};
use runtime::{AppConfig, CliArgs};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const MEMORY_DSN: &str = "sqlite::memory:";

/// Cadastro de Clientes - customer records over a server-rendered web form
#[derive(Parser)]
#[command(name = "cadastro-server")]
#[command(about = "Cadastro de Clientes - customer records over a server-rendered web form")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_layered(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if args.print_config {
        println!("{}", config.to_redacted_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config),
    }
}

/// DSN to open: in-memory for `--mock`, relative SQLite paths under home_dir
/// (`sqlite:///clientes.db` is relative, `sqlite:////abs.db` absolute).
fn resolve_dsn(config: &AppConfig, mock: bool) -> Result<String> {
    if mock {
        return Ok(MEMORY_DSN.to_string());
    }

    let dsn = db::normalize_scheme(&config.database.url);
    if dsn.is_empty() {
        anyhow::bail!("Database URL not configured");
    }

    if DbHandle::detect(&dsn)? == DbEngine::Sqlite {
        let base_dir = Path::new(&config.server.home_dir);
        return db::absolutize_sqlite_dsn(&dsn, base_dir, true)
            .context("failed to resolve SQLite path");
    }
    Ok(dsn)
}

fn connect_opts(config: &AppConfig) -> ConnectOpts {
    ConnectOpts {
        max_conns: config.database.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: config
            .database
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(ms as u64)),
        create_sqlite_dirs: true,
        ..Default::default()
    }
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Cadastro server starting");

    if config.server.uses_dev_secret() {
        tracing::warn!("SECRET_KEY is not set; using the development default");
    }

    let dsn = resolve_dsn(&config, args.mock)?;
    tracing::info!(
        "Connecting to database: {}",
        db::redact_credentials_in_dsn(&dsn)
    );
    let db = DbHandle::connect(&dsn, connect_opts(&config))
        .await
        .context("failed to open database")?;
    tracing::info!("Connected DB backend: {:?}", db.engine());

    let conn = db.sea();
    clientes::ensure_schema(&conn).await?;

    let service = Arc::new(clientes::Service::new(Arc::new(
        clientes::SeaOrmClientesRepository::new(conn),
    )));

    let ingress = api_ingress::ApiIngressConfig {
        bind_addr: format!("{}:{}", config.server.host, config.server.port),
        timeout_sec: config.server.timeout_sec,
        body_limit_bytes: config.server.body_limit_bytes,
    };
    let router = api_ingress::build_router(clientes::router(service), &ingress);

    let served = api_ingress::serve(router, &ingress, async {
        if let Err(e) = runtime::shutdown::wait_for_shutdown().await {
            tracing::error!("shutdown signal handler failed: {e:#}");
        }
    })
    .await;

    db.close().await;
    tracing::info!("Database pool closed");
    served
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    resolve_dsn(&config, false)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_redacted_yaml()?);
    Ok(())
}
