use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use dbkit::{ConnectOpts, DbHandle};
use employees::{config::EmployeesConfig, Employees};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Staffdir Server - employee directory with a web UI
#[derive(Parser)]
#[command(name = "staffdir-server")]
#[command(about = "Staffdir Server - employee directory with a web UI")]
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
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, &config.home_dir());
    tracing::info!("Staffdir Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config).await,
    }
}

/// Connect the configured database; sqlite paths resolve against `server.home_dir`.
async fn connect_db(db_config: &DatabaseConfig, config: &AppConfig) -> Result<DbHandle> {
    let mut dsn = db_config.url.trim().to_owned();
    if dsn.is_empty() {
        anyhow::bail!("Database URL not configured");
    }
    if DbHandle::detect(&dsn)? == dbkit::DbEngine::Sqlite {
        dsn = dbkit::absolutize_sqlite_dsn(&dsn, &config.home_dir())?;
    }

    let connect_opts = ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms))),
        create_sqlite_dirs: true,
        ..Default::default()
    };

    let db = DbHandle::connect(&dsn, connect_opts)
        .await
        .with_context(|| format!("Failed to connect to database: {}", dbkit::redact_credentials_in_dsn(&dsn)))?;
    tracing::info!("Connected DB backend: {:?} ({})", db.engine(), db.dsn());
    Ok(db)
}

fn ingress_config(config: &AppConfig) -> ApiIngressConfig {
    let mut cfg: ApiIngressConfig = config.module_config("api_ingress");
    if config.server.timeout_sec > 0 {
        cfg.request_timeout_sec = config.server.timeout_sec;
    }
    cfg
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let addr = api_ingress::bind_addr(&config.server.host, config.server.port)?;

    let db = match &config.database {
        Some(db_config) => Some(connect_db(db_config, &config).await?),
        None => {
            tracing::warn!("No database configuration found, running without database");
            None
        }
    };

    let employees_cfg: EmployeesConfig = config.module_config("employees");
    let module = Employees::init(db.as_ref().map(DbHandle::sea), employees_cfg);
    module.migrate().await?;

    let ingress = ApiIngress::new(ingress_config(&config));
    let router = ingress.build_router(module.register_rest(axum::Router::new()))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    ingress
        .serve(listener, router, async {
            if let Err(e) = api_ingress::shutdown::wait_for_shutdown().await {
                tracing::error!("Signal handler failed: {e}");
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    if let Some(db) = db {
        db.close().await;
    }
    tracing::info!("Staffdir Server stopped");
    Ok(())
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    api_ingress::bind_addr(&config.server.host, config.server.port)?;
    if let Some(db) = &config.database {
        DbHandle::detect(db.url.trim())?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
