//! Folio - portfolio backend with a single-administrator content API

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod seed;

use config::{Config, LogFormat, LoggingConfig};
use folio_api::{AppState, cors_layer, create_router};
use folio_auth::JwtManager;
use folio_db::Database;
use folio_mail::{DisabledNotifier, Notifier, SmtpNotifier};

/// Folio - portfolio backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "FOLIO_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "FOLIO_PORT")]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Replace portfolio content with the sample set
    Seed,
    /// Print the effective configuration with secrets masked
    PrintConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let command = args.command.unwrap_or(Command::Serve);
    if let Command::PrintConfig = command {
        print!("{}", config.to_redacted_toml()?);
        return Ok(());
    }

    init_logging(&config.logging);
    config.validate()?;
    debug!("Effective configuration: {:?}", config.redacted());

    let db = open_database(&config.database.path).await?;

    match command {
        Command::Seed => {
            seed::seed(&db).await?;
            Ok(())
        }
        _ => serve(config, db).await,
    }
}

/// Run the HTTP server until a shutdown signal arrives
async fn serve(config: Config, db: Database) -> Result<()> {
    info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    // Create the administrator on first start
    match config.auth.admin_credentials() {
        Some((email, password)) => {
            folio_auth::ensure_admin(&db, email, password)
                .await
                .context("Failed to create administrator")?;
        }
        None => {
            if !db.has_admin().await? {
                anyhow::bail!(
                    "No administrator exists; set auth.admin_email and auth.admin_password"
                );
            }
        }
    }

    let notifier: Arc<dyn Notifier> = if config.mail.enabled {
        Arc::new(SmtpNotifier::new(config.mail.smtp_config())?)
    } else {
        info!("Mail notifications disabled");
        Arc::new(DisabledNotifier)
    };

    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install metrics recorder")?;

    let jwt = Arc::new(JwtManager::new(&config.auth.jwt_secret));
    let state = AppState::new(
        db,
        jwt,
        notifier,
        chrono::Duration::minutes(config.auth.token_ttl_minutes),
    );

    let app = create_router(state, Some(Arc::new(metrics_handle)))
        .layer(cors_layer(&config.cors.allowed_origins))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address {}:{}",
                config.server.bind_address, config.server.port
            )
        })?;

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Open the SQLite database, creating its directory if needed
async fn open_database(path: &str) -> Result<Database> {
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create database directory {:?}", parent))?;
    }

    let url = format!("sqlite:{}?mode=rwc", path);
    Database::new(&url)
        .await
        .with_context(|| format!("Failed to open database {}", path))
}

/// Initialize logging
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Shutdown signal received");
}
