use aqua::server::bootstrap::prepare_database;
use aqua::server::config::ServerConfig;
use aqua::version::{VERSION, version_line};
use axum::{extract::Request, ServiceExt};
use clap::Parser;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Delete the database file and start again from the seed data
    #[arg(long)]
    recreate: bool,
}

fn init_logging(log_dir: &str) {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily(log_dir, "server.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    // Log to stdout: human-readable format
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C.");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM.");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    // --- Server Config Setup ---
    let mut server_config = ServerConfig::load(args.config.as_deref())?;
    if args.recreate {
        server_config.recreate_database = true;
    }

    init_logging(&server_config.log_dir);
    info!(version = %version_line(), "Starting server.");

    // --- Database Setup ---
    let db_pool = match prepare_database(&server_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Failed to initialize the database.");
            return Err(e.into());
        }
    };

    // --- Axum HTTP Server Setup ---
    let app = aqua::web::app(db_pool.clone(), &server_config);

    let listener = tokio::net::TcpListener::bind(server_config.bind_address).await?;
    info!(address = %server_config.bind_address, "HTTP server listening");

    let serve_result = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    db_pool.close().await;
    info!("Database pool closed.");

    serve_result?;
    Ok(())
}
