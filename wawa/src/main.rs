#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use anyhow::Context as _;
use args::{Args, Command};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use wawa_auth::UserStore;
use wawa_config::Config;
use wawa_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(listen) = args.listen {
        config.server.listen_address = Some(listen);
    }

    let _telemetry_guard = wawa_telemetry::init(config.telemetry.as_ref(), &args.log_filter)?;

    match args.command {
        Some(Command::AddUser { email, password, role }) => add_user(&config, &email, &password, &role).await,
        None => run(&args, &config).await,
    }
}

async fn run(args: &Args, config: &Config) -> anyhow::Result<()> {
    tracing::info!(config_path = %args.config.display(), "starting wawa");

    let server = Server::new(config)?;

    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    server.serve(shutdown).await?;

    tracing::info!("wawa stopped");
    Ok(())
}

async fn add_user(config: &Config, email: &str, password: &str, role: &str) -> anyhow::Result<()> {
    let database_path = config.auth.clone().unwrap_or_default().database_path;

    let store = UserStore::open(&database_path)
        .with_context(|| format!("failed to open user store at {}", database_path.display()))?;
    let user = store.create_user(email, password, role).await?;

    tracing::info!(id = user.id, email = %user.email, role = %user.role, "user added");
    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
