use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use registry_core::service::CompanyService;
use registry_db::PgCompanyStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use registry_api::auth::credentials::{CredentialChecker, MirrorCredentials};
use registry_api::auth::jwt::TokenAuthority;
use registry_api::auth::password::hash_password;
use registry_api::config::ServerConfig;
use registry_api::router::build_app_router;
use registry_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // `registry-api hash-password <password>` prints an AUTH_USERS hash.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, password] = args.as_slice() {
        if command == "hash-password" {
            let hash = hash_password(password)
                .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
            println!("{hash}");
            return Ok(());
        }
    }

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        auth = %config.auth_subroute,
        company = %config.company_subroute,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = registry_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    registry_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    // --- Token authority ---
    let credentials: Arc<dyn CredentialChecker> = match config.auth.credentials.clone() {
        Some(users) => {
            tracing::info!(users = users.len(), "Using hashed credential store");
            Arc::new(users)
        }
        None => {
            tracing::warn!("AUTH_USERS unset; logins are accepted when password equals user");
            Arc::new(MirrorCredentials)
        }
    };
    let tokens = Arc::new(TokenAuthority::new(&config.auth.key, credentials));

    // --- App state ---
    let state = AppState {
        companies: CompanyService::new(Arc::new(PgCompanyStore::new(pool))),
        tokens,
    };

    let app = build_app_router(state, &config).context("Failed to build router")?;

    // --- Start server ---
    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "registry_api=debug,tower_http=debug".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot be
/// installed, that signal source is ignored and the other one still works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
