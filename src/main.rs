use anyhow::Result;
use axum::Router;
use std::io::ErrorKind;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod extractors;
mod handlers;
mod models;
mod routes;
mod seed;
mod services;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config + seed flag ---
    let (cfg, seed) = config::AppConfig::from_env_and_args()?;

    tracing::info!(
        "Starting five16-events on {} (admin {}, upload limit {} bytes, writeups {})",
        cfg.addr(),
        cfg.admin_email,
        cfg.max_upload_bytes,
        if cfg.writeup.api_key.is_some() {
            "enabled"
        } else {
            "fallback only"
        }
    );

    // --- Initialize services ---
    let state = state::AppState::new(&cfg);

    if seed {
        let count = state.events.seed(seed::demo_events()).await?;
        tracing::info!("Seeded {} demo events", count);
    }

    // --- Build router ---
    let app: Router = routes::routes::routes(cfg.multipart_body_limit()).with_state(state);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
