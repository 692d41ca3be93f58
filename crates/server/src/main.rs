use projecthost_runtime_config::ProxyConfig;
use projecthost_server::{AppState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment is used as-is.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "projecthost_server=info,tower_http=info".into()),
        )
        .init();

    let config = ProxyConfig::load()?;
    tracing::info!(
        "bucket: {} (region {}), key prefix: {}",
        config.storage.bucket,
        config.storage.region,
        config.storage.key_prefix
    );
    tracing::info!(
        "rewrite strategy: {}, spa fallback: {}",
        config.serving.rewrite,
        config.serving.spa_fallback
    );

    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let addr = config.server.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("server running at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for SIGTERM or SIGINT.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::error!("failed to register shutdown signals: {e}");
                    return std::future::pending::<()>().await;
                }
            };
        tokio::select! {
            _ = sigterm.recv() => tracing::info!("received SIGTERM"),
            _ = sigint.recv() => tracing::info!("received SIGINT"),
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            return std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C");
    }
}
