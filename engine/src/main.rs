// Engine main entry point: gRPC service and JSON gateway over one shared state.
use anyhow::Context;
use engine::config::EngineSettings;
use engine::http;
use engine::sentiment::SentimentClient;
use engine::services::analysis_service::AnalysisService;
use engine::services::AnalysisEngineServer;
use engine::state::AppState;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::sync::watch;
use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting analysis engine...");

    let settings = EngineSettings::from_env().context("loading engine settings")?;
    let grpc_addr = settings.grpc_addr()?;
    let http_addr = settings.http_addr()?;

    let sentiment = SentimentClient::new(settings.sentiment_config())?;
    info!(api_url = %sentiment.config().api_url, "Sentiment classifier configured");
    let state = Arc::new(AppState::new(sentiment));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let grpc = {
        let mut rx = shutdown_rx.clone();
        let service = AnalysisService::new(state.clone());
        info!(%grpc_addr, "gRPC server listening");
        Server::builder()
            .add_service(AnalysisEngineServer::new(service))
            .serve_with_shutdown(grpc_addr, async move {
                let _ = rx.changed().await;
            })
    };

    let listener = tokio::net::TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("binding HTTP gateway on {}", http_addr))?;
    info!(%http_addr, "HTTP gateway listening");
    let gateway = {
        let mut rx = shutdown_rx;
        axum::serve(listener, http::router(state)).with_graceful_shutdown(async move {
            let _ = rx.changed().await;
        })
    };

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            return;
        }
        info!("Shutdown signal received, stopping servers");
        let _ = shutdown_tx.send(true);
    });

    let (grpc_result, http_result) = tokio::join!(grpc, gateway.into_future());
    grpc_result.context("gRPC server failed")?;
    http_result.context("HTTP gateway failed")?;

    info!("Analysis engine stopped");
    Ok(())
}
