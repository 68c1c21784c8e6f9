use launchpath::{config::ProxyConfig, routes, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ProxyConfig::from_env()?;
    if config.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; /chat will answer with a configuration error");
    }

    let addr = config.bind_addr;
    let app = routes::create_router().with_state(AppState::shared(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("chat proxy listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
