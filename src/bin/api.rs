use anyhow::Result;
use marquee::{
    app::app,
    app_state::AppState,
    config::{Config, LogFormat},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match config.log_format() {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }

    let app = app(AppState::new(&config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(
        addr = %config.bind_addr(),
        upstream = %config.upstream_base_url(),
        "Listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
