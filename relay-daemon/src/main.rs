mod settings;

use anyhow::Result;
use core_queue::{RelayConfig, RelayService};
use provider_highrise::HighriseStorage;
use provider_radio::RadioResolver;
use relay_http::ReqwestHttpClient;
use relay_traits::time::SystemClock;
use settings::Settings;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Env files are optional; deployments usually inject variables directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;
    info!(
        api_base = %settings.api_base,
        radio_base = %settings.radio_base,
        poll_secs = settings.poll_interval.as_secs(),
        "Starting queue relay"
    );

    let http = Arc::new(ReqwestHttpClient::new());
    let store = Arc::new(HighriseStorage::with_base_url(
        http.clone(),
        settings.api_key.clone(),
        settings.api_base.clone(),
    ));
    let resolver = Arc::new(RadioResolver::new(
        http,
        settings.radio_base.clone(),
        settings.stream_url.clone(),
    ));

    let config = RelayConfig {
        poll_interval: settings.poll_interval,
        ..RelayConfig::default()
    };
    let mut service = RelayService::new(store, resolver, Arc::new(SystemClock), config);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
            signal_token.cancel();
        }
    });

    service.run(shutdown).await;
    info!("Relay stopped");
    Ok(())
}
