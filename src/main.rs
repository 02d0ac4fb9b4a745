use goalcast::config::Config;
use goalcast::services::{
    open_store, Clock, SeededVariance, SystemClock, ThreadRngVariance, VarianceSource,
};
use goalcast::sources::FootballDataClient;
use goalcast::{app, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "goalcast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting Goalcast server on {}:{}", config.host, config.port);
    info!("Target competitions: {}", config.competitions.join(","));

    if config.football_data_api_key.is_none() {
        warn!("FOOTBALL_DATA_API_KEY not set; live data endpoints will fail");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Prediction cache: Redis when configured, in-process otherwise
    let store = open_store(config.redis_url.as_deref(), clock.clone()).await;

    let variance: Arc<dyn VarianceSource> = match config.prediction.variance_seed {
        Some(seed) => {
            info!("Using seeded prediction variance ({})", seed);
            Arc::new(SeededVariance::new(seed))
        }
        None => Arc::new(ThreadRngVariance),
    };

    let source = Arc::new(FootballDataClient::from_config(&config));

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, source, store, variance, clock);
    let app = app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Goalcast server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
