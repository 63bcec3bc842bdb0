//! FinSavvy API server binary entrypoint.

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use finsavvy_common::config::AppConfig;
use finsavvy_notifier::{WebhookConfig, WebhookNotifier};

use finsavvy_api::routes::create_router;
use finsavvy_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("finsavvy_api=debug,finsavvy_engine=debug,finsavvy_notifier=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting FinSavvy loan API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Webhook delivery is optional
    let notifier = match WebhookConfig::from_app_config(&config) {
        Some(webhook) => {
            let notifier = WebhookNotifier::new(webhook)?;
            tracing::info!(url = %notifier.url(), "Loan webhook delivery enabled");
            Some(notifier)
        }
        None => {
            tracing::info!("LOAN_WEBHOOK_URL not set; webhook delivery disabled");
            None
        }
    };

    let addr = config.bind_address();

    // Build application state
    let state = AppState::new(config, notifier);

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
