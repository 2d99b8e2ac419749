use std::sync::Arc;

use healthcrew_api::agents::HealthCrew;
use healthcrew_api::api::{self, AppState};
use healthcrew_api::config::Settings;
use healthcrew_api::infrastructure::clients::{DuckDuckGoSearch, GeminiClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("healthcrew_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    // External services, configured once and shared by every request
    let llm = GeminiClient::new(
        settings.google_api_key.clone(),
        settings.gemini_model.clone(),
        settings.gemini_temperature,
    )
    .with_base_url(settings.gemini_base_url.clone());
    let search = DuckDuckGoSearch::new()
        .with_base_url(settings.duckduckgo_base_url.clone())
        .with_max_results(settings.duckduckgo_max_results);

    tracing::info!(
        model = %settings.gemini_model,
        temperature = settings.gemini_temperature,
        max_iterations = settings.crew.max_iterations,
        "Health crew configured"
    );

    let crew = HealthCrew::new(Arc::new(llm), Arc::new(search), settings.crew);
    let app = api::router(AppState::new(crew));

    // Start server
    tracing::info!("Server listening on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
