use std::sync::Arc;

use lightplan::generate::{FloorplanGenerator, OpenAiImageClient};
use lightplan::{routes, state};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Initialize image generator (non-fatal: /api/floorplan answers 503 if config missing).
    let generator: Option<Arc<dyn FloorplanGenerator>> = match OpenAiImageClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "image generator initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "image generator not configured; floor plan generation disabled");
            None
        }
    };

    let state = state::AppState::new(generator);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "lightplan listening");
    axum::serve(listener, app).await.expect("server failed");
}
