/**
 * IdeaDrop Server Entry Point
 *
 * Loads configuration, initializes tracing and serves the HTTP API.
 */

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    // RUST_LOG wins; info otherwise
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("[STARTUP] Server initialization started");

    let config = ideadrop::shared::AppConfig::load()?;
    if config.uses_default_secret() {
        tracing::warn!("[STARTUP] JWT_SECRET is not set; using the development secret");
    }

    let addr = config.listen_addr();

    // Create the Axum app
    let app = ideadrop::backend::server::init::create_app(config).await?;

    // Run the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("[STARTUP] Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
