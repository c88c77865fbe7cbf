use std::sync::Arc;

use deskbot::api::build_router;
use deskbot::api::middleware::AppState;
use deskbot::config::Config;
use deskbot::database::Database;
use deskbot::services::{ActionExecutor, AutomationService, HttpResponseGenerator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deskbot=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Install drivers for AnyPool
    sqlx::any::install_default_drivers();

    // Initialize database connection
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Run migrations
    db.run_migrations().await?;
    tracing::info!("Database migrations applied");

    // Wire up the automation engine
    let generator = Arc::new(HttpResponseGenerator::new(
        config.ai_gateway_url.clone(),
        config.ai_model.clone(),
    ));
    let action_executor =
        ActionExecutor::new(db.clone(), generator, config.ai_account_id.clone());
    let automation_service = Arc::new(AutomationService::new(db.clone(), action_executor));

    let state = AppState {
        db,
        automation_service,
        ai_account_id: config.ai_account_id.clone(),
    };

    // Build router
    let app = build_router(state);

    // Start server
    let addr = config.server_address();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
