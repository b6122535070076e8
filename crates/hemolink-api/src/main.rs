//! Hemolink API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use hemolink_api::error::AppError;
use hemolink_api::state::AppState;
use hemolink_core::clock::SystemClock;
use hemolink_dispatch::audit::AuditLogHandler;
use hemolink_dispatch::publisher::InProcessPublisher;
use hemolink_store::pg_appointments::PgAppointmentRepository;
use hemolink_store::pg_donors::PgDonorRepository;
use hemolink_store::pg_matches::PgMatchRepository;
use hemolink_store::pg_posts::PgPostRepository;
use hemolink_store::pg_requests::PgRequestRepository;
use hemolink_store::schema::ensure_schema;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Hemolink API server");

    // Read configuration from environment.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::Config("DATABASE_URL environment variable must be set".into()))?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

    // Create database connection pool and bootstrap the schema.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    ensure_schema(&pool)
        .await
        .map_err(|e| AppError::Config(e.to_string()))?;

    // Build application state.
    let publisher = InProcessPublisher::new().with_handler(Arc::new(AuditLogHandler));
    let app_state = AppState {
        clock: Arc::new(SystemClock),
        publisher: Arc::new(publisher),
        donors: Arc::new(PgDonorRepository::new(pool.clone())),
        requests: Arc::new(PgRequestRepository::new(pool.clone())),
        matches: Arc::new(PgMatchRepository::new(pool.clone())),
        appointments: Arc::new(PgAppointmentRepository::new(pool.clone())),
        posts: Arc::new(PgPostRepository::new(pool)),
    };

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = hemolink_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
