//! stressd-web - Stress Detection web service
//!
//! Binds the HTTP surface, loads the pre-fitted scaler and classifier
//! artifacts, and serves the upload/analyze/history pipeline.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use stressd_common::config::ServiceConfig;
use stressd_web::services::classifier::LinearClassifier;
use stressd_web::services::features::FEATURE_VECTOR_LEN;
use stressd_web::services::scaler::StandardScaler;
use stressd_web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting stressd-web (Stress Detection) service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Step 1: Resolve configuration (ENV -> TOML -> defaults)
    let config = ServiceConfig::resolve();

    // Step 2: Create root and audio folders if missing
    config
        .ensure_directories()
        .map_err(|e| anyhow::anyhow!("Failed to initialize root folder: {}", e))?;

    // Step 3: Load artifacts and fail fast on shape mismatches
    let scaler = StandardScaler::load(&config.scaler_path)?;
    let classifier = LinearClassifier::load(&config.model_path)?;
    validate_artifact_shapes(&scaler, &classifier)?;

    // Create application state and router
    let state = AppState::new(&config, scaler, classifier);
    let app = stressd_web::build_router(state);

    // Start server
    let addr = format!("127.0.0.1:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Validate artifact dimensionality against the extractor's output length.
///
/// The feature vector's length and ordering must match what the artifacts
/// were fitted on; the shape part of that contract is checked here so a
/// mismatched artifact pair aborts startup instead of failing per upload.
fn validate_artifact_shapes(
    scaler: &StandardScaler,
    classifier: &LinearClassifier,
) -> Result<()> {
    if scaler.dimension() != FEATURE_VECTOR_LEN {
        anyhow::bail!(
            "Scaler artifact was fitted on {} features but the extractor produces {}",
            scaler.dimension(),
            FEATURE_VECTOR_LEN
        );
    }
    if classifier.input_dimension() != FEATURE_VECTOR_LEN {
        anyhow::bail!(
            "Model artifact expects {} features but the extractor produces {}",
            classifier.input_dimension(),
            FEATURE_VECTOR_LEN
        );
    }
    Ok(())
}
