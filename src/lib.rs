pub mod api; // HTML shell + JSON API
pub mod classifier; // Model Store + aprender wrappers
pub mod config;
pub mod core_state; // Shared read-only application context
pub mod forms; // Field schemas, text → feature vector
pub mod medicines; // Medicine Lookup
pub mod models;
pub mod shell; // Form/Navigation Shell
pub mod symptoms; // Symptom Encoder + inline classifier
pub mod training; // Fitting the target models from labelled tables
pub mod vocabulary; // Symptom Vocabulary + Disease Catalog

#[cfg(test)]
pub(crate) mod test_support;

use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::classifier::ArtifactManifest;
use crate::config::AppConfig;
use crate::core_state::{CoreState, StartupError};
use crate::models::DiagnosticTarget;
use crate::training::TrainingError;

/// Install the global subscriber. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Load configuration, build the application context, and serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::load()?;
    tracing::info!(
        bind = %config.bind_addr,
        models_dir = %config.models_dir.display(),
        dataset_dir = %config.dataset_dir.display(),
        fit_policy = config.fit_policy.as_str(),
        "Configuration loaded"
    );

    let bind_addr = config.bind_addr;
    let core = Arc::new(CoreState::build(config)?);

    let server = api::start_server_on(core, bind_addr)
        .await
        .map_err(StartupError::Server)?;
    tracing::info!(
        session_id = %server.session.session_id,
        "Serving on http://{}",
        server.session.server_addr
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
    }
    server.stop().await;
    Ok(())
}

/// Fit `target`'s model on the labelled table at `data` and write it to
/// `models_dir`, replacing any artifact already there.
pub fn train(
    target: DiagnosticTarget,
    data: &Path,
    models_dir: &Path,
) -> Result<ArtifactManifest, TrainingError> {
    tracing::info!(
        "{} v{} training {}",
        config::APP_NAME,
        config::APP_VERSION,
        target
    );
    let manifest = training::train_from_csv(target, data, models_dir)?;
    tracing::info!(
        model = target.as_str(),
        rows = manifest.provenance.rows,
        accuracy = manifest.provenance.training_accuracy,
        digest = %manifest.model_digest,
        "Training complete"
    );
    Ok(manifest)
}
