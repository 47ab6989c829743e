// server/src/cli/handlers.rs

// Handlers for the medications-server subcommands.

use anyhow::{Context, Result};
use log::{error, info, warn};
use std::future::Future;
use std::sync::Arc;

use medications::config::ServiceConfig;
use medications::{
    build_schema, compose_schema, federation_sdl, Database, MedicationsSchema, PrescriptionService,
    SchemaContract, StorageConfig,
};

/// Starts storage, composes the schema and serves until Ctrl-C.
pub async fn handle_serve(config: ServiceConfig) -> Result<()> {
    let database = Arc::new(
        Database::new(&config.storage)
            .await
            .with_context(|| {
                format!(
                    "Failed to start {} storage at {}",
                    config.storage.storage_engine_type,
                    config.storage.data_directory.display()
                )
            })?,
    );
    info!("Storage engine {} started", database.engine_type());

    serve_with_storage(&config, database, shutdown_signal()).await
}

/// Composes and serves over a started database. The storage engine is
/// stopped on every exit path, composition failures included.
async fn serve_with_storage<F>(config: &ServiceConfig, database: Arc<Database>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let served = match compose(config, PrescriptionService::new(Arc::clone(&database))).await {
        Ok(schema) => rest_api::start_server(&config.server, schema, shutdown).await,
        Err(e) => Err(e),
    };

    if let Err(e) = database.stop().await {
        error!("Failed to stop storage engine cleanly: {}", e);
    }
    served
}

/// Federation SDL of the schema, built over throwaway in-memory storage.
pub async fn handle_print_schema() -> Result<String> {
    let schema = in_memory_schema().await?;
    Ok(federation_sdl(&schema))
}

/// Verifies the configured contract against the executable schema.
pub async fn handle_check_schema(config: &ServiceConfig) -> Result<()> {
    let schema = in_memory_schema().await?;
    let contract = load_contract(config)?;
    contract
        .verify(&schema)
        .await
        .context("Schema contract check failed")?;
    info!("Schema matches its contract");
    Ok(())
}

async fn compose(config: &ServiceConfig, service: PrescriptionService) -> Result<MedicationsSchema> {
    let contract = load_contract(config)?;
    compose_schema(service, &contract)
        .await
        .context("Failed to compose the medications schema")
}

fn load_contract(config: &ServiceConfig) -> Result<SchemaContract> {
    SchemaContract::load(config.schema.contract_path.as_deref())
        .context("Failed to load the schema contract")
}

async fn in_memory_schema() -> Result<MedicationsSchema> {
    let database = Database::new(&StorageConfig::in_memory()).await?;
    Ok(build_schema(PrescriptionService::new(Arc::new(database))))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn print_schema_emits_federation_sdl() {
        let sdl = handle_print_schema().await.unwrap();
        assert!(sdl.contains("type Prescription"));
        assert!(sdl.contains("@key"));
    }

    #[tokio::test]
    async fn check_schema_passes_with_embedded_contract() {
        handle_check_schema(&ServiceConfig::default()).await.unwrap();
    }

    #[tokio::test]
    async fn check_schema_fails_on_drifted_contract() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "type Prescription {{ id: ID! lotNumber: String }}").unwrap();

        let mut config = ServiceConfig::default();
        config.schema.contract_path = Some(file.path().to_path_buf());
        let err = handle_check_schema(&config).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Prescription.lotNumber"));
    }

    #[tokio::test]
    async fn storage_is_stopped_when_composition_fails() {
        let database = Arc::new(Database::new(&StorageConfig::in_memory()).await.unwrap());
        let mut config = ServiceConfig::default();
        config.schema.contract_path = Some(PathBuf::from("/nonexistent/contract.graphql"));

        let err = serve_with_storage(&config, Arc::clone(&database), std::future::pending())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load the schema contract"));
        assert!(!database.is_running());
    }

    #[tokio::test]
    async fn missing_contract_file_is_reported() {
        let mut config = ServiceConfig::default();
        config.schema.contract_path = Some(PathBuf::from("/nonexistent/contract.graphql"));
        let err = handle_check_schema(&config).await.unwrap_err();
        assert!(err.to_string().contains("Failed to load the schema contract"));
    }
}
