// lib/src/config/config_helpers.rs

use log::{debug, warn};
use models::errors::{PrescriptionError, PrescriptionResult};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::config_defaults::*;
use crate::config::config_structs::{ServiceConfig, StorageEngineType};

/// Loads the service configuration from a YAML file.
pub fn load_service_config_from_yaml(path: &Path) -> PrescriptionResult<ServiceConfig> {
    let config_content = fs::read_to_string(path).map_err(|e| {
        PrescriptionError::ConfigError(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_yaml2::from_str(&config_content).map_err(|e| {
        PrescriptionError::ConfigError(format!(
            "Failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Resolves the configuration from `.env`, the YAML file and the process
/// environment, in increasing order of precedence.
///
/// An explicitly requested file must exist; the default file is optional and
/// its absence falls back to built-in defaults.
pub fn load_service_config(config_file_path: Option<&Path>) -> PrescriptionResult<ServiceConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    let mut config = match config_file_path {
        Some(path) => load_service_config_from_yaml(path)?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                load_service_config_from_yaml(&default_path)?
            } else {
                warn!(
                    "No config file at {}, using defaults",
                    default_path.display()
                );
                ServiceConfig::default()
            }
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Applies `MEDICATIONS_*` overrides found through `lookup`.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> PrescriptionResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(ENV_HOST) {
        config.server.host = host;
    }
    if let Some(port) = lookup(ENV_PORT) {
        config.server.port = port.parse().map_err(|_| {
            PrescriptionError::ConfigError(format!("{} must be a port number, got '{}'", ENV_PORT, port))
        })?;
    }
    if let Some(graphiql) = lookup(ENV_GRAPHIQL) {
        config.server.graphiql = parse_bool(ENV_GRAPHIQL, &graphiql)?;
    }
    if let Some(engine) = lookup(ENV_STORAGE_ENGINE) {
        config.storage.storage_engine_type = engine.parse::<StorageEngineType>()?;
    }
    if let Some(dir) = lookup(ENV_DATA_DIRECTORY) {
        config.storage.data_directory = PathBuf::from(dir);
    }
    if let Some(path) = lookup(ENV_SCHEMA_PATH) {
        config.schema.contract_path = Some(PathBuf::from(path));
    }
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> PrescriptionResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PrescriptionError::ConfigError(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn yaml_fills_missing_sections_with_defaults() {
        let file = NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            "server:\n  host: 0.0.0.0\n  port: 4005\nstorage:\n  storage_engine_type: inmemory\n",
        )
        .unwrap();

        let config = load_service_config_from_yaml(file.path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4005);
        assert!(config.server.graphiql);
        assert_eq!(config.storage.storage_engine_type, StorageEngineType::InMemory);
        assert_eq!(config.storage.data_directory, PathBuf::from(DEFAULT_DATA_DIRECTORY));
        assert_eq!(config.schema.contract_path, None);
    }

    #[test]
    fn unknown_engine_in_yaml_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "storage:\n  storage_engine_type: rocksdb\n").unwrap();
        let err = load_service_config_from_yaml(file.path()).unwrap_err();
        assert!(matches!(err, PrescriptionError::ConfigError(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_service_config_from_yaml(Path::new("/nonexistent/medications.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_PORT, "4100"),
            (ENV_STORAGE_ENGINE, "memory"),
            (ENV_DATA_DIRECTORY, "/srv/rx"),
            (ENV_GRAPHIQL, "off"),
        ]);
        let mut config = ServiceConfig::default();
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.server.port, 4100);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert!(!config.server.graphiql);
        assert_eq!(config.storage.storage_engine_type, StorageEngineType::InMemory);
        assert_eq!(config.storage.data_directory, PathBuf::from("/srv/rx"));
    }

    #[test]
    fn malformed_port_override_is_rejected() {
        let mut config = ServiceConfig::default();
        let err = apply_env_overrides(&mut config, |key| {
            (key == ENV_PORT).then(|| "eighty".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains(ENV_PORT));
    }
}
