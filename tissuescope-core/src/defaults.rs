use crate::params::SessionParameters;
use std::path::{Path, PathBuf};

pub fn load_parameters_file(path: &Path) -> Result<SessionParameters, String> {
    let data = std::fs::read(path).map_err(|e| {
        format!(
            "Failed to read parameter defaults file '{}': {e}",
            path.display()
        )
    })?;
    let parameters: SessionParameters = serde_json::from_slice(&data).map_err(|e| {
        format!(
            "Failed to parse parameter defaults file '{}': {e}",
            path.display()
        )
    })?;
    parameters.validate().map_err(|e| {
        format!(
            "Invalid parameter defaults file '{}': {e}",
            path.display()
        )
    })?;
    Ok(parameters)
}

pub fn save_parameters_file(path: &Path, parameters: &SessionParameters) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let data = serde_json::to_vec_pretty(parameters)
        .map_err(|e| format!("Failed to serialize parameter defaults: {e}"))?;
    std::fs::write(path, data).map_err(|e| {
        format!(
            "Failed to write parameter defaults file '{}': {e}",
            path.display()
        )
    })
}

/// Persisted parameter defaults of a data directory.
///
/// The defaults file holds what a new session starts with; the factory file
/// is what "factory reset" restores. Both are created when missing.
pub struct DefaultsManager {
    defaults: SessionParameters,
    factory: SessionParameters,
    defaults_path: PathBuf,
}

impl DefaultsManager {
    pub const DEFAULTS_FILE: &'static str = "session_defaults.json";
    pub const FACTORY_FILE: &'static str = "session_defaults.factory.json";

    pub fn new(data_dir: &Path) -> Self {
        let defaults_path = data_dir.join(Self::DEFAULTS_FILE);
        let factory_path = data_dir.join(Self::FACTORY_FILE);
        let builtin = SessionParameters::default();

        let factory = match load_parameters_file(&factory_path) {
            Ok(parameters) => parameters,
            Err(err) => {
                log::debug!("{err}; writing built-in factory defaults");
                if let Err(err) = save_parameters_file(&factory_path, &builtin) {
                    log::warn!("{err}");
                }
                builtin
            }
        };

        let defaults = match load_parameters_file(&defaults_path) {
            Ok(parameters) => parameters,
            Err(err) => {
                log::debug!("{err}; seeding defaults from factory file");
                if let Err(err) = save_parameters_file(&defaults_path, &factory) {
                    log::warn!("{err}");
                }
                factory
            }
        };

        Self {
            defaults,
            factory,
            defaults_path,
        }
    }

    pub fn defaults(&self) -> &SessionParameters {
        &self.defaults
    }

    pub fn factory(&self) -> &SessionParameters {
        &self.factory
    }

    pub fn defaults_path(&self) -> &Path {
        &self.defaults_path
    }

    pub fn update_defaults(&mut self, parameters: SessionParameters) -> Result<(), String> {
        parameters
            .validate()
            .map_err(|e| format!("Refusing to save defaults: {e}"))?;
        save_parameters_file(&self.defaults_path, &parameters)?;
        self.defaults = parameters;
        log::info!("saved parameter defaults to {}", self.defaults_path.display());
        Ok(())
    }

    pub fn reset_defaults_to_factory(&mut self) -> Result<(), String> {
        let factory = self.factory;
        save_parameters_file(&self.defaults_path, &factory)?;
        self.defaults = factory;
        log::info!("restored factory parameter defaults");
        Ok(())
    }
}
