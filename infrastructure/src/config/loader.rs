//! Settings loader with multi-source merging

use super::settings::{EngineSettings, SettingsError};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_FILE: &str = "swarm.toml";
const ENV_PREFIX: &str = "SWARM_";

/// Loader that handles settings file discovery and merging
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `SWARM_WATCH__IDLE_SLEEP_SEC=10` etc.
    /// 2. Explicit settings path (if provided; must exist)
    /// 3. Project root: `./swarm.toml`
    /// 4. Global: `~/.config/swarm/settings.toml`
    /// 5. Default values
    pub fn load(settings_path: Option<&Path>) -> Result<EngineSettings, SettingsError> {
        if let Some(path) = settings_path
            && !path.exists()
        {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }

        let settings: EngineSettings = Self::figment(settings_path)
            .extract()
            .map_err(Box::new)?;
        settings.watch.to_params()?;
        Ok(settings)
    }

    /// The merged provider stack, before extraction.
    pub fn figment(settings_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(EngineSettings::default()));

        if let Some(global_path) = Self::global_settings_path()
            && global_path.exists()
        {
            debug!("Using global settings {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project = PathBuf::from(PROJECT_FILE);
        if project.exists() {
            debug!("Using project settings {}", project.display());
            figment = figment.merge(Toml::file(&project));
        }

        if let Some(path) = settings_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Global settings file: `$XDG_CONFIG_HOME/swarm/settings.toml`, falling
    /// back to the platform config directory.
    pub fn global_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("swarm").join("settings.toml"))
    }
}
