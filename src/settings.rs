use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    overpass::{DEFAULT_OVERPASS_URL, DEFAULT_SERVER_TIMEOUT},
};

pub const CONFIG_ENV_VAR: &str = "INDUSTRIAL_FILTER_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Endpoints, timeouts and politeness knobs for the remote services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub overpass_url: String,
    /// `[timeout:..]` sent inside the query, in seconds.
    pub overpass_server_timeout: u32,
    /// Client side timeout for the data query. None waits forever.
    pub overpass_timeout_secs: Option<u64>,
    /// How many times a 429 from Overpass is retried.
    pub overpass_retries: u32,
    pub nominatim_url: String,
    pub user_agent: String,
    pub geocode_timeout_secs: u64,
    pub geocode_min_interval_ms: u64,
    pub josm_url: String,
    pub josm_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            overpass_server_timeout: DEFAULT_SERVER_TIMEOUT,
            overpass_timeout_secs: None,
            overpass_retries: 0,
            nominatim_url: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "OSM-Industrial-Filter/1.0".to_string(),
            geocode_timeout_secs: 30,
            geocode_min_interval_ms: 1000,
            josm_url: "http://127.0.0.1:8111".to_string(),
            josm_timeout_secs: 10,
        }
    }
}

impl Settings {
    pub fn geocode_timeout(&self) -> Duration {
        Duration::from_secs(self.geocode_timeout_secs)
    }

    pub fn geocode_min_interval(&self) -> Duration {
        Duration::from_millis(self.geocode_min_interval_ms)
    }

    pub fn josm_timeout(&self) -> Duration {
        Duration::from_secs(self.josm_timeout_secs)
    }

    pub fn overpass_timeout(&self) -> Option<Duration> {
        self.overpass_timeout_secs.map(Duration::from_secs)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&contents).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Loads settings from the first source that exists:
    /// 1. `explicit` (from the command line)
    /// 2. the file named by `INDUSTRIAL_FILTER_CONFIG`
    /// 3. `config.toml` in the user's config directory
    ///
    /// Falls back to defaults when none is present. A file that was asked for
    /// explicitly must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("Loading settings from {}", path.display());
            return Self::from_file(path);
        }
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            info!("Loading settings from {} ({})", path.display(), CONFIG_ENV_VAR);
            return Self::from_file(&path);
        }
        if let Some(path) = default_config_path().filter(|p| p.exists()) {
            info!("Loading settings from {}", path.display());
            return Self::from_file(&path);
        }
        debug!("No settings file found, using defaults");
        Ok(Self::default())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "OpenStreetMap", "industrial-filter")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
