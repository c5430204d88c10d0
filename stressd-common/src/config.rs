//! Configuration loading and root folder resolution
//!
//! Resolution priority for the root folder:
//! 1. Environment variable (`STRESSD_ROOT_FOLDER`)
//! 2. TOML config file
//! 3. OS-dependent compiled default (fallback)
//!
//! All other settings come from the TOML file when present, with compiled
//! defaults otherwise.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Maximum accepted upload size in bytes
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 4_000_000;

/// Default listen port for the web module
pub const DEFAULT_PORT: u16 = 5780;

/// TOML-backed configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root folder for service data (audio storage, artifacts)
    pub root_folder: Option<String>,
    /// Listen port for the HTTP server
    pub listen_port: Option<u16>,
    /// Path to the pre-fitted scaler artifact
    pub scaler_path: Option<String>,
    /// Path to the pre-fitted classifier artifact
    pub model_path: Option<String>,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: Option<u64>,
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Root folder for service data
    pub root_folder: PathBuf,
    /// Listen port for the HTTP server
    pub listen_port: u16,
    /// Directory uploaded audio files are written to
    pub audio_folder: PathBuf,
    /// Path to the pre-fitted scaler artifact
    pub scaler_path: PathBuf,
    /// Path to the pre-fitted classifier artifact
    pub model_path: PathBuf,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: u64,
}

impl ServiceConfig {
    /// Resolve configuration from environment, TOML file, and defaults
    pub fn resolve() -> Self {
        let toml_config = load_toml_config();

        let mut root_sources = Vec::new();
        let env_root = std::env::var("STRESSD_ROOT_FOLDER").ok();
        if env_root.is_some() {
            root_sources.push("environment");
        }
        if toml_config.root_folder.is_some() {
            root_sources.push("TOML");
        }
        if root_sources.len() > 1 {
            warn!(
                "Root folder set in multiple sources: {}. Using environment (highest priority).",
                root_sources.join(", ")
            );
        }

        let root_folder = env_root
            .map(PathBuf::from)
            .or_else(|| toml_config.root_folder.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_root_folder);

        Self::from_parts(root_folder, &toml_config)
    }

    /// Build a configuration rooted at an explicit folder (used by tests)
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self::from_parts(root.as_ref().to_path_buf(), &TomlConfig::default())
    }

    fn from_parts(root_folder: PathBuf, toml_config: &TomlConfig) -> Self {
        let audio_folder = root_folder.join("audio");
        let scaler_path = toml_config
            .scaler_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| root_folder.join("scaler.json"));
        let model_path = toml_config
            .model_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| root_folder.join("model.json"));

        Self {
            root_folder,
            listen_port: toml_config.listen_port.unwrap_or(DEFAULT_PORT),
            audio_folder,
            scaler_path,
            model_path,
            max_upload_bytes: toml_config
                .max_upload_bytes
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    /// Create the root and audio folders if missing
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        std::fs::create_dir_all(&self.audio_folder)?;
        info!("Root folder: {}", self.root_folder.display());
        Ok(())
    }
}

/// Load the TOML config file if one exists, defaults otherwise
fn load_toml_config() -> TomlConfig {
    let Some(path) = config_file_path() else {
        return TomlConfig::default();
    };
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return TomlConfig::default(),
    };
    match toml::from_str(&content) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Ignoring malformed config {}: {}", path.display(), e);
            TomlConfig::default()
        }
    }
}

/// Parse TOML configuration content
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

/// Get configuration file path for the platform, if present
fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("stressd").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/stressd/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }
    None
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("stressd"))
        .unwrap_or_else(|| PathBuf::from("./stressd_data"))
}
