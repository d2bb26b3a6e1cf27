//! Configuration loading for LessPass.
//!
//! Raw TOML structs keep every field optional. [`LessPassConfig::resolve`]
//! validates them once at the parse boundary and produces a
//! [`ResolvedConfig`] the rest of the workspace can trust.
//!
//! ```toml
//! [app]
//! base_url = "https://lesspass.com"
//!
//! [default_password]
//! length = 20
//! symbols = false
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use lesspass_types::{PasswordPatch, PasswordProfile, PasswordVersion};

pub const DEFAULT_BASE_URL: &str = "https://lesspass.com";

/// Overrides the LessPass home directory (default `~/.lesspass`).
pub const HOME_ENV_VAR: &str = "LESSPASS_HOME";

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", .path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse config at {}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config at {}", .path.display())]
    Invalid {
        path: PathBuf,
        source: InvalidValue,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidValue {
    #[error("app.base_url must not be empty")]
    EmptyBaseUrl,
    #[error(
        "default_password.length must be between {min} and {max} (got {0})",
        min = PasswordProfile::MIN_LENGTH,
        max = PasswordProfile::MAX_LENGTH
    )]
    Length(u8),
    #[error("default_password.counter must be at least 1")]
    Counter,
    #[error("invalid default_password.version")]
    Version(#[from] lesspass_types::UnknownVersionError),
}

#[derive(Debug, Default, Deserialize)]
pub struct LessPassConfig {
    pub app: Option<AppConfig>,
    pub default_password: Option<DefaultPasswordConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// API server the client talks to.
    pub base_url: Option<String>,
}

/// Overrides applied on top of the stock default password template.
#[derive(Debug, Default, Deserialize)]
pub struct DefaultPasswordConfig {
    pub login: Option<String>,
    pub uppercase: Option<bool>,
    pub lowercase: Option<bool>,
    pub numbers: Option<bool>,
    pub symbols: Option<bool>,
    pub length: Option<u8>,
    pub counter: Option<u32>,
    pub version: Option<u8>,
}

impl DefaultPasswordConfig {
    fn to_patch(&self) -> Result<PasswordPatch, InvalidValue> {
        if let Some(length) = self.length
            && !(PasswordProfile::MIN_LENGTH..=PasswordProfile::MAX_LENGTH).contains(&length)
        {
            return Err(InvalidValue::Length(length));
        }
        if self.counter == Some(0) {
            return Err(InvalidValue::Counter);
        }
        let version = self.version.map(PasswordVersion::try_from).transpose()?;

        Ok(PasswordPatch {
            site: None,
            login: self.login.clone(),
            uppercase: self.uppercase,
            lowercase: self.lowercase,
            numbers: self.numbers,
            symbols: self.symbols,
            length: self.length,
            counter: self.counter,
            version,
        })
    }
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    base_url: String,
    default_password: PasswordPatch,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            default_password: PasswordPatch::default(),
        }
    }
}

impl ResolvedConfig {
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stock template with the configured overrides applied.
    #[must_use]
    pub fn default_password(&self) -> PasswordProfile {
        let mut profile = PasswordProfile::default();
        profile.merge(&self.default_password);
        profile
    }
}

impl LessPassConfig {
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    pub fn resolve(&self) -> Result<ResolvedConfig, InvalidValue> {
        let base_url = match self.app.as_ref().and_then(|app| app.base_url.as_deref()) {
            Some(url) if url.trim().is_empty() => return Err(InvalidValue::EmptyBaseUrl),
            Some(url) => url.trim().to_owned(),
            None => DEFAULT_BASE_URL.to_owned(),
        };
        let default_password = self
            .default_password
            .as_ref()
            .map(DefaultPasswordConfig::to_patch)
            .transpose()?
            .unwrap_or_default();

        Ok(ResolvedConfig {
            base_url,
            default_password,
        })
    }
}

/// Load and resolve the configuration at `path`; a missing file resolves to defaults.
pub fn load_resolved_from(path: &Path) -> Result<ResolvedConfig, ConfigError> {
    let Some(raw) = LessPassConfig::load_from(path)? else {
        return Ok(ResolvedConfig::default());
    };
    raw.resolve().map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and resolve `config.toml` from the LessPass home directory.
pub fn load_resolved() -> Result<ResolvedConfig, ConfigError> {
    match config_path() {
        Some(path) => load_resolved_from(&path),
        None => Ok(ResolvedConfig::default()),
    }
}

/// LessPass home directory: `$LESSPASS_HOME`, else `~/.lesspass`.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(HOME_ENV_VAR).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::home_dir().map(|home| home.join(".lesspass"))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    home_dir().map(|dir| dir.join(CONFIG_FILENAME))
}
