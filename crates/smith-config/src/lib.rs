//! # smith-config
//!
//! Layered configuration loading for testsmith using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Command-line overrides ([`ConfigOverrides`])
//! 2. Environment variables (`TESTSMITH_*` prefix, `__` as separator)
//! 3. Project-level `testsmith.toml` (or an explicit config file)
//! 4. User-level `~/.config/testsmith/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TESTSMITH_TARGET__METHOD_FORMAT` -> `target.method_format`,
//! `TESTSMITH_SOURCE__BASE` -> `source.base`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use smith_config::SmithConfig;
//!
//! let config = SmithConfig::load(Path::new(".")).expect("config");
//! println!("tests go to {}", config.target.directory);
//! ```

mod error;
mod general;
mod source;
mod target;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use source::SourceConfig;
pub use target::{MethodFormat, TargetConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "testsmith.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SmithConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Values supplied on the command line. `None` leaves lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    pub source: SourceOverrides,
    pub target: TargetOverrides,
    pub general: GeneralOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roots: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TargetOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_format: Option<MethodFormat>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneralOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}

impl SmithConfig {
    /// Load configuration for `project_root` from files and environment.
    ///
    /// Does NOT call `dotenvy`; use [`SmithConfig::load_dotenv`] first if
    /// `.env` files should contribute.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        Self::load_with_overrides(project_root, None, &ConfigOverrides::default())
    }

    /// Load configuration with an optional explicit config file and
    /// command-line overrides layered on top of everything else.
    pub fn load_with_overrides(
        project_root: &Path,
        config_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(project_root, config_file)
            .merge(Serialized::defaults(overrides))
            .extract()?;
        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain (without command-line overrides).
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(project_root: &Path, config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Explicit or project-local config
        let local_path = config_file.map_or_else(
            || project_root.join(PROJECT_CONFIG_FILE),
            |path| {
                if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    project_root.join(path)
                }
            },
        );
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables
        figment.merge(Env::prefixed("TESTSMITH_").split("__"))
    }

    /// Reject values no run can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.roots.iter().all(|root| root.trim().is_empty()) {
            return Err(invalid("source.roots", "at least one source root is required"));
        }
        if self.source.extension.is_empty() {
            return Err(invalid("source.extension", "must not be empty"));
        }
        if self.target.namespace.is_empty() {
            return Err(invalid("target.namespace", "must not be empty"));
        }
        if self.target.template.trim().is_empty() {
            return Err(invalid("target.template", "must name a skeleton file"));
        }
        Ok(())
    }

    /// Load `.env` from `project_root`, falling back to the current directory.
    ///
    /// Silently does nothing if no `.env` is found.
    pub fn load_dotenv(project_root: &Path) {
        let env_path = project_root.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
            return;
        }
        let _ = dotenvy::dotenv();
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("testsmith").join("config.toml"))
    }

    fn normalized(mut self) -> Self {
        self.target.namespace = self.target.namespace.trim().trim_matches('\\').to_string();
        self.source.extension = self.source.extension.trim().trim_start_matches('.').to_string();
        self.source.roots.retain(|root| !root.trim().is_empty());
        self.source.exclude.retain(|pattern| !pattern.is_empty());
        self
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
