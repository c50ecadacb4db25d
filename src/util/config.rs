//! Configuration file support for tkdeps.
//!
//! tkdeps supports two configuration file locations:
//! - Global: `~/.tkdeps/config.toml` - User-wide defaults (`--config-dir`
//!   replaces the directory)
//! - Project: `.tkdeps/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config; command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::descriptor::{self, DescriptorStore};
use crate::core::{Os, RequestedSet};
use crate::resolver::Profile;

/// Descriptor directory used when none is configured.
pub const DEFAULT_DESCRIPTORS_DIR: &str = "dependencies";

/// Unversioned descriptor file names, used when no toolkit version is set.
pub const DEFAULT_DEPENDENCIES_FILE: &str = "dependencies.yml";
pub const DEFAULT_REQUIREMENTS_FILE: &str = "requirements.yml";

/// tkdeps configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the descriptors live
    pub descriptors: DescriptorsConfig,

    /// OS and visibility of the run
    pub profile: ProfileConfig,

    /// Default requested targets and components
    pub request: RequestConfig,
}

/// Descriptor location settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorsConfig {
    /// Directory holding the descriptor files
    pub dir: Option<PathBuf>,

    /// Toolkit version; selects `dependencies-X.Y.yml` / `requirements-X.Y.yml`
    pub version: Option<String>,

    /// Explicit dependency descriptor path (overrides dir + version)
    pub dependencies: Option<PathBuf>,

    /// Explicit requirement descriptor path (overrides dir + version)
    pub requirements: Option<PathBuf>,
}

/// Profile settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Target OS (defaults to the host OS)
    pub os: Option<Os>,

    /// Prefer internal-only requirement mappings
    pub internal: Option<bool>,
}

/// Default request, as delimiter-separated lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub targets: Option<String>,
    pub components: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.descriptors.dir.is_some() {
            self.descriptors.dir = other.descriptors.dir;
        }
        if other.descriptors.version.is_some() {
            self.descriptors.version = other.descriptors.version;
        }
        if other.descriptors.dependencies.is_some() {
            self.descriptors.dependencies = other.descriptors.dependencies;
        }
        if other.descriptors.requirements.is_some() {
            self.descriptors.requirements = other.descriptors.requirements;
        }

        if other.profile.os.is_some() {
            self.profile.os = other.profile.os;
        }
        if other.profile.internal.is_some() {
            self.profile.internal = other.profile.internal;
        }

        if other.request.targets.is_some() {
            self.request.targets = other.request.targets;
        }
        if other.request.components.is_some() {
            self.request.components = other.request.components;
        }
    }

    /// Profile of the run.
    pub fn profile(&self) -> Profile {
        Profile::new(
            self.profile.os.clone().unwrap_or_default(),
            self.profile.internal.unwrap_or(false),
        )
    }

    /// Default request from the config.
    pub fn request(&self) -> RequestedSet {
        RequestedSet::parse(
            self.request.targets.as_deref().unwrap_or(""),
            self.request.components.as_deref().unwrap_or(""),
        )
    }

    /// Descriptor store for the configured files.
    ///
    /// Relative paths are taken relative to `root`. Explicit file paths win
    /// over `dir` + `version`; without a version the unversioned file names
    /// are used.
    pub fn descriptor_store(&self, root: &Path) -> Result<DescriptorStore> {
        let dir = root.join(
            self.descriptors
                .dir
                .as_deref()
                .unwrap_or(Path::new(DEFAULT_DESCRIPTORS_DIR)),
        );

        let (deps_name, reqs_name) = match &self.descriptors.version {
            Some(version) => {
                let version = descriptor::toolkit_version(version)
                    .with_context(|| format!("invalid toolkit version `{}`", version))?;
                (
                    descriptor::dependencies_filename(&version),
                    descriptor::requirements_filename(&version),
                )
            }
            None => (
                DEFAULT_DEPENDENCIES_FILE.to_string(),
                DEFAULT_REQUIREMENTS_FILE.to_string(),
            ),
        };

        let dependencies = match &self.descriptors.dependencies {
            Some(path) => root.join(path),
            None => dir.join(deps_name),
        };
        let requirements = match &self.descriptors.requirements {
            Some(path) => root.join(path),
            None => dir.join(reqs_name),
        };

        Ok(DescriptorStore::new(dependencies, requirements))
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.tkdeps/config.toml)
/// 2. Global config (~/.tkdeps/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global tkdeps config directory (~/.tkdeps).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".tkdeps"))
}

/// Get the global config path inside a config directory.
pub fn global_config_path(config_dir: &Path) -> PathBuf {
    config_dir.join("config.toml")
}

/// Get the project config path (.tkdeps/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".tkdeps").join("config.toml")
}
