//! Global context for tkdeps operations.
//!
//! Provides centralized access to the merged configuration and the project
//! root that relative descriptor paths are resolved against.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::DescriptorStore;
use crate::util::config::{
    global_config_dir, global_config_path, load_config, project_config_path, Config,
};

/// Process-wide settings for one tkdeps invocation.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Project root (current working directory unless overridden)
    cwd: PathBuf,

    /// Global config directory (~/.tkdeps/ unless overridden)
    home: Option<PathBuf>,

    /// Merged global + project configuration
    config: Config,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the current directory.
    ///
    /// `config_dir` replaces `~/.tkdeps/` as the global config directory.
    pub fn new(config_dir: Option<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let home = config_dir.or_else(global_config_dir);
        Ok(Self::with_home(cwd, home))
    }

    /// Create a GlobalContext with a specific project root.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        Self::with_home(cwd, global_config_dir())
    }

    /// Create a GlobalContext with a specific project root and global
    /// config directory.
    pub fn with_home(cwd: PathBuf, home: Option<PathBuf>) -> Self {
        let global = home
            .as_deref()
            .map(global_config_path)
            .unwrap_or_default();
        let config = load_config(&global, &project_config_path(&cwd));

        GlobalContext {
            cwd,
            home,
            config,
            color: true,
        }
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the project root.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global config directory, if one could be determined.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable config, for command-line overrides.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Descriptor store for the configured files.
    pub fn descriptor_store(&self) -> Result<DescriptorStore> {
        self.config.descriptor_store(&self.cwd)
    }
}
