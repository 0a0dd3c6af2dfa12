//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use brms_auth::SessionManager;
use brms_commerce::checkout::SimulatedPlacer;
use brms_commerce::pricing::PricingConfig;
use brms_storage::FileStore;

use crate::config::{BrmsConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: BrmsConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (BrmsConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (BrmsConfig::load(&path)?, Some(path)),
                None => (BrmsConfig::default(), None),
            },
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Pricing rules in effect.
    pub fn pricing(&self) -> PricingConfig {
        self.config.pricing
    }

    /// Placer honoring the configured delay.
    pub fn placer(&self) -> SimulatedPlacer {
        SimulatedPlacer::new(self.config.checkout.placement_delay())
    }

    /// Path of the session file.
    pub fn session_path(&self) -> PathBuf {
        match &self.config.session.storage_path {
            Some(path) => self.resolve_path(path),
            None => dirs_path().join("brms").join("state.json"),
        }
    }

    /// Session manager over the session file.
    pub fn sessions(&self) -> SessionManager<FileStore> {
        SessionManager::new(
            FileStore::open(self.session_path()),
            self.config.session.session_config(),
        )
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".brms.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join(".brms.toml")));
    }

    #[test]
    fn test_toml_preferred_over_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("brms.json"), "{}").unwrap();
        fs::write(dir.path().join("brms.toml"), "").unwrap();

        assert_eq!(find_config(dir.path()), Some(dir.path().join("brms.toml")));
    }

    #[test]
    fn test_resolve_keeps_absolute_paths() {
        let cwd = Path::new("/srv/brms");
        assert_eq!(resolve(cwd, "cart.toml"), PathBuf::from("/srv/brms/cart.toml"));
        assert_eq!(resolve(cwd, "/tmp/cart.toml"), PathBuf::from("/tmp/cart.toml"));
    }
}
