//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use apex_cache::Cache;
use apex_storefront::Storefront;

use crate::config::{CliConfig, StorageBackend, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            find_config_file(&cwd)
                .and_then(|path| CliConfig::load(path.to_str()?).ok())
                .unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Open the local store named by the config.
    pub fn open_cache(&self) -> Result<Cache> {
        match self.config.storage.backend {
            StorageBackend::Memory => Ok(Cache::in_memory()),
            StorageBackend::File => {
                let dir = self.resolve_path(&self.config.storage.dir);
                Cache::open(&dir)
                    .with_context(|| format!("Failed to open store at {}", dir.display()))
            }
        }
    }

    /// Open the storefront over the configured store.
    pub fn open_storefront(&self) -> Result<Storefront> {
        let cache = self.open_cache()?;
        self.output
            .debug(&format!("storage: {}", self.config.storage.backend.as_str()));
        Storefront::open(cache, self.config.latency).context("Failed to open storefront")
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in `start` or any parent directory.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
