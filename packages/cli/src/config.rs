use pagecraft_renderer::HtmlOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding `<site>/<page>.json` files
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// HTML output options
    #[serde(default)]
    pub html: HtmlOptions,
}

fn default_storage_dir() -> String {
    "pages".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Absolute path to the storage directory; `override_dir` (from the
    /// command line) wins over the config file
    pub fn storage_path(&self, cwd: &Path, override_dir: Option<&Path>) -> PathBuf {
        match override_dir {
            Some(dir) => cwd.join(dir),
            None => cwd.join(&self.storage_dir),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            html: HtmlOptions::default(),
        }
    }
}
