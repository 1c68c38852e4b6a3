use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Server configuration.
///
/// Loaded from a YAML file named by the `HEARTH_CONFIG` environment variable
/// (default `hearth.yaml`). A missing file falls back to built-in defaults.
/// The `LISTEN` environment variable overrides the listen address either way.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the TCP listener binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Directory all served files must live under.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Document substituted for a request path of exactly "/".
    #[serde(default = "default_document")]
    pub default_document: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:4459".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from("./content")
}

fn default_document() -> String {
    "/index.html".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            default_document: default_document(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("HEARTH_CONFIG").unwrap_or_else(|_| "hearth.yaml".to_string());

        let mut cfg = if Path::new(&path).exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_yaml::from_str(&raw)?
        } else {
            Config::default()
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }
}
