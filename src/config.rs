//! Server configuration.
//!
//! Graph path and port come from the command line. Everything else has a
//! default and can be overridden from an optional TOML file:
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0"
//! backlog = 5
//! cache_capacity = 10
//! read_timeout_secs = 30
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{PathError, Result};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_BACKLOG: u32 = 5;

/// On-disk config file layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub bind_address: Option<String>,
    pub backlog: Option<u32>,
    pub cache_capacity: Option<usize>,
    pub read_timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::parse(&text)?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Fully resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub graph_path: PathBuf,
    pub bind_address: String,
    pub port: u16,
    pub backlog: u32,
    pub cache_capacity: usize,
    /// Close connections that send nothing within this window.
    pub read_timeout: Option<Duration>,
}

impl ServerConfig {
    pub fn new(graph_path: impl Into<PathBuf>, port: u16) -> Self {
        Self {
            graph_path: graph_path.into(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port,
            backlog: DEFAULT_BACKLOG,
            cache_capacity: DEFAULT_CAPACITY,
            read_timeout: None,
        }
    }

    /// Apply values present in a config file.
    pub fn with_file(mut self, file: &FileConfig) -> Self {
        let section = &file.server;
        if let Some(addr) = &section.bind_address {
            self.bind_address = addr.clone();
        }
        if let Some(backlog) = section.backlog {
            self.backlog = backlog;
        }
        if let Some(capacity) = section.cache_capacity {
            self.cache_capacity = capacity;
        }
        if let Some(secs) = section.read_timeout_secs {
            self.read_timeout = Some(Duration::from_secs(secs));
        }
        self
    }

    /// `host:port` string handed to the listener.
    pub fn listen_addr(&self) -> String {
        if self.bind_address.contains(':') {
            // IPv6 literal
            format!("[{}]:{}", self.bind_address, self.port)
        } else {
            format!("{}:{}", self.bind_address, self.port)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(PathError::Config(
                "cache_capacity must be at least 1".to_string(),
            ));
        }
        if self.backlog == 0 {
            return Err(PathError::Config("backlog must be at least 1".to_string()));
        }
        if self.read_timeout == Some(Duration::ZERO) {
            return Err(PathError::Config(
                "read_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.bind_address.trim().is_empty() {
            return Err(PathError::Config("bind_address is empty".to_string()));
        }
        Ok(())
    }
}
