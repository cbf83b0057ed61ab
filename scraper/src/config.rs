use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fetch::Endpoints;

pub const DEFAULT_BASE_URL: &str = "https://j-archive.com/";

/// Settings for a crawl. Every field has a default, so a config file only
/// needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CrawlConfig {
    pub base_url: String,
    pub database: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub json_dir: PathBuf,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            database: PathBuf::from("j-archive.sqlite"),
            user_agent: format!("j-archive-scraper/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            json_dir: PathBuf::from("."),
        }
    }
}

impl CrawlConfig {
    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn endpoints(&self) -> Result<Endpoints> {
        Endpoints::new(&self.base_url)
    }
}
