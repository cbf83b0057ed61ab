use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use url::Url;

use crate::config::CrawlConfig;
use crate::error::{Result, ScrapeError};

/// Anything that can hand back the HTML behind a URL.
pub trait PageSource {
    fn fetch(&self, url: &Url) -> Result<String>;
}

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &Url) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

/// The archive's fixed URL patterns, relative to a base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn listing(&self) -> Result<Url> {
        Ok(self.base.join("listseasons.php")?)
    }

    pub fn season(&self, season: &str) -> Result<Url> {
        let mut url = self.base.join("showseason.php")?;
        url.query_pairs_mut().append_pair("season", season);
        Ok(url)
    }

    pub fn game(&self, game_id: u32) -> Result<Url> {
        let mut url = self.base.join("showgame.php")?;
        url.query_pairs_mut()
            .append_pair("game_id", &game_id.to_string());
        Ok(url)
    }
}
