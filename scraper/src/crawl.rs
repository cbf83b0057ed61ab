use std::ops::AddAssign;

use log::{info, warn};
use serde::Serialize;
use url::Url;

use crate::error::Result;
use crate::extract::parse_game;
use crate::fetch::{Endpoints, PageSource};
use crate::model::Game;
use crate::season::{parse_game_links, parse_season_ids, GameLink};
use crate::store::ArchiveStore;

#[derive(Debug, Default, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    pub stored: usize,
    pub already_seen: usize,
    pub skipped: usize,
}

impl AddAssign for CrawlSummary {
    fn add_assign(&mut self, other: Self) {
        self.stored += other.stored;
        self.already_seen += other.already_seen;
        self.skipped += other.skipped;
    }
}

/// Walks listing → season → game pages and records every game not yet stored.
pub struct Crawler<S: PageSource> {
    source: S,
    store: ArchiveStore,
    endpoints: Endpoints,
}

impl<S: PageSource> Crawler<S> {
    pub fn new(source: S, store: ArchiveStore, endpoints: Endpoints) -> Self {
        Self {
            source,
            store,
            endpoints,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &ArchiveStore {
        &self.store
    }

    pub fn list_seasons(&self) -> Result<Vec<String>> {
        let url = self.endpoints.listing()?;
        let html = self.source.fetch(&url)?;
        parse_season_ids(&html, self.endpoints.base())
    }

    /// Crawl every season on the listing page. Seasons whose page cannot be read are skipped.
    pub fn crawl_all(&mut self) -> Result<CrawlSummary> {
        let seasons = self.list_seasons()?;
        info!("Found {} seasons", seasons.len());
        self.crawl_seasons(&seasons)
    }

    pub fn crawl_seasons(&mut self, seasons: &[String]) -> Result<CrawlSummary> {
        let mut summary = CrawlSummary::default();
        for season in seasons {
            match self.crawl_season(season) {
                Ok(season_summary) => summary += season_summary,
                Err(e) => warn!("Skipping season {}: {}", season, e),
            }
        }
        Ok(summary)
    }

    pub fn crawl_season(&mut self, season: &str) -> Result<CrawlSummary> {
        let url = self.endpoints.season(season)?;
        info!("Season {}: {}", season, url);
        let html = self.source.fetch(&url)?;
        let links = parse_game_links(&html, self.endpoints.base())?;
        info!("Season {}: {} games listed", season, links.len());

        let mut summary = CrawlSummary::default();
        for link in &links {
            if self.store.has_game(link.game_id)? {
                summary.already_seen += 1;
                continue;
            }

            let outcome = self.scrape_link(link, Some(season)).and_then(|game| {
                let saved = self.store.save_game(&game)?;
                Ok((game, saved))
            });
            match outcome {
                Ok((game, true)) => {
                    info!(
                        "Stored game {} ({} questions)",
                        game.game_id,
                        game.questions.len()
                    );
                    summary.stored += 1;
                }
                Ok((_, false)) => summary.already_seen += 1,
                Err(e) => {
                    warn!("Skipping game {}: {}", link.game_id, e);
                    summary.skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    fn scrape_link(&self, link: &GameLink, season: Option<&str>) -> Result<Game> {
        let url = Url::parse(&link.url)?;
        let html = self.source.fetch(&url)?;
        parse_game(&html, link.game_id, season)
    }

    /// Fetch and parse one game by id, without storing it.
    pub fn scrape_game(&self, game_id: u32, season: Option<&str>) -> Result<Game> {
        let url = self.endpoints.game(game_id)?;
        info!("Navigating to {}...", url);
        let html = self.source.fetch(&url)?;
        parse_game(&html, game_id, season)
    }

    /// Record a game unless it is already stored.
    pub fn save(&mut self, game: &Game) -> Result<bool> {
        self.store.save_game(game)
    }
}
