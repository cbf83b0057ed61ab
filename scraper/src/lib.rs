pub mod board;
pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
mod html;
pub mod model;
pub mod normalize;
pub mod season;
pub mod store;

#[cfg(test)]
pub mod tests;

use std::fs;
use std::path::{Path, PathBuf};

// Re-export key types and functions for easier access
pub use crate::board::{category_for, clue_value, parse_clue_id, ValueScheme};
pub use crate::config::CrawlConfig;
pub use crate::crawl::{CrawlSummary, Crawler};
pub use crate::error::{Result, ScrapeError};
pub use crate::extract::parse_game;
pub use crate::fetch::{Endpoints, HttpSource, PageSource};
pub use crate::model::{
    Contestant, FinalResult, Game, PlayerLocation, Question, Round, Seat, TrendEntry,
};
pub use crate::store::{ArchiveStore, TableCounts};

/// Write `game` as pretty JSON to `<dir>/game_<id>.json`.
pub fn save_game_json(game: &Game, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("game_{}.json", game.game_id));
    let json = serde_json::to_string_pretty(game)?;
    fs::write(&path, json)?;
    Ok(path)
}
