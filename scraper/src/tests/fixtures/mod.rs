use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use url::Url;

use crate::error::{Result, ScrapeError};
use crate::extract::parse_game;
use crate::fetch::PageSource;
use crate::model::Game;

pub const BASE_URL: &str = "https://j-archive.test/";

/// Load test HTML fixture by name
pub fn load_html_fixture(fixture_name: &str) -> String {
    let path = Path::new("src/tests/fixtures").join(format!("{}.html", fixture_name));
    fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// Load a real failure case for regression testing
pub fn load_failure_html(failure_name: &str) -> Option<String> {
    let path = Path::new("src/tests/fixtures/failures").join(format!("{}.html", failure_name));
    fs::read_to_string(path).ok()
}

/// The sample game page, parsed as game 5599 of season 33.
pub fn sample_game() -> Game {
    parse_game(&load_html_fixture("sample_game"), 5599, Some("33"))
        .expect("sample game should parse")
}

/// Serves canned pages by URL and records what was requested.
#[derive(Default)]
pub struct FakeArchive {
    pages: HashMap<String, String>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeArchive {
    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }
}

impl PageSource for FakeArchive {
    fn fetch(&self, url: &Url) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| ScrapeError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
