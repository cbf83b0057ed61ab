use log::debug;
use scraper::Html;
use serde::Serialize;
use url::Url;

use crate::error::Result;
use crate::html::selector;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct GameLink {
    pub game_id: u32,
    pub url: String,
}

/// Values of `param` on every link in `html` whose path ends with `page`, resolved against `base`.
fn linked_params(html: &str, base: &Url, page: &str, param: &str) -> Result<Vec<(String, Url)>> {
    let document = Html::parse_document(html);
    let link_selector = selector("a[href]")?;

    let mut found: Vec<(String, Url)> = Vec::new();
    for link in document.select(&link_selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Ok(url) = base.join(href.trim()) else {
            debug!("unparseable link: {}", href);
            continue;
        };
        if !url.path().ends_with(page) {
            continue;
        }
        let Some(value) = url
            .query_pairs()
            .find(|(key, _)| key == param)
            .map(|(_, value)| value.into_owned())
        else {
            continue;
        };
        if !found.iter().any(|(seen, _)| *seen == value) {
            found.push((value, url));
        }
    }

    Ok(found)
}

/// Season ids linked from the season listing, in page order.
pub fn parse_season_ids(html: &str, base: &Url) -> Result<Vec<String>> {
    Ok(linked_params(html, base, "showseason.php", "season")?
        .into_iter()
        .map(|(season, _)| season)
        .collect())
}

/// Game pages linked from a season page, in page order.
pub fn parse_game_links(html: &str, base: &Url) -> Result<Vec<GameLink>> {
    Ok(linked_params(html, base, "showgame.php", "game_id")?
        .into_iter()
        .filter_map(|(id, url)| match id.parse() {
            Ok(game_id) => Some(GameLink {
                game_id,
                url: url.to_string(),
            }),
            Err(_) => {
                debug!("non-numeric game id: {}", id);
                None
            }
        })
        .collect())
}
