use anyhow::{Context, Result};
use j_archive_scraper::{parse_game, CrawlConfig, HttpSource, PageSource};
use scraper::{Html, Selector};
use std::env;
use std::fs;
use std::path::Path;
use url::Url;

fn count(document: &Html, css: &str) -> Result<usize> {
    let selector = Selector::parse(css)
        .map_err(|e| anyhow::anyhow!("Invalid selector {}: {:?}", css, e))?;
    Ok(document.select(&selector).count())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Please provide a game id (or URL) and a test name");
        eprintln!("Usage: cargo run --bin save_scrape_failure <GAME_ID|URL> <test_name>");
        std::process::exit(1);
    }

    let target = &args[1];
    let test_name = &args[2];

    let config = CrawlConfig::default();
    let (url, game_id) = match target.parse::<u32>() {
        Ok(game_id) => (config.endpoints()?.game(game_id)?, game_id),
        Err(_) => {
            let url = Url::parse(target).context("Not a game id or URL")?;
            let game_id = url
                .query_pairs()
                .find(|(key, _)| key == "game_id")
                .and_then(|(_, value)| value.parse().ok())
                .unwrap_or(0);
            (url, game_id)
        }
    };

    println!("Fetching HTML from {}...", url);
    let source = HttpSource::new(&config).context("Failed to create HTTP client")?;
    let html = source.fetch(&url).context("Failed to fetch page")?;

    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    let document = Html::parse_document(&html);
    let has_title = count(&document, "#game_title h1")? > 0;
    let contestants = count(&document, "p.contestants")?;
    let categories = count(&document, "td.category_name")?;
    let clues = count(&document, "td.clue_text")?;
    let has_final = count(&document, "#final_jeopardy_round")? > 0;
    let nicknames = count(&document, "td.score_player_nickname")?;

    println!("HTML analysis results:");
    println!("  - Has game title: {}", has_title);
    println!("  - Contestants: {}", contestants);
    println!("  - Categories: {}", categories);
    println!("  - Clue cells: {}", clues);
    println!("  - Has final round: {}", has_final);
    println!("  - Score nickname cells: {}", nicknames);

    match parse_game(&html, game_id, None) {
        Ok(game) => {
            println!(
                "⚠️ Parse succeeded with {} questions! This may not be a failure case.",
                game.questions.len()
            );
        }
        Err(e) => {
            println!("✅ Parse failed with error: {}", e);

            if !has_title || contestants == 0 || categories < 13 || !has_final || nicknames == 0 {
                println!("   Missing required HTML elements - structural issue");
            } else {
                println!("   Has all required elements - likely a content parsing issue");
            }

            println!("\nThis test case has been saved and will be included in regression tests.");
        }
    }

    Ok(())
}
