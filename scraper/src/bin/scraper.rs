use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use j_archive_scraper::{
    save_game_json, ArchiveStore, CrawlConfig, CrawlSummary, Crawler, HttpSource,
};

/// Scrape J! Archive games into a SQLite database
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database path
    #[arg(long)]
    db: Option<PathBuf>,

    /// Archive base URL
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the season ids on the listing page
    Seasons,
    /// Crawl the given seasons
    Season {
        #[arg(required = true)]
        seasons: Vec<String>,
    },
    /// Crawl every listed season
    All,
    /// Scrape a single game
    Game {
        game_id: u32,

        /// Season to tag the game with
        #[arg(long)]
        season: Option<String>,

        /// Also write the game as JSON
        #[arg(long)]
        json: bool,

        /// Don't write the game to the database
        #[arg(long)]
        no_store: bool,
    },
}

fn load_config(cli: &Cli) -> Result<CrawlConfig> {
    let mut config = match &cli.config {
        Some(path) => CrawlConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CrawlConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.database = db.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

fn print_summary(summary: &CrawlSummary, store: &ArchiveStore) -> Result<()> {
    println!(
        "\nStored {} games, {} already recorded, {} skipped",
        summary.stored, summary.already_seen, summary.skipped
    );
    let counts = store.table_counts().context("Failed to count rows")?;
    println!(
        "Database now holds {} games, {} questions, {} trend entries, {} final results",
        counts.games, counts.questions, counts.trend, counts.final_results
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let source = HttpSource::new(&config).context("Failed to create HTTP client")?;
    let store = ArchiveStore::open(&config.database)
        .with_context(|| format!("Failed to open database {}", config.database.display()))?;
    let endpoints = config.endpoints().context("Invalid base URL")?;
    let mut crawler = Crawler::new(source, store, endpoints);

    match cli.command {
        Command::Seasons => {
            let seasons = crawler.list_seasons().context("Failed to read season listing")?;
            for season in &seasons {
                println!("{}", season);
            }
            println!("\n{} seasons", seasons.len());
        }
        Command::Season { seasons } => {
            let summary = crawler.crawl_seasons(&seasons)?;
            print_summary(&summary, crawler.store())?;
        }
        Command::All => {
            let summary = crawler.crawl_all().context("Failed to crawl archive")?;
            print_summary(&summary, crawler.store())?;
        }
        Command::Game {
            game_id,
            season,
            json,
            no_store,
        } => {
            let game = crawler
                .scrape_game(game_id, season.as_deref())
                .with_context(|| format!("Failed to scrape game {}", game_id))?;

            println!("Game: {}", game.game_id);
            if let Some(show) = game.show_number {
                println!("Show: #{}", show);
            }
            if let Some(date) = game.air_date {
                println!("Aired: {}", date);
            }
            println!("\nContestants:");
            for (idx, contestant) in game.contestants.iter().enumerate() {
                println!(
                    "{}. {} {}",
                    idx + 1,
                    contestant.first_name,
                    contestant.last_name
                );
                if let Some(occupation) = &contestant.occupation {
                    println!("   Occupation: {}", occupation);
                }
            }
            println!("\n{} questions, {} trend entries", game.questions.len(), game.trend.len());
            for result in &game.final_results {
                println!(
                    "{} ({}): {} -> {}",
                    result.nickname,
                    result.seat.as_str(),
                    result.pre_final_score,
                    result.final_score
                );
            }

            if json {
                let path = save_game_json(&game, &config.json_dir)?;
                println!("\nInformation saved to {}", path.display());
            }
            if !no_store {
                if crawler.save(&game)? {
                    println!("Game {} recorded", game.game_id);
                } else {
                    println!("Game {} was already recorded", game.game_id);
                }
            }
        }
    }

    Ok(())
}
