//! SQLite persistence for scraped games.
//!
//! Only this module talks to the database.

use std::path::Path;

use log::{debug, warn};
use rusqlite::{params, Connection, Transaction};
use serde::Serialize;

use crate::error::Result;
use crate::model::Game;

const TABLES: [&str; 6] = [
    "games",
    "contestants",
    "locations",
    "questions",
    "trend",
    "final_results",
];

#[derive(Debug, Default, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub games: u64,
    pub contestants: u64,
    pub locations: u64,
    pub questions: u64,
    pub trend: u64,
    pub final_results: u64,
}

pub struct ArchiveStore {
    conn: Connection,
}

impl ArchiveStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        if let Err(e) = conn.execute_batch("PRAGMA journal_mode=WAL;") {
            warn!("Could not enable WAL journal for {}: {}", path.display(), e);
        }
        Self::with_connection(conn)
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(include_str!("../sql/schema.sql"))?;
        Ok(Self { conn })
    }

    pub fn has_game(&self, game_id: u32) -> Result<bool> {
        let seen = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM games WHERE game_id = ?1)",
            params![game_id],
            |row| row.get(0),
        )?;
        Ok(seen)
    }

    /// Write every record of `game` in one transaction.
    /// Returns `false` without writing when the game is already recorded.
    pub fn save_game(&mut self, game: &Game) -> Result<bool> {
        if self.has_game(game.game_id)? {
            debug!("game {} already recorded", game.game_id);
            return Ok(false);
        }

        let tx = self.conn.transaction()?;
        insert_game(&tx, game)?;
        tx.commit()?;
        Ok(true)
    }

    pub fn table_counts(&self) -> Result<TableCounts> {
        let mut counts = [0u64; TABLES.len()];
        for (count, table) in counts.iter_mut().zip(TABLES) {
            *count = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get::<_, i64>(0)
                })? as u64;
        }
        let [games, contestants, locations, questions, trend, final_results] = counts;
        Ok(TableCounts {
            games,
            contestants,
            locations,
            questions,
            trend,
            final_results,
        })
    }
}

fn insert_game(tx: &Transaction, game: &Game) -> Result<()> {
    tx.execute(
        "INSERT INTO games (game_id, season, show_number, air_date) VALUES (?1, ?2, ?3, ?4)",
        params![
            game.game_id,
            game.season,
            game.show_number,
            game.air_date.map(|d| d.to_string()),
        ],
    )?;

    let mut stmt = tx.prepare(
        "INSERT INTO contestants (game_id, player_id, first_name, last_name, occupation, city, state)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for c in &game.contestants {
        stmt.execute(params![
            game.game_id,
            c.player_id,
            c.first_name,
            c.last_name,
            c.occupation,
            c.city,
            c.state,
        ])?;
    }

    let mut stmt =
        tx.prepare("INSERT INTO locations (game_id, player_id, seat) VALUES (?1, ?2, ?3)")?;
    for l in &game.locations {
        stmt.execute(params![l.game_id, l.player_id, l.seat.as_str()])?;
    }

    let mut stmt = tx.prepare(
        "INSERT INTO questions
         (game_id, season, round, row, col, category, value, daily_double_wager, question, answer)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?;
    for q in &game.questions {
        stmt.execute(params![
            q.game_id,
            q.season,
            q.round.as_str(),
            q.row,
            q.column,
            q.category,
            q.value,
            q.daily_double_wager,
            q.question,
            q.answer,
        ])?;
    }

    let mut stmt = tx.prepare(
        "INSERT INTO trend (game_id, round, row, col, correct_seat) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for t in &game.trend {
        stmt.execute(params![
            t.game_id,
            t.round.as_str(),
            t.row,
            t.column,
            t.correct.map(|s| s.as_str()),
        ])?;
    }

    let mut stmt = tx.prepare(
        "INSERT INTO final_results
         (game_id, seat, nickname, player_id, pre_final_score, wager, correct, final_score, coryat)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;
    for r in &game.final_results {
        stmt.execute(params![
            r.game_id,
            r.seat.as_str(),
            r.nickname,
            r.player_id,
            r.pre_final_score,
            r.wager,
            r.correct,
            r.final_score,
            r.coryat,
        ])?;
    }

    Ok(())
}
