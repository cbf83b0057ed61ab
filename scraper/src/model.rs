use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Podium position, counted from the viewer's left.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Left,
    Middle,
    Right,
}

impl Seat {
    pub const ALL: [Seat; 3] = [Seat::Left, Seat::Middle, Seat::Right];

    pub fn from_index(index: usize) -> Option<Seat> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Seat::Left => "left",
            Seat::Middle => "middle",
            Seat::Right => "right",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    Jeopardy,
    DoubleJeopardy,
    FinalJeopardy,
}

impl Round {
    pub fn as_str(&self) -> &'static str {
        match self {
            Round::Jeopardy => "jeopardy",
            Round::DoubleJeopardy => "double_jeopardy",
            Round::FinalJeopardy => "final_jeopardy",
        }
    }

    /// Code used in clue ids, e.g. `clue_DJ_3_2`.
    pub fn code(&self) -> &'static str {
        match self {
            Round::Jeopardy => "J",
            Round::DoubleJeopardy => "DJ",
            Round::FinalJeopardy => "FJ",
        }
    }

    /// Id of the `div` holding this round on a game page.
    pub fn section_id(&self) -> &'static str {
        match self {
            Round::Jeopardy => "jeopardy_round",
            Round::DoubleJeopardy => "double_jeopardy_round",
            Round::FinalJeopardy => "final_jeopardy_round",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Contestant {
    pub player_id: u32,
    pub first_name: String,
    pub last_name: String,
    pub occupation: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerLocation {
    pub game_id: u32,
    pub player_id: u32,
    pub seat: Seat,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Question {
    pub game_id: u32,
    pub season: Option<String>,
    pub round: Round,
    pub row: u8,
    pub column: u8,
    pub category: String,
    /// Board value; `None` for the final round.
    pub value: Option<u32>,
    pub daily_double_wager: Option<i64>,
    pub question: String,
    pub answer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrendEntry {
    pub game_id: u32,
    pub round: Round,
    pub row: u8,
    pub column: u8,
    /// Seat that responded correctly; `None` marks a triple stumper.
    pub correct: Option<Seat>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FinalResult {
    pub game_id: u32,
    pub seat: Seat,
    pub nickname: String,
    pub player_id: Option<u32>,
    pub pre_final_score: i64,
    pub wager: Option<i64>,
    pub correct: Option<bool>,
    pub final_score: i64,
    pub coryat: Option<i64>,
}

/// Everything extracted from one game page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Game {
    pub game_id: u32,
    pub season: Option<String>,
    pub show_number: Option<u32>,
    pub air_date: Option<NaiveDate>,
    pub contestants: Vec<Contestant>,
    pub locations: Vec<PlayerLocation>,
    pub questions: Vec<Question>,
    pub trend: Vec<TrendEntry>,
    pub final_results: Vec<FinalResult>,
}
