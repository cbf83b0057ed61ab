//! Fixed positional scheme of the game board: which category and dollar
//! value a clue gets from its round, column and row.

use chrono::NaiveDate;

use crate::model::Round;

pub const CATEGORIES_PER_ROUND: usize = 6;
pub const ROWS_PER_ROUND: u8 = 5;
/// Six categories for each of the two main rounds plus the final category.
pub const MIN_CATEGORIES: usize = 2 * CATEGORIES_PER_ROUND + 1;

/// Base clue value of a board. Values doubled on 2001-11-26.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueScheme {
    Classic,
    #[default]
    Modern,
}

impl ValueScheme {
    pub fn for_air_date(air_date: Option<NaiveDate>) -> ValueScheme {
        match (air_date, NaiveDate::from_ymd_opt(2001, 11, 26)) {
            (Some(date), Some(cutover)) if date < cutover => ValueScheme::Classic,
            _ => ValueScheme::Modern,
        }
    }

    fn base(self) -> u32 {
        match self {
            ValueScheme::Classic => 100,
            ValueScheme::Modern => 200,
        }
    }

    /// Value of a clue at `row` (1-based). `None` for the final round or an off-board row.
    pub fn value(self, round: Round, row: u8) -> Option<u32> {
        if !(1..=ROWS_PER_ROUND).contains(&row) {
            return None;
        }
        let multiplier = match round {
            Round::Jeopardy => 1,
            Round::DoubleJeopardy => 2,
            Round::FinalJeopardy => return None,
        };
        Some(self.base() * u32::from(row) * multiplier)
    }
}

/// Clue value on the current board.
pub fn clue_value(round: Round, row: u8) -> Option<u32> {
    ValueScheme::Modern.value(round, row)
}

/// Index into the page's category list for a 1-based column.
pub fn category_index(round: Round, column: u8) -> Option<usize> {
    let column = usize::from(column);
    match round {
        Round::FinalJeopardy => Some(2 * CATEGORIES_PER_ROUND),
        _ if !(1..=CATEGORIES_PER_ROUND).contains(&column) => None,
        Round::Jeopardy => Some(column - 1),
        Round::DoubleJeopardy => Some(CATEGORIES_PER_ROUND + column - 1),
    }
}

pub fn category_for(categories: &[String], round: Round, column: u8) -> Option<&str> {
    category_index(round, column)
        .and_then(|idx| categories.get(idx))
        .map(String::as_str)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardPosition {
    pub round: Round,
    pub column: u8,
    pub row: u8,
}

/// Decode `clue_J_<col>_<row>`, `clue_DJ_<col>_<row>` or `clue_FJ`.
/// Response cells (`..._r`) and tie-breakers do not decode.
pub fn parse_clue_id(id: &str) -> Option<BoardPosition> {
    let rest = id.strip_prefix("clue_")?;
    if rest == "FJ" {
        return Some(BoardPosition {
            round: Round::FinalJeopardy,
            column: 1,
            row: 1,
        });
    }

    let mut parts = rest.split('_');
    let round = match parts.next()? {
        "J" => Round::Jeopardy,
        "DJ" => Round::DoubleJeopardy,
        _ => return None,
    };
    let column: u8 = parts.next()?.parse().ok()?;
    let row: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some()
        || !(1..=CATEGORIES_PER_ROUND).contains(&usize::from(column))
        || !(1..=ROWS_PER_ROUND).contains(&row)
    {
        return None;
    }

    Some(BoardPosition { round, column, row })
}
