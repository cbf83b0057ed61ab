//! Extractors for the sections of a game page. Each takes a parsed document
//! (or a subtree of one) and returns flat records.

use chrono::NaiveDate;
use log::debug;
use scraper::{ElementRef, Html};

use crate::board::{category_for, parse_clue_id, BoardPosition, ValueScheme, MIN_CATEGORIES};
use crate::error::{Result, ScrapeError};
use crate::html::{has_class, next_sibling_named, selector, text_of};
use crate::model::{
    Contestant, FinalResult, Game, PlayerLocation, Question, Round, Seat, TrendEntry,
};
use crate::normalize::{clean_text, parse_blurb, parse_dollars, parse_score, split_name};

/// Parse a full game page into records tagged with `game_id` and `season`.
pub fn parse_game(html: &str, game_id: u32, season: Option<&str>) -> Result<Game> {
    let document = Html::parse_document(html);

    // Extract the category names; a partial board cannot be mapped
    let categories = extract_categories(&document)?;
    if categories.len() < MIN_CATEGORIES {
        return Err(ScrapeError::IncompleteBoard {
            found: categories.len(),
            needed: MIN_CATEGORIES,
        });
    }

    // Extract show number and air date from the title
    let (show_number, air_date) = extract_title(&document)?;

    // Extract contestants and where they stood
    let listed = extract_contestants(&document)?;
    let locations = seat_locations(game_id, &listed);
    let contestants: Vec<Contestant> = listed.entries.into_iter().map(|(_, c)| c).collect();
    let seats = extract_seat_nicknames(&document)?;

    // Extract questions and trend for the two main rounds, then the final clue
    let board = BoardContext {
        game_id,
        season,
        categories: &categories,
        seats: &seats,
        scheme: ValueScheme::for_air_date(air_date),
    };
    let (mut questions, trend) = extract_clues(&document, &board)?;
    if let Some(final_clue) = extract_final_clue(&document, &board)? {
        questions.push(final_clue);
    }

    // Extract wagers and scores from the final round
    let final_results = extract_final_results(&document, game_id, &locations)?;

    debug!(
        "game {}: {} contestants, {} questions, {} trend entries",
        game_id,
        contestants.len(),
        questions.len(),
        trend.len()
    );

    Ok(Game {
        game_id,
        season: season.map(str::to_string),
        show_number,
        air_date,
        contestants,
        locations,
        questions,
        trend,
        final_results,
    })
}

pub fn extract_categories(document: &Html) -> Result<Vec<String>> {
    let category_selector = selector("td.category_name")?;
    Ok(document.select(&category_selector).map(text_of).collect())
}

/// Show number and air date from the `#game_title` heading.
pub fn extract_title(document: &Html) -> Result<(Option<u32>, Option<NaiveDate>)> {
    let title_selector = selector("#game_title h1")?;
    Ok(document
        .select(&title_selector)
        .next()
        .map(|h1| parse_title(&text_of(h1)))
        .unwrap_or((None, None)))
}

/// "Show #7366 - Monday, September 12, 2016"
pub fn parse_title(title: &str) -> (Option<u32>, Option<NaiveDate>) {
    let show_number = title.split_once('#').and_then(|(_, rest)| {
        rest.chars()
            .take_while(|c| c.is_ascii_digit())
            .collect::<String>()
            .parse()
            .ok()
    });

    let air_date = title
        .rsplit_once(" - ")
        .map(|(_, date)| date.split_once(", ").map(|(_, d)| d).unwrap_or(date))
        .and_then(|date| NaiveDate::parse_from_str(date.trim(), "%B %d, %Y").ok());

    (show_number, air_date)
}

/// Contestants as listed on the page. Entries keep their position in the
/// listing so a skipped paragraph does not move anyone else's seat.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListedContestants {
    pub listed: usize,
    pub entries: Vec<(usize, Contestant)>,
}

pub fn extract_contestants(document: &Html) -> Result<ListedContestants> {
    let contestant_selector = selector("p.contestants")?;
    let link_selector = selector("a")?;

    let mut contestants = ListedContestants::default();
    for (position, p) in document.select(&contestant_selector).enumerate() {
        contestants.listed = position + 1;
        let Some(link) = p.select(&link_selector).next() else {
            debug!("contestant without player link: {}", text_of(p));
            continue;
        };
        let Some(player_id) = link.value().attr("href").and_then(player_id_from_href) else {
            debug!("contestant link without player id: {}", text_of(p));
            continue;
        };

        let name = text_of(link);
        let full_text = text_of(p);
        let blurb = parse_blurb(full_text.strip_prefix(name.as_str()).unwrap_or(&full_text));
        let (first_name, last_name) = split_name(&name);

        contestants.entries.push((
            position,
            Contestant {
                player_id,
                first_name,
                last_name,
                occupation: blurb.occupation,
                city: blurb.city,
                state: blurb.state,
            },
        ));
    }

    Ok(contestants)
}

fn player_id_from_href(href: &str) -> Option<u32> {
    let (_, rest) = href.split_once("player_id=")?;
    rest.chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .ok()
}

/// Contestants are listed starting from the right podium.
pub fn seat_locations(game_id: u32, contestants: &ListedContestants) -> Vec<PlayerLocation> {
    let count = contestants.listed;
    contestants
        .entries
        .iter()
        .filter_map(|(position, contestant)| {
            Seat::from_index(count - 1 - position).map(|seat| PlayerLocation {
                game_id,
                player_id: contestant.player_id,
                seat,
            })
        })
        .collect()
}

/// Nicknames shown over the podiums, as used in responses and score tables.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeatMap {
    seats: Vec<(String, Seat)>,
}

impl SeatMap {
    pub fn new(nicknames: impl IntoIterator<Item = String>) -> Self {
        Self {
            seats: nicknames.into_iter().zip(Seat::ALL).collect(),
        }
    }

    pub fn seat_of(&self, nickname: &str) -> Option<Seat> {
        self.seats
            .iter()
            .find(|(name, _)| same_name(name, nickname))
            .map(|(_, seat)| *seat)
    }
}

fn same_name(a: &str, b: &str) -> bool {
    clean_text(a).to_lowercase() == clean_text(b).to_lowercase()
}

/// The first score table on the page names the Left, Middle and Right podiums in order.
pub fn extract_seat_nicknames(document: &Html) -> Result<SeatMap> {
    let nickname_selector = selector("td.score_player_nickname")?;
    Ok(SeatMap::new(
        document
            .select(&nickname_selector)
            .take(Seat::ALL.len())
            .map(text_of),
    ))
}

pub struct BoardContext<'a> {
    pub game_id: u32,
    pub season: Option<&'a str>,
    pub categories: &'a [String],
    pub seats: &'a SeatMap,
    pub scheme: ValueScheme,
}

/// What the page reveals after a clue was played.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Response {
    pub answer: Option<String>,
    pub right: Vec<String>,
    pub wrong: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClueCell {
    pub position: BoardPosition,
    pub question: String,
    pub daily_double_wager: Option<i64>,
    pub response: Option<Response>,
}

/// Questions and trend entries for the two main rounds.
pub fn extract_clues(
    document: &Html,
    board: &BoardContext,
) -> Result<(Vec<Question>, Vec<TrendEntry>)> {
    let clue_selector = selector("td.clue")?;

    let mut questions = Vec::new();
    let mut trend = Vec::new();
    for round in [Round::Jeopardy, Round::DoubleJeopardy] {
        let Some(section) = find_section(document, round)? else {
            debug!("game {}: no {} section", board.game_id, round.section_id());
            continue;
        };

        for cell in section.select(&clue_selector) {
            // Empty cells are clues that were never revealed
            let Some(clue) = parse_clue_cell(cell)? else {
                continue;
            };
            let BoardPosition { column, row, .. } = clue.position;
            if clue.position.round != round {
                debug!("clue {:?} found outside its round", clue.position);
                continue;
            }
            let Some(category) = category_for(board.categories, round, column) else {
                debug!("no category for {:?}", clue.position);
                continue;
            };

            // Record who got it right; an unplaceable responder gets no entry
            if let Some(response) = &clue.response {
                if let Some(correct) = correct_seat(response, board.seats) {
                    trend.push(TrendEntry {
                        game_id: board.game_id,
                        round,
                        row,
                        column,
                        correct,
                    });
                }
            }

            // Board value comes from the square, not the daily double wager
            questions.push(Question {
                game_id: board.game_id,
                season: board.season.map(str::to_string),
                round,
                row,
                column,
                category: category.to_string(),
                value: board.scheme.value(round, row),
                daily_double_wager: clue.daily_double_wager,
                question: clue.question,
                answer: clue.response.and_then(|r| r.answer),
            });
        }
    }

    Ok((questions, trend))
}

/// `Some(None)` is a triple stumper; `None` means the responder could not be placed.
fn correct_seat(response: &Response, seats: &SeatMap) -> Option<Option<Seat>> {
    match response.right.first() {
        None => Some(None),
        Some(nickname) => match seats.seat_of(nickname) {
            Some(seat) => Some(Some(seat)),
            None => {
                debug!("unknown responder '{}'", nickname);
                None
            }
        },
    }
}

/// Parse one `td.clue` cell. Unrevealed clues return `None`.
pub fn parse_clue_cell(cell: ElementRef) -> Result<Option<ClueCell>> {
    let text_selector = selector("td.clue_text")?;
    let daily_double_selector = selector("td.clue_value_daily_double")?;
    let mouseover_selector = selector("div[onmouseover]")?;

    let mut question = None;
    let mut response_cell = None;
    for td in cell.select(&text_selector) {
        let Some(id) = td.value().id() else {
            continue;
        };
        if id.ends_with("_r") {
            response_cell = Some(td);
        } else if let Some(position) = parse_clue_id(id) {
            question = Some((position, text_of(td)));
        }
    }
    let Some((position, question)) = question else {
        return Ok(None);
    };

    let response = match response_cell {
        Some(td) => Some(read_response(td)?),
        None => match cell
            .select(&mouseover_selector)
            .next()
            .and_then(|div| div.value().attr("onmouseover"))
            .and_then(mouseover_payload)
        {
            Some(payload) => Some(read_response(Html::parse_fragment(&payload).root_element())?),
            None => None,
        },
    };

    let daily_double_wager = cell
        .select(&daily_double_selector)
        .next()
        .and_then(|td| parse_dollars(&text_of(td)));

    Ok(Some(ClueCell {
        position,
        question,
        daily_double_wager,
        response,
    }))
}

/// The HTML passed as the last argument of `toggle(...)` in an `onmouseover` handler.
pub fn mouseover_payload(handler: &str) -> Option<String> {
    let start = handler.find('<')?;
    let end = handler.rfind('>')?;
    if end < start {
        return None;
    }
    Some(handler[start..=end].replace("\\'", "'").replace("\\\"", "\""))
}

pub fn read_response(root: ElementRef) -> Result<Response> {
    let answer_selector = selector("em.correct_response")?;
    let right_selector = selector("td.right")?;
    let wrong_selector = selector("td.wrong")?;

    Ok(Response {
        answer: root
            .select(&answer_selector)
            .next()
            .map(text_of)
            .filter(|a| !a.is_empty()),
        right: root.select(&right_selector).map(text_of).collect(),
        wrong: root.select(&wrong_selector).map(text_of).collect(),
    })
}

fn find_section<'a>(document: &'a Html, round: Round) -> Result<Option<ElementRef<'a>>> {
    let div_selector = selector("div")?;
    Ok(document
        .select(&div_selector)
        .find(|div| div.value().id() == Some(round.section_id())))
}

/// Run `read` over the final round's response markup, from either the hidden
/// `td#clue_FJ_r` cell or the category's `onmouseover` payload.
fn with_final_response<T>(
    document: &Html,
    read: impl FnOnce(ElementRef) -> Result<T>,
) -> Result<Option<T>> {
    let Some(section) = find_section(document, Round::FinalJeopardy)? else {
        return Ok(None);
    };

    let td_selector = selector("td")?;
    if let Some(cell) = section
        .select(&td_selector)
        .find(|td| td.value().id() == Some("clue_FJ_r"))
    {
        return read(cell).map(Some);
    }

    let mouseover_selector = selector("div[onmouseover]")?;
    let payload = section
        .select(&mouseover_selector)
        .next()
        .and_then(|div| div.value().attr("onmouseover"))
        .and_then(mouseover_payload);
    match payload {
        Some(payload) => {
            let fragment = Html::parse_fragment(&payload);
            read(fragment.root_element()).map(Some)
        }
        None => Ok(None),
    }
}

pub fn extract_final_clue(document: &Html, board: &BoardContext) -> Result<Option<Question>> {
    let Some(section) = find_section(document, Round::FinalJeopardy)? else {
        return Ok(None);
    };
    let text_selector = selector("td.clue_text")?;
    let Some(clue) = section
        .select(&text_selector)
        .find(|td| td.value().id() == Some("clue_FJ"))
    else {
        return Ok(None);
    };
    let Some(category) = category_for(board.categories, Round::FinalJeopardy, 1) else {
        return Ok(None);
    };

    let answer = with_final_response(document, read_response)?.and_then(|r| r.answer);

    Ok(Some(Question {
        game_id: board.game_id,
        season: board.season.map(str::to_string),
        round: Round::FinalJeopardy,
        row: 1,
        column: 1,
        category: category.to_string(),
        value: None,
        daily_double_wager: None,
        question: text_of(clue),
        answer,
    }))
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinalWager {
    pub nickname: String,
    pub correct: bool,
    pub wager: Option<i64>,
}

/// Responder cells carry `right`/`wrong`; the attribute-less cells after them hold the wagers.
pub fn final_wagers(root: ElementRef) -> Result<Vec<FinalWager>> {
    let td_selector = selector("td")?;

    let mut responders = Vec::new();
    let mut amounts = Vec::new();
    for td in root.select(&td_selector) {
        if has_class(td, "right") {
            responders.push((text_of(td), true));
        } else if has_class(td, "wrong") {
            responders.push((text_of(td), false));
        } else if td.value().attrs().next().is_none() {
            amounts.push(parse_dollars(&text_of(td)));
        }
    }

    let mut amounts = amounts.into_iter();
    Ok(responders
        .into_iter()
        .map(|(nickname, correct)| FinalWager {
            nickname,
            correct,
            wager: amounts.next().flatten(),
        })
        .collect())
}

/// Read the `(nickname, score)` table following the first `h3` in `section` containing `heading`.
pub fn score_table_after(section: ElementRef, heading: &str) -> Result<Option<Vec<(String, i64)>>> {
    let heading_selector = selector("h3")?;
    let nickname_selector = selector("td.score_player_nickname")?;
    let score_selector = selector("td.score_positive, td.score_negative")?;

    let Some(h3) = section
        .select(&heading_selector)
        .find(|h3| text_of(*h3).contains(heading))
    else {
        return Ok(None);
    };
    let Some(table) = next_sibling_named(h3, "table") else {
        return Ok(None);
    };

    let nicknames = table.select(&nickname_selector).map(text_of);
    let scores = table
        .select(&score_selector)
        .map(|td| parse_score(&text_of(td), has_class(td, "score_negative")));
    Ok(Some(
        nicknames
            .zip(scores)
            .filter_map(|(nickname, score)| score.map(|s| (nickname, s)))
            .collect(),
    ))
}

pub fn extract_final_results(
    document: &Html,
    game_id: u32,
    locations: &[PlayerLocation],
) -> Result<Vec<FinalResult>> {
    let double_jeopardy = find_section(document, Round::DoubleJeopardy)?
        .ok_or(ScrapeError::MissingElement("double_jeopardy_round"))?;
    let entering = score_table_after(double_jeopardy, "Scores at the end")?
        .ok_or(ScrapeError::MissingElement("scores at the end of Double Jeopardy"))?;

    let wagers = with_final_response(document, final_wagers)?.unwrap_or_default();
    let coryat = match find_section(document, Round::FinalJeopardy)? {
        Some(section) => score_table_after(section, "Coryat")?.unwrap_or_default(),
        None => Vec::new(),
    };

    let mut results = Vec::new();
    for (idx, (nickname, pre_final_score)) in entering.into_iter().enumerate() {
        let Some(seat) = Seat::from_index(idx) else {
            break;
        };

        let played = wagers.iter().find(|w| same_name(&w.nickname, &nickname));
        let (wager, correct, final_score) = match played {
            Some(FinalWager {
                wager: Some(amount),
                correct,
                ..
            }) => {
                let final_score = if *correct {
                    pre_final_score + amount
                } else {
                    pre_final_score - amount
                };
                (Some(*amount), Some(*correct), final_score)
            }
            Some(FinalWager { correct, .. }) => (None, Some(*correct), pre_final_score),
            None => (None, None, pre_final_score),
        };

        results.push(FinalResult {
            game_id,
            seat,
            player_id: locations
                .iter()
                .find(|l| l.seat == seat)
                .map(|l| l.player_id),
            coryat: coryat
                .iter()
                .find(|(name, _)| same_name(name, &nickname))
                .map(|(_, score)| *score),
            nickname,
            pre_final_score,
            wager,
            correct,
            final_score,
        });
    }

    Ok(results)
}
