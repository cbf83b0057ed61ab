use super::fixtures::{self, sample_game};
use super::save_failed_html;
use crate::error::ScrapeError;
use crate::extract::{
    final_wagers, mouseover_payload, parse_clue_cell, parse_game, parse_title, read_response,
    FinalWager,
};
use crate::model::{Round, Seat};
use anyhow::Result;
use chrono::NaiveDate;
use scraper::{Html, Selector};

#[test]
fn test_sample_game_parsing() {
    let html = fixtures::load_html_fixture("sample_game");
    let result = parse_game(&html, 5599, Some("33"));

    if let Err(e) = &result {
        println!("Error: {}", e);
        save_failed_html(&html, "sample_game_test").unwrap();
    }

    assert!(
        result.is_ok(),
        "Failed to parse sample game: {:?}",
        result.err()
    );

    let game = result.unwrap();
    assert_eq!(game.game_id, 5599);
    assert_eq!(game.season.as_deref(), Some("33"));
    assert_eq!(game.show_number, Some(7366));
    assert_eq!(game.air_date, NaiveDate::from_ymd_opt(2016, 9, 12));
    assert_eq!(game.questions.len(), 8);
    assert_eq!(game.trend.len(), 7);
    assert_eq!(game.final_results.len(), 3);
}

#[test]
fn test_contestants() {
    let game = sample_game();
    assert_eq!(game.contestants.len(), 3);

    let sam = &game.contestants[0];
    assert_eq!(sam.player_id, 9001);
    assert_eq!(sam.first_name, "Sam");
    assert_eq!(sam.last_name, "Rivera");
    assert_eq!(sam.occupation.as_deref(), Some("software engineer"));
    assert_eq!(sam.city.as_deref(), Some("Portland"));
    assert_eq!(sam.state.as_deref(), Some("Oregon"));

    let priya = &game.contestants[1];
    assert_eq!(priya.occupation.as_deref(), Some("attorney"));
    assert_eq!(priya.city.as_deref(), Some("Denver"));

    let mary_beth = &game.contestants[2];
    assert_eq!(mary_beth.first_name, "Mary");
    assert_eq!(mary_beth.last_name, "Beth O'Neil");
    assert_eq!(mary_beth.state.as_deref(), Some("Massachusetts"));
}

#[test]
fn test_locations_run_right_to_left() {
    let game = sample_game();
    let seats: Vec<_> = game
        .locations
        .iter()
        .map(|l| (l.player_id, l.seat))
        .collect();
    assert_eq!(
        seats,
        vec![(9001, Seat::Right), (9002, Seat::Middle), (9003, Seat::Left)]
    );
    assert!(game.locations.iter().all(|l| l.game_id == 5599));
}

#[test]
fn test_jeopardy_round_questions() {
    let game = sample_game();
    let first = &game.questions[0];
    assert_eq!(first.round, Round::Jeopardy);
    assert_eq!((first.column, first.row), (1, 1));
    assert_eq!(first.category, "POTENT POTABLES");
    assert_eq!(first.value, Some(200));
    assert_eq!(first.question, "This mixer is made with tomato juice");
    assert_eq!(first.answer.as_deref(), Some("a Bloody Mary"));
    assert_eq!(first.daily_double_wager, None);

    let daily_double = game
        .questions
        .iter()
        .find(|q| q.round == Round::Jeopardy && q.column == 6)
        .unwrap();
    assert_eq!(daily_double.category, "RHYME TIME");
    assert_eq!(daily_double.value, Some(1000));
    assert_eq!(daily_double.daily_double_wager, Some(1500));
    assert_eq!(daily_double.answer.as_deref(), Some("a mouse's house"));
}

#[test]
fn test_double_jeopardy_questions_from_response_cells() {
    let game = sample_game();
    let opera = game
        .questions
        .iter()
        .find(|q| q.round == Round::DoubleJeopardy && q.column == 1 && q.row == 1)
        .unwrap();
    assert_eq!(opera.category, "OPERA");
    assert_eq!(opera.value, Some(400));
    assert_eq!(opera.answer.as_deref(), Some("Aida"));

    let poets = game
        .questions
        .iter()
        .find(|q| q.round == Round::DoubleJeopardy && q.column == 5)
        .unwrap();
    assert_eq!(poets.value, Some(1600));
    assert_eq!(poets.question, "He wrote \"The Raven\"");
}

#[test]
fn test_final_question_has_no_value() {
    let game = sample_game();
    let last = game.questions.last().unwrap();
    assert_eq!(last.round, Round::FinalJeopardy);
    assert_eq!(last.category, "FAMOUS SHIPS");
    assert_eq!(last.value, None);
    assert_eq!(
        last.question,
        "This ship carried 102 passengers to Plymouth in 1620"
    );
    assert_eq!(last.answer.as_deref(), Some("the Mayflower"));
}

#[test]
fn test_trend_seats_and_triple_stumpers() {
    let game = sample_game();
    let trend: Vec<_> = game
        .trend
        .iter()
        .map(|t| (t.round, t.column, t.row, t.correct))
        .collect();
    assert_eq!(
        trend,
        vec![
            (Round::Jeopardy, 1, 1, Some(Seat::Right)),
            (Round::Jeopardy, 3, 2, Some(Seat::Middle)),
            (Round::Jeopardy, 2, 3, None),
            (Round::Jeopardy, 6, 5, Some(Seat::Left)),
            (Round::DoubleJeopardy, 1, 1, Some(Seat::Middle)),
            (Round::DoubleJeopardy, 4, 3, Some(Seat::Left)),
            (Round::DoubleJeopardy, 5, 4, None),
        ]
    );
}

#[test]
fn test_final_results() {
    let game = sample_game();
    let results = &game.final_results;

    let mary_beth = &results[0];
    assert_eq!(mary_beth.seat, Seat::Left);
    assert_eq!(mary_beth.nickname, "Mary Beth");
    assert_eq!(mary_beth.player_id, Some(9003));
    assert_eq!(mary_beth.pre_final_score, 12000);
    assert_eq!(mary_beth.wager, Some(7000));
    assert_eq!(mary_beth.correct, Some(true));
    assert_eq!(mary_beth.final_score, 19000);
    assert_eq!(mary_beth.coryat, Some(11000));

    let priya = &results[1];
    assert_eq!(priya.seat, Seat::Middle);
    assert_eq!(priya.wager, Some(9400));
    assert_eq!(priya.correct, Some(false));
    assert_eq!(priya.final_score, 0);

    let sam = &results[2];
    assert_eq!(sam.seat, Seat::Right);
    assert_eq!(sam.pre_final_score, -400);
    assert_eq!(sam.wager, None);
    assert_eq!(sam.correct, None);
    assert_eq!(sam.final_score, -400);
    assert_eq!(sam.coryat, Some(-400));
}

#[test]
fn test_final_round_from_response_cell() {
    let html = fixtures::load_html_fixture("sample_game");

    // Drop the category's mouseover handler and reveal the response in a hidden cell instead
    let start = html.find("<div onmouseover=\"toggle('clue_FJ'").unwrap();
    let tag_end = "1620')\">";
    let end = start + html[start..].find(tag_end).unwrap() + tag_end.len();
    let question_row = r#"<tr><td id="clue_FJ" class="clue_text">This ship carried 102 passengers to Plymouth in 1620</td></tr>"#;
    let response_row = r#"<tr><td id="clue_FJ_r" class="clue_text" style="display:none;"><table width="100%"><tr><td class="right">Mary Beth</td><td rowspan="2" valign="top">What is the Mayflower?</td></tr><tr><td>$7,000</td></tr><tr><td class="wrong">Priya</td><td rowspan="2" valign="top">What is the Titanic?</td></tr><tr><td>$9,400</td></tr></table><em class="correct_response">the <i>Mayflower</i></em></td></tr>"#;
    let html = format!("{}<div>{}", &html[..start], &html[end..])
        .replace(question_row, &format!("{}{}", question_row, response_row));
    assert!(!html.contains("toggle('clue_FJ'"));
    assert!(html.contains("clue_FJ_r"));

    let game = parse_game(&html, 5599, Some("33")).unwrap();

    let last = game.questions.last().unwrap();
    assert_eq!(last.round, Round::FinalJeopardy);
    assert_eq!(last.category, "FAMOUS SHIPS");
    assert_eq!(last.answer.as_deref(), Some("the Mayflower"));

    let mary_beth = &game.final_results[0];
    assert_eq!(mary_beth.wager, Some(7000));
    assert_eq!(mary_beth.correct, Some(true));
    assert_eq!(mary_beth.final_score, 19000);

    let priya = &game.final_results[1];
    assert_eq!(priya.wager, Some(9400));
    assert_eq!(priya.correct, Some(false));
    assert_eq!(priya.final_score, 0);

    let sam = &game.final_results[2];
    assert_eq!(sam.wager, None);
    assert_eq!(sam.final_score, -400);
}

#[test]
fn test_unknown_responder_drops_trend_entry() {
    let right_sam = "<td class=&quot;right&quot;>Sam</td>";
    let fixture = fixtures::load_html_fixture("sample_game");
    assert_eq!(fixture.matches(right_sam).count(), 1);
    let html = fixture.replace(right_sam, "<td class=&quot;right&quot;>Samuel</td>");

    let game = parse_game(&html, 5599, Some("33")).unwrap();

    // Not recorded as a stumper, just left out
    assert_eq!(game.trend.len(), 6);
    assert!(!game
        .trend
        .iter()
        .any(|t| t.round == Round::Jeopardy && t.column == 1 && t.row == 1));
    assert_eq!(game.trend.iter().filter(|t| t.correct.is_none()).count(), 2);

    let question = game
        .questions
        .iter()
        .find(|q| q.round == Round::Jeopardy && q.column == 1 && q.row == 1)
        .unwrap();
    assert_eq!(question.answer.as_deref(), Some("a Bloody Mary"));
    assert_eq!(game.questions.len(), 8);
}

#[test]
fn test_unlinked_contestant_keeps_other_seats() {
    let html = fixtures::load_html_fixture("sample_game").replace(
        r#"<a href="showplayer.php?player_id=9001">Sam Rivera</a>"#,
        "Sam Rivera",
    );

    let game = parse_game(&html, 5599, Some("33")).unwrap();
    assert_eq!(game.contestants.len(), 2);

    let seats: Vec<_> = game
        .locations
        .iter()
        .map(|l| (l.player_id, l.seat))
        .collect();
    assert_eq!(seats, vec![(9002, Seat::Middle), (9003, Seat::Left)]);

    assert_eq!(game.final_results[0].player_id, Some(9003));
    assert_eq!(game.final_results[1].player_id, Some(9002));
    assert_eq!(game.final_results[2].player_id, None);
}

#[test]
fn test_incomplete_board_is_rejected() {
    let html = r#"
    <html>
    <body>
        <div id="game_title"><h1>Show #1 - Monday, September 10, 1984</h1></div>
        <table class="round">
            <tr><td class="category_name">ONLY</td><td class="category_name">TWO</td></tr>
        </table>
    </body>
    </html>
    "#;

    let result = parse_game(html, 1, None);
    assert!(matches!(
        result,
        Err(ScrapeError::IncompleteBoard {
            found: 2,
            needed: 13
        })
    ));
}

#[test]
fn test_missing_double_jeopardy_scores() {
    let categories: String = (1..=13)
        .map(|n| format!("<td class=\"category_name\">C{}</td>", n))
        .collect();
    let html = format!(
        r#"<html><body>
        <div id="jeopardy_round"><table class="round"><tr>{}</tr></table></div>
        <div id="double_jeopardy_round"><h2>Double Jeopardy! Round</h2></div>
        </body></html>"#,
        categories
    );

    let result = parse_game(&html, 2, None);
    assert!(matches!(result, Err(ScrapeError::MissingElement(_))));
}

#[test]
fn test_classic_game_uses_classic_values() {
    let html = fixtures::load_html_fixture("sample_game")
        .replace("Monday, September 12, 2016", "Monday, September 12, 1994");
    let game = parse_game(&html, 100, Some("11")).unwrap();
    assert_eq!(game.questions[0].value, Some(100));
    assert_eq!(game.air_date, NaiveDate::from_ymd_opt(1994, 9, 12));
}

#[test]
fn test_parse_title() {
    assert_eq!(
        parse_title("Show #7366 - Monday, September 12, 2016"),
        (Some(7366), NaiveDate::from_ymd_opt(2016, 9, 12))
    );
    assert_eq!(parse_title("Super Jeopardy! pilot"), (None, None));
}

#[test]
fn test_mouseover_payload_unescapes_quotes() {
    let handler = r#"toggle('clue_J_1_1', 'clue_J_1_1_stuck', '<em class="correct_response">Noah\'s ark</em>')"#;
    assert_eq!(
        mouseover_payload(handler).as_deref(),
        Some(r#"<em class="correct_response">Noah's ark</em>"#)
    );
    assert_eq!(mouseover_payload("toggle('clue_J_1_1')"), None);
}

#[test]
fn test_unrevealed_clue_cell() -> Result<()> {
    let document = Html::parse_fragment(r#"<table><tr><td class="clue"></td></tr></table>"#);
    let clue_selector = Selector::parse("td.clue").unwrap();
    let cell = document.select(&clue_selector).next().unwrap();

    assert_eq!(parse_clue_cell(cell)?, None);
    Ok(())
}

#[test]
fn test_final_wagers_pair_in_order() -> Result<()> {
    let fragment = Html::parse_fragment(
        r#"<table>
        <tr><td class="wrong">Alex</td><td rowspan="2">What is Rome?</td></tr>
        <tr><td>$2,000</td></tr>
        <tr><td class="right">Ken</td><td rowspan="2">What is Paris?</td></tr>
        <tr><td>$0</td></tr>
        </table>"#,
    );

    let wagers = final_wagers(fragment.root_element())?;
    assert_eq!(
        wagers,
        vec![
            FinalWager {
                nickname: "Alex".to_string(),
                correct: false,
                wager: Some(2000),
            },
            FinalWager {
                nickname: "Ken".to_string(),
                correct: true,
                wager: Some(0),
            },
        ]
    );

    let response = read_response(fragment.root_element())?;
    assert_eq!(response.right, vec!["Ken".to_string()]);
    assert_eq!(response.wrong, vec!["Alex".to_string()]);
    assert_eq!(response.answer, None);
    Ok(())
}

// Regression tests - load failing pages from the failures directory
#[test]
fn test_regression_failures() -> Result<()> {
    use std::fs;
    use std::path::Path;

    let failures_dir = Path::new("src/tests/fixtures/failures");
    if !failures_dir.exists() {
        return Ok(());
    }

    let mut failures: Vec<String> = Vec::new();
    for entry in fs::read_dir(failures_dir)? {
        let path = entry?.path();
        if path.extension().map_or(false, |ext| ext == "html") {
            let filename = path.file_stem().unwrap().to_string_lossy().to_string();
            println!("Testing regression case: {}", filename);

            if let Some(html) = fixtures::load_failure_html(&filename) {
                match parse_game(&html, 0, None) {
                    Ok(_) => println!("✅ Previously failing case now passes: {}", filename),
                    Err(e) => failures.push(format!("❌ Still failing: {} - {}", filename, e)),
                }
            }
        }
    }
    if !failures.is_empty() {
        return Err(anyhow::anyhow!(failures.join("\n")));
    }

    Ok(())
}
