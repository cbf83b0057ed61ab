/// Collapse runs of whitespace (including the newlines left by `<br />`) into single spaces.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a dollar amount such as `$1,000`, `-$200` or `DD: $1,500`.
pub fn parse_dollars(text: &str) -> Option<i64> {
    let text = text.trim();
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    let amount: i64 = digits.parse().ok()?;

    let negative = text.starts_with('-') || text.contains("-$") || text.contains("$-");
    Some(if negative { -amount } else { amount })
}

/// Parse a score cell; `score_negative` cells are negative even when the text lacks a sign.
pub fn parse_score(text: &str, negative_class: bool) -> Option<i64> {
    let amount = parse_dollars(text)?;
    if negative_class && amount > 0 {
        Some(-amount)
    } else {
        Some(amount)
    }
}

/// Split a full name at the first space: "Mary Beth O'Neil" gives ("Mary", "Beth O'Neil").
pub fn split_name(name: &str) -> (String, String) {
    let name = clean_text(name);
    match name.split_once(' ') {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (name, String::new()),
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Blurb {
    pub occupation: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Split the text after a contestant's name, e.g.
/// ", an attorney originally from Chicago, Illinois, now living in Denver, Colorado".
pub fn parse_blurb(text: &str) -> Blurb {
    let mut rest = clean_text(text);
    if let Some(idx) = rest.find(" (") {
        rest.truncate(idx);
    }
    let rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
    let rest = rest
        .strip_prefix("an ")
        .or_else(|| rest.strip_prefix("a "))
        .unwrap_or(rest);

    let (occupation, hometown) = if let Some((occ, origin)) = rest.split_once(" originally from ") {
        let current = origin
            .split_once("now living in ")
            .map(|(_, now)| now)
            .unwrap_or(origin);
        (occ, Some(current))
    } else if let Some((occ, home)) = rest.split_once(" from ") {
        (occ, Some(home))
    } else {
        (rest, None)
    };

    let (city, state) = match hometown.map(trim_trailing) {
        Some(home) => match home.split_once(", ") {
            Some((city, state)) => (non_empty(city), non_empty(trim_trailing(state))),
            None => (non_empty(home), None),
        },
        None => (None, None),
    };

    Blurb {
        occupation: non_empty(trim_trailing(occupation)),
        city,
        state,
    }
}

fn trim_trailing(s: &str) -> &str {
    s.trim().trim_end_matches(',').trim()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
