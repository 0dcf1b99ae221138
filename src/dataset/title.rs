// Title normalization — turns "Toy Story (1995)" into a join key.
//
// Source titles follow "<Title> (<Year>)", but real catalogs append extra
// parenthesized groups after the year (alternate titles, editions). We split
// on the first "(" and keep what comes before it as the title, take the text
// up to the next ")" as the year, and drop everything after that.
//
// The lowercase clean title is the lookup key everywhere else in the crate.
// The original casing is kept separately for display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The result of normalizing one raw title string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTitle {
    /// Title text before the first "(", trimmed, original casing
    pub display_title: String,
    /// Lowercased display title, used as the canonical key
    pub clean_title: String,
    /// Year text from the first parenthesized group (None if absent or empty)
    pub year: Option<String>,
}

/// A title that could not be parsed cleanly.
///
/// The load never aborts on one of these; the partial parse is used instead
/// and the anomaly is counted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleAnomaly {
    #[error("unmatched '(' in title {raw:?}")]
    UnmatchedParen { raw: String, partial: ParsedTitle },
}

impl TitleAnomaly {
    /// Best-effort parse recovered from the malformed title.
    pub fn partial(&self) -> &ParsedTitle {
        match self {
            TitleAnomaly::UnmatchedParen { partial, .. } => partial,
        }
    }

    /// Consume the anomaly, keeping only the partial parse.
    pub fn into_partial(self) -> ParsedTitle {
        match self {
            TitleAnomaly::UnmatchedParen { partial, .. } => partial,
        }
    }
}

/// Parse a raw "Title (Year)" string.
///
/// A title without any "(" is returned whole with `year = None`. A "(" with
/// no closing ")" after it is reported as [`TitleAnomaly::UnmatchedParen`].
pub fn parse_title(raw: &str) -> Result<ParsedTitle, TitleAnomaly> {
    let Some(open) = raw.find('(') else {
        return Ok(build(raw, None));
    };

    let head = &raw[..open];
    let rest = &raw[open + 1..];

    match rest.find(')') {
        Some(close) => Ok(build(head, Some(&rest[..close]))),
        None => Err(TitleAnomaly::UnmatchedParen {
            raw: raw.to_string(),
            partial: build(head, Some(rest)),
        }),
    }
}

/// Parse a title, falling back to the partial parse on anomalies.
///
/// Returns the parse plus whether an anomaly was hit, for callers that only
/// need to count them.
pub fn parse_title_lenient(raw: &str) -> (ParsedTitle, Option<TitleAnomaly>) {
    match parse_title(raw) {
        Ok(parsed) => (parsed, None),
        Err(anomaly) => (anomaly.partial().clone(), Some(anomaly)),
    }
}

/// Normalize free user input (e.g. a typed movie name) into a clean-title key.
pub fn clean_key(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Split a pipe-delimited genre string into tokens.
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

fn build(head: &str, year: Option<&str>) -> ParsedTitle {
    let display_title = head.trim().to_string();
    let clean_title = display_title.to_lowercase();
    let year = year
        .map(str::trim)
        .filter(|y| !y.is_empty())
        .map(str::to_string);

    ParsedTitle {
        display_title,
        clean_title,
        year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        let parsed = parse_title("Toy Story (1995)").unwrap();
        assert_eq!(parsed.clean_title, "toy story");
        assert_eq!(parsed.display_title, "Toy Story");
        assert_eq!(parsed.year.as_deref(), Some("1995"));
    }

    #[test]
    fn test_trailing_parenthetical_discarded() {
        let parsed = parse_title("Dr. Strangelove (1964) (Special Edition)").unwrap();
        assert_eq!(parsed.clean_title, "dr. strangelove");
        assert_eq!(parsed.year.as_deref(), Some("1964"));
    }

    #[test]
    fn test_no_parenthesis() {
        let parsed = parse_title("Cosmos").unwrap();
        assert_eq!(parsed.clean_title, "cosmos");
        assert_eq!(parsed.year, None);
    }

    #[test]
    fn test_unmatched_paren_keeps_partial() {
        let err = parse_title("Broken Title (1999").unwrap_err();
        let partial = err.partial();
        assert_eq!(partial.clean_title, "broken title");
        assert_eq!(partial.year.as_deref(), Some("1999"));
    }

    #[test]
    fn test_split_genres() {
        assert_eq!(
            split_genres("Adventure|Animation|Children"),
            vec!["Adventure", "Animation", "Children"]
        );
        assert!(split_genres("").is_empty());
    }
}
