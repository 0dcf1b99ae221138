// Unit tests for title normalization and genre splitting.
//
// Covers the documented round-trips, titles with extra parenthesized groups,
// and the anomaly path for unmatched parentheses.

use cinematch::dataset::title::{
    clean_key, parse_title, parse_title_lenient, split_genres, TitleAnomaly,
};

// ============================================================
// parse_title — well-formed titles
// ============================================================

#[test]
fn toy_story_round_trip() {
    let parsed = parse_title("Toy Story (1995)").unwrap();
    assert_eq!(parsed.clean_title, "toy story");
    assert_eq!(parsed.year.as_deref(), Some("1995"));
}

#[test]
fn trailing_parenthetical_is_discarded() {
    let parsed = parse_title("Dr. Strangelove (1964) (Special Edition)").unwrap();
    assert_eq!(parsed.clean_title, "dr. strangelove");
    assert_eq!(parsed.display_title, "Dr. Strangelove");
    assert_eq!(parsed.year.as_deref(), Some("1964"));
}

#[test]
fn display_title_keeps_casing() {
    let parsed = parse_title("American President, The (1995)").unwrap();
    assert_eq!(parsed.display_title, "American President, The");
    assert_eq!(parsed.clean_title, "american president, the");
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let parsed = parse_title("  Heat   ( 1995 ) ").unwrap();
    assert_eq!(parsed.clean_title, "heat");
    assert_eq!(parsed.year.as_deref(), Some("1995"));
}

#[test]
fn no_parenthesis_means_no_year() {
    let parsed = parse_title("Hyena Road").unwrap();
    assert_eq!(parsed.clean_title, "hyena road");
    assert_eq!(parsed.year, None);
}

#[test]
fn empty_parentheses_mean_no_year() {
    let parsed = parse_title("Untitled ()").unwrap();
    assert_eq!(parsed.clean_title, "untitled");
    assert_eq!(parsed.year, None);
}

#[test]
fn alternate_title_before_year_is_taken_as_year_field() {
    // Only the first group is read; later groups are dropped
    let parsed = parse_title("City of Lost Children (Cité des enfants perdus) (1995)").unwrap();
    assert_eq!(parsed.clean_title, "city of lost children");
    assert_eq!(parsed.year.as_deref(), Some("Cité des enfants perdus"));
}

// ============================================================
// parse_title — anomalies
// ============================================================

#[test]
fn unmatched_paren_is_reported() {
    let err = parse_title("Broken (1999").unwrap_err();
    assert!(matches!(err, TitleAnomaly::UnmatchedParen { .. }));
    assert!(err.to_string().contains("unmatched"));
}

#[test]
fn lenient_parse_uses_partial() {
    let (parsed, anomaly) = parse_title_lenient("Broken (1999");
    assert!(anomaly.is_some());
    assert_eq!(parsed.clean_title, "broken");
    assert_eq!(parsed.year.as_deref(), Some("1999"));
}

#[test]
fn lenient_parse_of_clean_title_has_no_anomaly() {
    let (parsed, anomaly) = parse_title_lenient("Heat (1995)");
    assert!(anomaly.is_none());
    assert_eq!(parsed.clean_title, "heat");
}

#[test]
fn into_partial_returns_best_effort_parse() {
    let partial = parse_title("Open ended (").unwrap_err().into_partial();
    assert_eq!(partial.clean_title, "open ended");
    assert_eq!(partial.year, None);
}

// ============================================================
// clean_key / split_genres
// ============================================================

#[test]
fn clean_key_matches_parse_output() {
    assert_eq!(clean_key("  Toy STORY "), "toy story");
}

#[test]
fn split_genres_tokens() {
    assert_eq!(split_genres("Comedy"), vec!["Comedy"]);
    assert_eq!(split_genres("Action||Thriller|"), vec!["Action", "Thriller"]);
}

#[test]
fn split_genres_keeps_placeholder_token() {
    assert_eq!(
        split_genres("(no genres listed)"),
        vec!["(no genres listed)"]
    );
}
