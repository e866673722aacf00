//! Scoring service tests.

use pairs::clock::{format_clock, parse_clock};
use pairs::scoring::{fetch, submit};
use pairs::{
    PairingMode, ScoreQuery, ScoreRecord, ScoreStore, ScoresResponse, ScoringError,
    ScoringService, SortCriteria, SortOrder,
};

fn record(name: &str, cards: u32, score: u32, time: &str) -> ScoreRecord {
    ScoreRecord {
        name: name.to_string(),
        mode: format!("Same value | {cards}"),
        cards,
        score,
        time: time.to_string(),
    }
}

fn seeded_store() -> ScoreStore {
    let mut store = ScoreStore::new();
    store.save(&record("alice", 20, 40, "00:02:05")).unwrap();
    store.save(&record("bob", 6, 12, "00:00:40")).unwrap();
    store.save(&record("alicia", 26, 75, "00:10:00")).unwrap();
    store
}

fn names(response: &ScoresResponse) -> Vec<&str> {
    response
        .scores
        .iter()
        .map(|record| record.name.as_str())
        .collect()
}

struct OfflineService;

impl ScoringService for OfflineService {
    fn save(&mut self, _record: &ScoreRecord) -> Result<(), ScoringError> {
        Err(ScoringError::Unavailable)
    }

    fn query(&self, _query: &ScoreQuery) -> Result<ScoresResponse, ScoringError> {
        Err(ScoringError::Unavailable)
    }
}

#[test]
fn clock_formatting() {
    assert_eq!(format_clock(0), "00:00:00");
    assert_eq!(format_clock(59), "00:00:59");
    assert_eq!(format_clock(61), "00:01:01");
    assert_eq!(format_clock(3_600 * 5 + 60 * 7 + 3), "05:07:03");

    assert_eq!(parse_clock("05:07:03"), Ok(18_423));
    assert_eq!(parse_clock("00:00"), Err(ScoringError::InvalidTime));
    assert_eq!(parse_clock("00:aa:00"), Err(ScoringError::InvalidTime));
    assert_eq!(parse_clock("00:00:00:00"), Err(ScoringError::InvalidTime));
}

#[test]
fn record_from_session_result() {
    let record = ScoreRecord::new("ada", PairingMode::SameSuitAndValue, 20, 57, 125);

    assert_eq!(record.mode, "Same suit and value | 20");
    assert_eq!(record.time, "00:02:05");

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "ada",
            "mode": "Same suit and value | 20",
            "cards": 20,
            "score": 57,
            "time": "00:02:05",
        })
    );
}

#[test]
fn parse_queries() {
    assert_eq!(ScoreQuery::parse(""), Ok(ScoreQuery::All));
    assert_eq!(
        ScoreQuery::parse("action=filter&name=bob"),
        Ok(ScoreQuery::Filter {
            name: "bob".to_string()
        })
    );
    assert_eq!(ScoreQuery::parse("action=filter&name="), Ok(ScoreQuery::All));
    assert_eq!(
        ScoreQuery::parse("action=sort&criteria=score&order=desc&name=al"),
        Ok(ScoreQuery::Sort {
            criteria: SortCriteria::Score,
            order: SortOrder::Desc,
            name: Some("al".to_string()),
        })
    );
    assert_eq!(
        ScoreQuery::parse("action=sort&criteria=time&order=asc"),
        Ok(ScoreQuery::sort(SortCriteria::Time, SortOrder::Asc, ""))
    );
}

#[test]
fn query_errors() {
    assert_eq!(
        ScoreQuery::parse("action"),
        Err(ScoringError::MalformedQuery)
    );
    assert_eq!(
        ScoreQuery::parse("name=bob"),
        Err(ScoringError::MissingParameter)
    );
    assert_eq!(
        ScoreQuery::parse("action=delete"),
        Err(ScoringError::UnknownAction)
    );
    assert_eq!(
        ScoreQuery::parse("action=sort&order=asc"),
        Err(ScoringError::MissingParameter)
    );
    assert_eq!(
        ScoreQuery::parse("action=sort&criteria=colour&order=asc"),
        Err(ScoringError::UnknownCriteria)
    );
    assert_eq!(
        ScoreQuery::parse("action=sort&criteria=score&order=up"),
        Err(ScoringError::UnknownOrder)
    );
}

#[test]
fn query_strings_match_the_protocol() {
    assert_eq!(ScoreQuery::All.to_query_string(), "");
    assert_eq!(
        ScoreQuery::filter("bob").to_query_string(),
        "action=filter&name=bob"
    );
    assert_eq!(
        ScoreQuery::sort(SortCriteria::Cards, SortOrder::Desc, "al").to_query_string(),
        "action=sort&criteria=cards&order=desc&name=al"
    );
    assert_eq!(
        ScoreQuery::sort(SortCriteria::Name, SortOrder::Asc, "").to_query_string(),
        "action=sort&criteria=name&order=asc"
    );
}

#[test]
fn sort_order_toggles() {
    assert_eq!(SortOrder::default(), SortOrder::Asc);
    assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
    assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
}

#[test]
fn store_filters_by_name_fragment() {
    let store = seeded_store();

    let all = store.query(&ScoreQuery::All).unwrap();
    assert_eq!(names(&all), ["alice", "bob", "alicia"]);

    let filtered = store.query(&ScoreQuery::filter("ali")).unwrap();
    assert_eq!(names(&filtered), ["alice", "alicia"]);

    let none = store.query(&ScoreQuery::filter("zed")).unwrap();
    assert!(none.scores.is_empty());
}

#[test]
fn store_sorts_by_criteria() {
    let store = seeded_store();

    let by_score = store
        .query(&ScoreQuery::sort(SortCriteria::Score, SortOrder::Desc, ""))
        .unwrap();
    assert_eq!(names(&by_score), ["alicia", "alice", "bob"]);

    let by_time = store
        .query(&ScoreQuery::sort(SortCriteria::Time, SortOrder::Asc, ""))
        .unwrap();
    assert_eq!(names(&by_time), ["bob", "alice", "alicia"]);
    assert_eq!(by_time.scores[0].time, "00:00:40");

    let by_name = store
        .query(&ScoreQuery::sort(SortCriteria::Name, SortOrder::Desc, "ali"))
        .unwrap();
    assert_eq!(names(&by_name), ["alicia", "alice"]);
}

#[test]
fn store_rejects_bad_times() {
    let mut store = ScoreStore::new();
    assert_eq!(
        store.save(&record("ada", 6, 1, "soon")),
        Err(ScoringError::InvalidTime)
    );
    assert!(store.is_empty());
}

#[test]
fn handle_speaks_the_wire_protocol() {
    let mut store = ScoreStore::new();

    let body = r#"{"name":"ada","mode":"Same value | 6","cards":6,"time":"00:01:10","score":9}"#;
    assert_eq!(store.handle("POST", "", body), Ok(None));
    assert_eq!(store.len(), 1);

    let response = store.handle("GET", "", "").unwrap().unwrap();
    let parsed: ScoresResponse = serde_json::from_str(&response).unwrap();
    assert_eq!(parsed.scores, vec![record("ada", 6, 9, "00:01:10")]);

    let filtered = store.handle("GET", "action=filter&name=bob", "").unwrap().unwrap();
    assert_eq!(filtered, r#"{"scores":[]}"#);

    assert_eq!(
        store.handle("POST", "", "{not json"),
        Err(ScoringError::MalformedBody)
    );
    assert_eq!(
        store.handle("DELETE", "", ""),
        Err(ScoringError::UnsupportedMethod)
    );
}

#[test]
fn failures_are_not_fatal() {
    let mut offline = OfflineService;
    assert!(!submit(&mut offline, &record("ada", 6, 1, "00:00:01")));
    assert_eq!(fetch(&offline, &ScoreQuery::All), None);

    let mut store = ScoreStore::new();
    assert!(submit(&mut store, &record("ada", 6, 1, "00:00:01")));
    assert_eq!(fetch(&store, &ScoreQuery::All).map(|r| r.scores.len()), Some(1));
}
