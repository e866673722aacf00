//! Score records and the scoring service protocol.
//!
//! A finished session produces a [`ScoreRecord`]. Records are handed to a
//! [`ScoringService`], which stores them and answers filter and sort
//! queries with a [`ScoresResponse`]. [`ScoreStore`] is an in-memory
//! service that also speaks the wire form of the protocol through
//! [`ScoreStore::handle`].

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{format_clock, parse_clock};
use crate::error::ScoringError;
use crate::options::PairingMode;

/// Result of one finished session, as persisted by the scoring service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Player name.
    pub name: String,
    /// Mode label and board size, e.g. `Same value | 20`.
    pub mode: String,
    /// Number of cards on the board.
    pub cards: u32,
    /// Final score.
    pub score: u32,
    /// Elapsed time as `HH:MM:SS`.
    pub time: String,
}

impl ScoreRecord {
    /// Builds a record for a finished session.
    #[must_use]
    pub fn new(name: &str, mode: PairingMode, cards: u32, score: u32, elapsed: u32) -> Self {
        Self {
            name: name.to_string(),
            mode: format!("{} | {cards}", mode.label()),
            cards,
            score,
            time: format_clock(elapsed),
        }
    }
}

/// Body of every query response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoresResponse {
    /// Matching records.
    pub scores: Vec<ScoreRecord>,
}

/// Record field a query can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortCriteria {
    /// Player name.
    Name,
    /// Mode label.
    Mode,
    /// Board size.
    Cards,
    /// Final score.
    Score,
    /// Elapsed time.
    Time,
}

impl SortCriteria {
    /// Returns the query string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Mode => "mode",
            Self::Cards => "cards",
            Self::Score => "score",
            Self::Time => "time",
        }
    }
}

impl FromStr for SortCriteria {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "mode" => Ok(Self::Mode),
            "cards" => Ok(Self::Cards),
            "score" => Ok(Self::Score),
            "time" => Ok(Self::Time),
            _ => Err(ScoringError::UnknownCriteria),
        }
    }
}

/// Sort direction.
///
/// `asc` in a query string always means smallest first. Score services that
/// sort `asc` as reversed order answer the opposite of this store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    /// Returns the opposite order.
    ///
    /// Score tables flip the order every time a column header is clicked.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Returns the query string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ScoringError::UnknownOrder),
        }
    }
}

/// A read request against the scoring service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScoreQuery {
    /// Every record.
    #[default]
    All,
    /// Records whose player name contains `name`.
    Filter {
        /// Name fragment.
        name: String,
    },
    /// Records sorted by a field, optionally filtered by name.
    Sort {
        /// Field to sort by.
        criteria: SortCriteria,
        /// Sort direction.
        order: SortOrder,
        /// Optional name fragment.
        name: Option<String>,
    },
}

impl ScoreQuery {
    /// Builds a name filter; an empty name queries every record.
    #[must_use]
    pub fn filter(name: &str) -> Self {
        if name.is_empty() {
            Self::All
        } else {
            Self::Filter {
                name: name.to_string(),
            }
        }
    }

    /// Builds a sort, filtered by `name` when it is not empty.
    #[must_use]
    pub fn sort(criteria: SortCriteria, order: SortOrder, name: &str) -> Self {
        Self::Sort {
            criteria,
            order,
            name: (!name.is_empty()).then(|| name.to_string()),
        }
    }

    /// Parses a query string such as `action=sort&criteria=score&order=asc`.
    ///
    /// An empty query string means [`ScoreQuery::All`].
    ///
    /// # Errors
    ///
    /// Returns an error if a pair has no `=`, the action is missing or
    /// unknown, or the sort parameters are missing or invalid.
    pub fn parse(query: &str) -> Result<Self, ScoringError> {
        if query.is_empty() {
            return Ok(Self::All);
        }

        let mut action = None;
        let mut name = None;
        let mut criteria = None;
        let mut order = None;

        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').ok_or(ScoringError::MalformedQuery)?;
            match key {
                "action" => action = Some(value),
                "name" => name = Some(value),
                "criteria" => criteria = Some(value),
                "order" => order = Some(value),
                _ => {}
            }
        }

        let name = name.unwrap_or_default();
        match action.ok_or(ScoringError::MissingParameter)? {
            "filter" => Ok(Self::filter(name)),
            "sort" => {
                let criteria = criteria.ok_or(ScoringError::MissingParameter)?.parse()?;
                let order = order.ok_or(ScoringError::MissingParameter)?.parse()?;
                Ok(Self::sort(criteria, order, name))
            }
            _ => Err(ScoringError::UnknownAction),
        }
    }

    /// Renders the query string form of the request.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        match self {
            Self::All => String::new(),
            Self::Filter { name } => format!("action=filter&name={name}"),
            Self::Sort {
                criteria,
                order,
                name,
            } => {
                let mut query = format!(
                    "action=sort&criteria={}&order={}",
                    criteria.as_str(),
                    order.as_str()
                );
                if let Some(name) = name {
                    query.push_str("&name=");
                    query.push_str(name);
                }
                query
            }
        }
    }
}

/// Stores finished sessions and answers score queries.
pub trait ScoringService {
    /// Persists a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is invalid or the service is
    /// unavailable.
    fn save(&mut self, record: &ScoreRecord) -> Result<(), ScoringError>;

    /// Answers a query.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unavailable.
    fn query(&self, query: &ScoreQuery) -> Result<ScoresResponse, ScoringError>;
}

/// Saves a record, logging instead of failing.
///
/// Returns whether the record was stored.
pub fn submit<S: ScoringService + ?Sized>(service: &mut S, record: &ScoreRecord) -> bool {
    match service.save(record) {
        Ok(()) => {
            debug!(name = %record.name, score = record.score, "score saved");
            true
        }
        Err(err) => {
            warn!(error = %err, name = %record.name, "failed to save score");
            false
        }
    }
}

/// Runs a query, logging instead of failing.
///
/// A failed query yields `None`, leaving whatever the caller displays
/// unchanged.
pub fn fetch<S: ScoringService + ?Sized>(service: &S, query: &ScoreQuery) -> Option<ScoresResponse> {
    service
        .query(query)
        .inspect_err(|err| warn!(error = %err, "failed to load scores"))
        .ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredScore {
    name: String,
    mode: String,
    cards: u32,
    score: u32,
    seconds: u32,
}

impl StoredScore {
    fn to_record(&self) -> ScoreRecord {
        ScoreRecord {
            name: self.name.clone(),
            mode: self.mode.clone(),
            cards: self.cards,
            score: self.score,
            time: format_clock(self.seconds),
        }
    }

    fn compare(&self, other: &Self, criteria: SortCriteria) -> Ordering {
        match criteria {
            SortCriteria::Name => self.name.cmp(&other.name),
            SortCriteria::Mode => self.mode.cmp(&other.mode),
            SortCriteria::Cards => self.cards.cmp(&other.cards),
            SortCriteria::Score => self.score.cmp(&other.score),
            SortCriteria::Time => self.seconds.cmp(&other.seconds),
        }
    }
}

/// In-memory scoring service.
///
/// Times are kept as seconds so that sorting by time is numeric.
#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    entries: Vec<StoredScore>,
}

impl ScoreStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handles one request in wire form.
    ///
    /// `GET` answers the query string with a JSON [`ScoresResponse`].
    /// `POST` saves the JSON [`ScoreRecord`] in `body` and has no response
    /// body.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown methods, malformed queries or bodies,
    /// and invalid times.
    pub fn handle(
        &mut self,
        method: &str,
        query: &str,
        body: &str,
    ) -> Result<Option<String>, ScoringError> {
        match method {
            "GET" => {
                let response = self.query(&ScoreQuery::parse(query)?)?;
                serde_json::to_string(&response)
                    .map(Some)
                    .map_err(|_| ScoringError::Encoding)
            }
            "POST" => {
                let record: ScoreRecord =
                    serde_json::from_str(body).map_err(|_| ScoringError::MalformedBody)?;
                self.save(&record)?;
                Ok(None)
            }
            _ => Err(ScoringError::UnsupportedMethod),
        }
    }

    fn matching<'a>(&'a self, name: Option<&'a str>) -> impl Iterator<Item = &'a StoredScore> {
        self.entries
            .iter()
            .filter(move |entry| name.is_none_or(|name| entry.name.contains(name)))
    }
}

impl ScoringService for ScoreStore {
    fn save(&mut self, record: &ScoreRecord) -> Result<(), ScoringError> {
        let seconds = parse_clock(&record.time)?;
        self.entries.push(StoredScore {
            name: record.name.clone(),
            mode: record.mode.clone(),
            cards: record.cards,
            score: record.score,
            seconds,
        });
        Ok(())
    }

    fn query(&self, query: &ScoreQuery) -> Result<ScoresResponse, ScoringError> {
        let scores = match query {
            ScoreQuery::All => self.matching(None).map(StoredScore::to_record).collect(),
            ScoreQuery::Filter { name } => self
                .matching(Some(name))
                .map(StoredScore::to_record)
                .collect(),
            ScoreQuery::Sort {
                criteria,
                order,
                name,
            } => {
                let mut entries: Vec<&StoredScore> = self.matching(name.as_deref()).collect();
                entries.sort_by(|a, b| match order {
                    SortOrder::Asc => a.compare(b, *criteria),
                    SortOrder::Desc => b.compare(a, *criteria),
                });
                entries.into_iter().map(StoredScore::to_record).collect()
            }
        };

        Ok(ScoresResponse { scores })
    }
}
