use pairs::{
    Board, Card, FaceState, FlipOutcome, PairOutcome, PairingMode, Resolution, RevealedPair,
    ScoreRecord, Session, SessionOptions, SessionState,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
    pending: Option<RevealedPair>,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        Self {
            session: Session::new(SessionOptions::default(), seed as u64),
            pending: None,
        }
    }

    pub fn reset(&mut self, seed: u32) {
        self.session = Session::new(SessionOptions::default(), seed as u64);
        self.pending = None;
    }

    pub fn configure(&self, mode: &str, cards: u32) -> Result<(), JsValue> {
        let mode = parse_mode(mode)?;
        let options = SessionOptions::default()
            .with_mode(mode)
            .with_board_size(cards as usize);
        self.session.configure(options).map_err(js_err)
    }

    pub fn start(&mut self, player: &str) -> Result<(), JsValue> {
        self.pending = None;
        self.session.start(player).map_err(js_err)
    }

    pub fn tick(&self) -> Option<u32> {
        self.session.tick()
    }

    pub fn reveal_delay_ms(&self) -> u32 {
        self.session.reveal_delay().as_millis() as u32
    }

    /// Flips the card with the given `value-suit` key.
    pub fn flip(&mut self, key: &str) -> Result<JsValue, JsValue> {
        let card = Card::from_key(key).map_err(js_err)?;
        let outcome = self.session.flip(&card).map_err(js_err)?;

        let view = match outcome {
            FlipOutcome::Ignored => JsFlip {
                outcome: "ignored",
                matched: None,
            },
            FlipOutcome::Shown => JsFlip {
                outcome: "shown",
                matched: None,
            },
            FlipOutcome::PairShown(pair) => {
                self.pending = Some(pair);
                JsFlip {
                    outcome: "pair",
                    matched: Some(pair.outcome == PairOutcome::Match),
                }
            }
        };

        to_js_value(&view)
    }

    /// Resolves the pending pair; call after `reveal_delay_ms`.
    pub fn resolve(&mut self) -> Result<JsValue, JsValue> {
        let pair = self
            .pending
            .take()
            .ok_or_else(|| JsValue::from_str("no pair is waiting"))?;
        let resolved = self.session.resolve(&pair).map_err(js_err)?;

        let view = match resolved.resolution {
            Resolution::Matched { reward, cleared } => JsResolution {
                outcome: "matched",
                points: reward as i32,
                cleared,
                record: resolved.record,
            },
            Resolution::Missed { penalty } => JsResolution {
                outcome: "missed",
                points: -(penalty as i32),
                cleared: false,
                record: None,
            },
        };

        to_js_value(&view)
    }

    pub fn end(&mut self) -> Result<JsValue, JsValue> {
        self.pending = None;
        let record = self.session.end();
        to_js_value(&record)
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.session.clear();
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let faces = self.session.faces();
        let rows = self
            .session
            .board()
            .map(|board| rows_to_js(&board, &faces))
            .unwrap_or_default();

        let snapshot = Snapshot {
            state: state_to_str(self.session.state()),
            player: self.session.player(),
            score: self.session.score(),
            streak: self.session.streak(),
            clock: self.session.clock(),
            rows,
        };

        to_js_value(&snapshot)
    }
}

#[derive(Serialize)]
struct Snapshot {
    state: &'static str,
    player: String,
    score: u32,
    streak: u32,
    clock: String,
    rows: Vec<Vec<JsCard>>,
}

#[derive(Serialize)]
struct JsCard {
    key: String,
    asset: String,
    alt: String,
    face: &'static str,
}

#[derive(Serialize)]
struct JsFlip {
    outcome: &'static str,
    matched: Option<bool>,
}

#[derive(Serialize)]
struct JsResolution {
    outcome: &'static str,
    points: i32,
    cleared: bool,
    record: Option<ScoreRecord>,
}

fn rows_to_js(board: &Board, faces: &[FaceState]) -> Vec<Vec<JsCard>> {
    let width = board.cards_per_row().max(1);
    board
        .rows()
        .enumerate()
        .map(|(row, cards)| {
            cards
                .iter()
                .enumerate()
                .map(|(offset, card)| {
                    let face = faces
                        .get(row * width + offset)
                        .copied()
                        .unwrap_or(FaceState::Hidden);
                    card_to_js(card, face)
                })
                .collect()
        })
        .collect()
}

fn card_to_js(card: &Card, face: FaceState) -> JsCard {
    JsCard {
        key: card.key(),
        asset: card.asset_name(),
        alt: card.alt_text(),
        face: face_to_str(face),
    }
}

fn parse_mode(mode: &str) -> Result<PairingMode, JsValue> {
    match mode {
        "same-value" => Ok(PairingMode::SameValue),
        "same-suit-and-value" => Ok(PairingMode::SameSuitAndValue),
        _ => Err(JsValue::from_str("unknown game mode")),
    }
}

fn face_to_str(face: FaceState) -> &'static str {
    match face {
        FaceState::Hidden => "Hidden",
        FaceState::Showing => "Showing",
        FaceState::Removed => "Removed",
    }
}

fn state_to_str(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "Idle",
        SessionState::Running => "Running",
        SessionState::Ended => "Ended",
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
