//! CLI memory game example.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use pairs::scoring::{fetch, submit};
use pairs::{
    Board, Card, FaceState, FlipOutcome, PairingMode, Resolution, ScoreQuery, ScoreStore,
    Session, SessionOptions, SessionState, SortCriteria, SortOrder, Suit,
};

fn main() {
    println!("Memory CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let session = Arc::new(Session::new(SessionOptions::default(), seed));
    let mut scores = ScoreStore::new();

    let running = Arc::new(AtomicBool::new(true));
    let clock = {
        let session = Arc::clone(&session);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                thread::sleep(Duration::from_secs(1));
                session.tick();
            }
        })
    };

    let player = loop {
        let name = prompt_line("Player name: ");
        if name == "q" {
            return;
        }
        if !name.trim().is_empty() {
            break name;
        }
    };

    loop {
        let mode = match prompt_line("Mode ([v]alue / [s]uit and value, q to quit): ").as_str() {
            "v" | "value" => PairingMode::SameValue,
            "s" | "suit" => PairingMode::SameSuitAndValue,
            "q" | "quit" => break,
            _ => {
                println!("Unknown mode.");
                continue;
            }
        };

        let max = mode.max_board_size();
        let Some(size) = prompt_usize(&format!("Board size (6-{max}, even): ")) else {
            break;
        };

        let options = SessionOptions::default()
            .with_mode(mode)
            .with_board_size(size);
        if let Err(err) = session.configure(options) {
            println!("Options error: {err}");
            continue;
        }
        if let Err(err) = session.start(&player) {
            println!("Start error: {err}");
            continue;
        }

        if !play(&session, &mut scores) {
            session.clear();
            break;
        }

        print_scores(&scores);
    }

    running.store(false, Ordering::SeqCst);
    let _ = clock.join();
}

/// Plays one board. Returns `false` if the player quit.
fn play(session: &Session, scores: &mut ScoreStore) -> bool {
    while session.state() == SessionState::Running {
        let Some(board) = session.board() else {
            break;
        };
        print_board(session, &board);

        let input = prompt_line("Flip card #: ");
        if input == "q" || input == "quit" {
            return false;
        }
        let Some(card) = input
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| board.get(index))
        else {
            println!("Pick a card number from the board.");
            continue;
        };

        match session.flip(&card) {
            Ok(FlipOutcome::PairShown(pair)) => {
                print_board(session, &board);
                thread::sleep(session.reveal_delay());
                match session.resolve(&pair) {
                    Ok(resolved) => {
                        match resolved.resolution {
                            Resolution::Matched { reward, .. } => {
                                println!("{}", colorize(&format!("Match! +{reward}"), "32"));
                            }
                            Resolution::Missed { penalty } => {
                                println!("{}", colorize(&format!("No match. -{penalty}"), "31"));
                            }
                        }
                        if let Some(record) = resolved.record {
                            println!(
                                "Board cleared in {} with {} points.",
                                record.time, record.score
                            );
                            submit(scores, &record);
                        }
                    }
                    Err(err) => println!("Resolve error: {err}"),
                }
            }
            Ok(FlipOutcome::Shown) => {}
            Ok(FlipOutcome::Ignored) => println!("That card cannot be flipped now."),
            Err(err) => println!("Flip error: {err}"),
        }
    }

    true
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_board(session: &Session, board: &Board) {
    println!(
        "\nTime {} | Score {} | Streak {}",
        session.clock(),
        session.score(),
        session.streak()
    );

    let faces = session.faces();
    let width = board.cards_per_row().max(1);
    for (row_index, row) in board.rows().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(offset, card)| {
                let index = row_index * width + offset;
                let face = faces.get(index).copied().unwrap_or(FaceState::Hidden);
                format_cell(index + 1, card, face)
            })
            .collect();
        println!("{}", cells.join(" "));
    }
    println!();
}

fn format_cell(number: usize, card: &Card, face: FaceState) -> String {
    match face {
        FaceState::Hidden => format!("{number:>2}:[???]"),
        FaceState::Showing => format!("{number:>2}:[{}]", format_card(card)),
        FaceState::Removed => " ".repeat(8),
    }
}

fn print_scores(scores: &ScoreStore) {
    let query = ScoreQuery::sort(SortCriteria::Score, SortOrder::Desc, "");
    let Some(response) = fetch(scores, &query) else {
        return;
    };

    println!("\n#  {:<12} {:<26} {:>5} {:>8}", "Player", "Mode", "Score", "Time");
    for (index, record) in response.scores.iter().enumerate() {
        println!(
            "{:<2} {:<12} {:<26} {:>5} {:>8}",
            index + 1,
            record.name,
            record.mode,
            record.score,
            record.time
        );
    }
    println!();
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_card(card: &Card) -> String {
    let (suit, color_code) = match card.suit {
        Suit::Hearts => ("H", "31"),
        Suit::Diamonds => ("D", "31"),
        Suit::Clubs => ("C", "32"),
        Suit::Spades => ("S", "34"),
    };

    let value = match card.value.name() {
        "ace" => "A",
        "jack" => "J",
        "queen" => "Q",
        "king" => "K",
        other => other,
    };

    colorize(&format!("{value:>2}{suit}"), color_code)
}
