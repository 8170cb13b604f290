//! End-to-end tests of the filter engine: background reader, ingestion
//! ticks, filtering, hooks and selection, driven the way the main loop
//! drives them.

use std::io::Cursor;
use std::thread;
use std::time::{Duration, Instant};

use sift::app::{Action, AppState, Event, IngestionState, PostFilterHook};
use sift::domain::Item;
use sift::storage::RecencyBoost;
use sift::worker::LineIngestor;
use sift::{handle_event, Config};

fn config() -> Config {
    let mut config = Config::default();
    config.history.enabled = false;
    config.window_size = 3;
    config
}

/// Runs main-loop ticks until the state is `Ready`, collecting actions.
fn ingest(state: &mut AppState, input: &str) -> Vec<Action> {
    let mut ingestor = LineIngestor::spawn(Cursor::new(input.as_bytes().to_vec())).unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut actions = Vec::new();
    let mut batch = Vec::new();

    while !state.ingestion().is_ready() {
        assert!(Instant::now() < deadline, "ingestion never finished");
        let eof = ingestor.poll_lines(&mut batch);
        if !batch.is_empty() || eof {
            let lines = std::mem::take(&mut batch);
            let (_, mut produced) =
                handle_event(state, &Event::LinesReceived { lines, eof }).unwrap();
            let stop = produced.contains(&Action::NoItems);
            actions.append(&mut produced);
            if stop {
                break;
            }
        } else {
            thread::sleep(Duration::from_millis(1));
        }
    }

    ingestor.shutdown();
    actions
}

fn type_query(state: &mut AppState, query: &str) {
    for c in query.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
}

fn filtered_text(state: &AppState) -> Vec<String> {
    state
        .filtered()
        .iter()
        .map(|&i| state.items()[i].to_string())
        .collect()
}

#[test]
fn piped_lines_become_trimmed_items() {
    let mut state = AppState::new(&config());
    let actions = ingest(&mut state, "  alpha  \n\n\tbeta\r\n   \ngamma");

    assert!(!actions.contains(&Action::NoItems));
    assert_eq!(state.ingestion(), IngestionState::Ready);
    assert_eq!(filtered_text(&state), vec!["alpha", "beta", "gamma"]);
}

#[test]
fn blank_input_reports_no_items() {
    let mut state = AppState::new(&config());
    let actions = ingest(&mut state, "\n   \n\t\n");
    assert_eq!(actions.last(), Some(&Action::NoItems));
    assert!(state.items().is_empty());
}

#[test]
fn typing_narrows_case_insensitively_and_confirms() {
    let mut state = AppState::new(&config());
    ingest(&mut state, "src/Main.rs\nsrc/lib.rs\nREADME.md\nCargo.toml\n");

    type_query(&mut state, "mrs");
    assert_eq!(filtered_text(&state), vec!["src/Main.rs"]);

    handle_event(&mut state, &Event::Backspace).unwrap();
    handle_event(&mut state, &Event::Backspace).unwrap();
    assert_eq!(
        filtered_text(&state),
        vec!["src/Main.rs", "README.md", "Cargo.toml"]
    );

    handle_event(&mut state, &Event::MoveDown).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Confirm).unwrap();
    assert_eq!(actions, vec![Action::Emit(b"README.md".to_vec())]);
}

#[test]
fn non_ascii_matches_bytes_exactly() {
    let mut state = AppState::new(&config());
    ingest(&mut state, "Ärger\närger\ncafé\n");

    type_query(&mut state, "ä");
    assert_eq!(filtered_text(&state), vec!["ärger"]);

    handle_event(&mut state, &Event::ClearQuery).unwrap();
    type_query(&mut state, "CAFé");
    assert_eq!(filtered_text(&state), vec!["café"]);
}

#[test]
fn scrolling_keeps_selection_in_window() {
    let mut state = AppState::new(&config());
    let input: String = (0..20).map(|i| format!("line {i}\n")).collect();
    ingest(&mut state, &input);

    for _ in 0..7 {
        handle_event(&mut state, &Event::MoveDown).unwrap();
    }
    let selection = *state.selection();
    assert_eq!(selection.selected(), 7);
    assert_eq!(selection.scroll(), 5);

    let vm = state.compute_viewmodel();
    assert_eq!(vm.display_items.len(), 3);
    assert!(vm.display_items[vm.selected_index].is_selected);

    // Narrowing to fewer rows pulls the selection back in range
    type_query(&mut state, "1");
    let count = state.filtered().len();
    assert!(state.selection().selected() < count);
    assert!(state.selection().holds_for(count));
}

#[test]
fn recency_hook_reorders_every_recompute() {
    let mut state = AppState::new(&config());
    state.register_hook(Box::new(RecencyBoost::new(
        vec![b"Date".to_vec(), b"Banana".to_vec()],
        10,
    )));
    ingest(&mut state, "Apple\nBanana\nCherry\nDate\nElderberry\n");

    assert_eq!(
        filtered_text(&state),
        vec!["Date", "Banana", "Apple", "Cherry", "Elderberry"]
    );

    type_query(&mut state, "an");
    assert_eq!(filtered_text(&state), vec!["Banana"]);

    handle_event(&mut state, &Event::ClearQuery).unwrap();
    type_query(&mut state, "e");
    assert_eq!(
        filtered_text(&state),
        vec!["Date", "Apple", "Cherry", "Elderberry"]
    );
}

/// Reverses the order it is given.
struct Reverse;

impl PostFilterHook for Reverse {
    fn name(&self) -> &'static str {
        "reverse"
    }

    fn reorder(&self, order: &mut [usize], _items: &[Item]) {
        order.reverse();
    }
}

#[test]
fn hooks_compose_in_registration_order() {
    let mut state = AppState::new(&config());
    state.register_hook(Box::new(RecencyBoost::new(vec![b"b".to_vec()], 10)));
    state.register_hook(Box::new(Reverse));
    ingest(&mut state, "a\nb\nc\n");

    // Boost gives [b, a, c]; reversing it gives [c, a, b]
    assert_eq!(filtered_text(&state), vec!["c", "a", "b"]);
}
