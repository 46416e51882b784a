use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use vbrowse::dom::find_element;
use vbrowse::highlight::SEARCHED_ATTR;
use vbrowse::{CellKey, ColumnMeta, Element, OverlayConfig, Record, StatusView};
use vbrowse_tui::app::{App, Focus};
use vbrowse_tui::buffer::Buffer;
use vbrowse_tui::table::DemoTable;

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Five people on pages of two; "Kim" is in rows 0 and 3.
fn people() -> DemoTable {
    let data: Vec<Record> = ["Kim Minsu", "Lee Jiwon", "Park Sora", "Kim Dohyun", "Choi Yuna"]
        .iter()
        .map(|name| serde_json::from_value(json!({"name": name, "city": "Seoul"})).unwrap())
        .collect();
    let columns = vec![
        ColumnMeta::display("#"),
        ColumnMeta::new("name", "Name"),
        ColumnMeta::new("city", "City"),
    ];
    DemoTable::new(columns, data, 2)
}

fn press(app: &mut App, code: KeyCode, now: Instant) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
}

fn press_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers, now: Instant) {
    app.handle_key(KeyEvent::new(code, modifiers), now);
}

fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        press(app, KeyCode::Char(c), now);
    }
}

/// Advance the clock the way the event loop does after a wake-up.
fn settle(app: &mut App, now: Instant) {
    app.tick(now);
    app.sync(now);
}

/// IDs of tagged cells with their tag, in tree order.
fn tagged(root: &Element) -> Vec<(String, String)> {
    let mut out = Vec::new();
    if let Some(tag) = root.get_data(SEARCHED_ATTR) {
        out.push((root.id.clone(), tag.clone()));
    }
    for child in root.child_nodes() {
        out.extend(tagged(child));
    }
    out
}

/// An app with the panel open and "Kim" searched.
fn searched_app(now: Instant) -> App {
    let mut app = App::new(people(), OverlayConfig::new()).unwrap();
    press_with(&mut app, KeyCode::Char('f'), KeyModifiers::CONTROL, now);
    type_text(&mut app, "Kim", now);
    settle(&mut app, now + DEBOUNCE);
    app
}

// =============================================================================
// Searching
// =============================================================================

#[test]
fn test_ctrl_f_opens_search() {
    let mut app = App::new(people(), OverlayConfig::new()).unwrap();
    assert_eq!(app.focus(), Focus::Table);

    press_with(&mut app, KeyCode::Char('f'), KeyModifiers::CONTROL, Instant::now());
    assert_eq!(app.focus(), Focus::Search);
    assert!(app.overlay().is_open());
}

#[test]
fn test_default_open_focuses_search() {
    let app = App::new(people(), OverlayConfig::new().default_open(true)).unwrap();
    assert_eq!(app.focus(), Focus::Search);
}

#[test]
fn test_typing_searches_after_debounce() {
    let now = Instant::now();
    let mut app = App::new(people(), OverlayConfig::new()).unwrap();
    press_with(&mut app, KeyCode::Char('f'), KeyModifiers::CONTROL, now);
    type_text(&mut app, "Kim", now);
    assert_eq!(app.search_text(), "Kim");

    settle(&mut app, now + DEBOUNCE - Duration::from_millis(1));
    assert_eq!(app.overlay().keyword(), "");
    assert!(tagged(app.body()).is_empty());

    settle(&mut app, now + DEBOUNCE);
    assert_eq!(app.overlay().keyword(), "Kim");
    assert_eq!(app.overlay().target(), Some(CellKey::new(0, 0)));
    assert_eq!(
        tagged(app.body()),
        [("cell-0-1".to_string(), "0_0".to_string())]
    );

    let target_bg = app.overlay().colors().target_cell_bg;
    let cell = find_element(app.body(), "cell-0-1").unwrap();
    assert_eq!(cell.style.background, Some(target_bg));
}

#[test]
fn test_next_match_turns_the_page() {
    let now = Instant::now();
    let mut app = searched_app(now);
    assert_eq!(app.table().current_page(), 1);

    press(&mut app, KeyCode::Down, now + DEBOUNCE);
    assert_eq!(app.table().current_page(), 2);
    app.sync(now + DEBOUNCE);

    assert!(find_element(app.body(), "cell-0-1").is_none());
    assert_eq!(
        tagged(app.body()),
        [("cell-3-1".to_string(), "3_0".to_string())]
    );
    assert!(!app.overlay().is_loading());

    // Back to the first match.
    press(&mut app, KeyCode::Up, now + DEBOUNCE);
    app.sync(now + DEBOUNCE);
    assert_eq!(app.table().current_page(), 1);
    assert_eq!(app.overlay().target(), Some(CellKey::new(0, 0)));
}

#[test]
fn test_escape_closes_and_clears() {
    let now = Instant::now();
    let mut app = searched_app(now);
    assert!(!tagged(app.body()).is_empty());

    press(&mut app, KeyCode::Esc, now + DEBOUNCE);
    assert_eq!(app.focus(), Focus::Table);
    assert!(!app.overlay().is_open());
    assert!(tagged(app.body()).is_empty());
    let cell = find_element(app.body(), "cell-0-1").unwrap();
    assert_eq!(cell.style.background, None);
}

#[test]
fn test_no_result() {
    let now = Instant::now();
    let mut app = App::new(people(), OverlayConfig::new()).unwrap();
    press_with(&mut app, KeyCode::Char('f'), KeyModifiers::CONTROL, now);
    type_text(&mut app, "zzz", now);
    let later = now + DEBOUNCE;
    settle(&mut app, later);

    let status = app.overlay().status(later);
    assert!(matches!(status.view, StatusView::NoResult { .. }));
    assert!(status.shaking);
    assert!(app.next_deadline(later).is_some());

    let mut buf = Buffer::new(60, 10);
    app.paint(&mut buf, later + Duration::from_secs(1));
    assert!(buf.row_text(8).contains("No Result Defined"));
}

#[test]
fn test_jumper() {
    let now = Instant::now();
    let mut app = searched_app(now);
    let later = now + DEBOUNCE;

    press(&mut app, KeyCode::Tab, later);
    assert_eq!(app.focus(), Focus::Jumper);

    press(&mut app, KeyCode::Backspace, later);
    type_text(&mut app, "x2", later);
    press(&mut app, KeyCode::Enter, later);
    app.sync(later);

    assert_eq!(app.focus(), Focus::Search);
    assert_eq!(app.overlay().target(), Some(CellKey::new(3, 0)));
    assert_eq!(app.table().current_page(), 2);
}

// =============================================================================
// Painting
// =============================================================================

#[test]
fn test_paint_panel_and_footer() {
    let now = Instant::now();
    let app = searched_app(now);

    let mut buf = Buffer::new(60, 10);
    app.paint(&mut buf, now + DEBOUNCE);

    assert!(buf.row_text(0).contains("Name"));
    assert!(buf.row_text(1).contains("Kim Minsu"));
    // Panel sits at the bottom left of the table area, above the footer.
    let panel = buf.row_text(8);
    assert!(panel.starts_with(" / Kim"), "{panel:?}");
    assert!(panel.contains("[1] / 2"), "{panel:?}");
    assert!(buf.row_text(9).contains("page 1/3"));
}

#[test]
fn test_paint_hides_closed_panel() {
    let app = App::new(people(), OverlayConfig::new()).unwrap();
    let mut buf = Buffer::new(60, 10);
    app.paint(&mut buf, Instant::now());
    assert!(!buf.row_text(8).contains(" / "));
}

// =============================================================================
// Table keys
// =============================================================================

#[test]
fn test_page_keys() {
    let now = Instant::now();
    let mut app = App::new(people(), OverlayConfig::new()).unwrap();

    press(&mut app, KeyCode::PageDown, now);
    app.sync(now);
    assert_eq!(app.table().current_page(), 2);
    assert!(find_element(app.body(), "row-2").is_some());

    press(&mut app, KeyCode::End, now);
    assert_eq!(app.table().current_page(), 3);
    press(&mut app, KeyCode::Home, now);
    assert_eq!(app.table().current_page(), 1);
}

#[test]
fn test_alt_arrows_move_panel() {
    let now = Instant::now();
    let mut app = App::new(people(), OverlayConfig::new()).unwrap();
    press_with(&mut app, KeyCode::Char('f'), KeyModifiers::CONTROL, now);

    press_with(&mut app, KeyCode::Right, KeyModifiers::ALT, now);
    press_with(&mut app, KeyCode::Up, KeyModifiers::ALT, now);
    assert_eq!(app.nudge(), (2, -1));
    assert_eq!(app.search_text(), "");

    let mut config = OverlayConfig::new();
    config.movable = false;
    let mut fixed = App::new(people(), config).unwrap();
    press_with(&mut fixed, KeyCode::Char('f'), KeyModifiers::CONTROL, now);
    press_with(&mut fixed, KeyCode::Right, KeyModifiers::ALT, now);
    assert_eq!(fixed.nudge(), (0, 0));
}

#[test]
fn test_quit() {
    let now = Instant::now();
    let mut app = App::new(people(), OverlayConfig::new()).unwrap();
    press_with(&mut app, KeyCode::Char('f'), KeyModifiers::CONTROL, now);

    // Typed into the search field while it has focus.
    press(&mut app, KeyCode::Char('q'), now);
    assert!(!app.should_quit());
    assert_eq!(app.search_text(), "q");

    press(&mut app, KeyCode::BackTab, now);
    press(&mut app, KeyCode::Char('q'), now);
    assert!(app.should_quit());
}

#[test]
fn test_inactive_overlay_stays_closed() {
    let mut app = App::new(people(), OverlayConfig::new().active(false)).unwrap();
    press_with(&mut app, KeyCode::Char('f'), KeyModifiers::CONTROL, Instant::now());
    assert_eq!(app.focus(), Focus::Table);
    assert!(!app.overlay().is_open());
}
