//! What the search panel shows besides the input.

use std::time::{Duration, Instant};

use crate::cursor::Cursor;

/// The panel's status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView {
    /// Blank keyword: nothing to report.
    Hidden,
    /// A keyword with zero matches.
    NoResult { message: String },
    /// `current / total`. `current` is the 1-based match on display, at
    /// least 1 even before the first navigation.
    Position { current: usize, total: usize },
}

impl StatusView {
    pub fn present(keyword: &str, cursor: &Cursor, no_result_text: &str) -> Self {
        if crate::index::is_blank(keyword) {
            return Self::Hidden;
        }
        match cursor.total() {
            0 => Self::NoResult {
                message: no_result_text.to_string(),
            },
            total => Self::Position {
                current: cursor.ordinal().max(1),
                total,
            },
        }
    }
}

/// Everything a renderer needs for the panel at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub view: StatusView,
    /// The panel is playing its "nothing there" shake.
    pub shaking: bool,
    /// The host is between `before_update` and `updated`.
    pub loading: bool,
}

/// A short-lived feedback animation.
#[derive(Debug, Clone, Copy)]
pub struct Shake {
    duration: Duration,
    until: Option<Instant>,
}

impl Shake {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            until: None,
        }
    }

    /// Start, or restart, the shake.
    pub fn trigger(&mut self, now: Instant) {
        self.until = Some(now + self.duration);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// When a running shake stops, so the caller can schedule a repaint.
    pub fn deadline(&self, now: Instant) -> Option<Instant> {
        self.until.filter(|until| now < *until)
    }

    /// Horizontal offset of the panel, in cells, at `now`.
    pub fn offset(&self, now: Instant) -> i16 {
        let Some(until) = self.until.filter(|until| now < *until) else {
            return 0;
        };
        let remaining = until.duration_since(now).as_millis() as u64;
        // Alternate left and right every 50ms.
        match (remaining / 50) % 4 {
            0 => 0,
            1 => 1,
            2 => 0,
            _ => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ActiveColumns;
    use crate::index::MatchIndex;
    use serde_json::json;

    fn cursor_for(keyword: &str) -> Cursor {
        let data = vec![
            json!({"name": "Kim"}).as_object().unwrap().clone(),
            json!({"name": "Kimberly"}).as_object().unwrap().clone(),
        ];
        let columns = ActiveColumns::from_iter(["name"]);
        Cursor::new(&MatchIndex::build(&data, &columns, keyword))
    }

    #[test]
    fn test_present() {
        assert_eq!(StatusView::present("", &cursor_for(""), "none"), StatusView::Hidden);
        assert_eq!(
            StatusView::present("zz", &cursor_for("zz"), "none"),
            StatusView::NoResult {
                message: "none".into()
            }
        );
        assert_eq!(
            StatusView::present("Kim", &cursor_for("Kim"), "none"),
            StatusView::Position {
                current: 1,
                total: 2
            }
        );
    }

    #[test]
    fn test_shake_expires() {
        let start = Instant::now();
        let mut shake = Shake::new(Duration::from_millis(300));
        assert!(!shake.is_active(start));

        shake.trigger(start);
        assert!(shake.is_active(start + Duration::from_millis(299)));
        assert_eq!(shake.deadline(start), Some(start + Duration::from_millis(300)));
        assert!(!shake.is_active(start + Duration::from_millis(300)));
        assert_eq!(shake.deadline(start + Duration::from_millis(300)), None);
        assert_eq!(shake.offset(start + Duration::from_millis(400)), 0);
    }
}
