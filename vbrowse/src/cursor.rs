//! The current-match pointer.
//!
//! The cursor always points one past the match currently on display: after
//! showing match `n` (0-based) its ordinal is `n + 1`. An ordinal equal to
//! the match total is the end-of-results state, not an error.

use crate::index::{CellKey, MatchIndex};

/// Outcome of moving the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing to navigate.
    Ignored,
    /// At a boundary with wrap-around disabled.
    End,
    /// This cell is the new target.
    Target(CellKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    ordinal: usize,
    total: usize,
}

impl Cursor {
    pub fn new(index: &MatchIndex) -> Self {
        Self {
            ordinal: 0,
            total: index.total(),
        }
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn at_end(&self) -> bool {
        self.ordinal >= self.total
    }

    /// Show the match at the current ordinal and move past it.
    pub fn advance(&mut self, index: &MatchIndex, wrap: bool) -> Step {
        if index.is_empty() {
            return Step::Ignored;
        }
        if self.at_end() {
            if !wrap {
                return Step::End;
            }
            self.ordinal = 0;
        }

        match index.cell_at(self.ordinal) {
            Some(cell) => {
                self.ordinal += 1;
                Step::Target(cell)
            }
            None => Step::Ignored,
        }
    }

    /// Show the match before the one on display.
    pub fn retreat(&mut self, index: &MatchIndex, wrap: bool) -> Step {
        if index.is_empty() {
            return Step::Ignored;
        }
        if self.ordinal > 1 {
            self.ordinal -= 2;
            return self.advance(index, wrap);
        }
        if !wrap {
            return Step::End;
        }
        self.ordinal = self.total - 1;
        self.advance(index, wrap)
    }

    /// Show the match at a 1-based position typed by the user.
    ///
    /// Out-of-range positions are clamped. Input that isn't a number
    /// re-shows the current match.
    pub fn jump_to(&mut self, index: &MatchIndex, input: &str, wrap: bool) -> Step {
        if index.is_empty() {
            return Step::Ignored;
        }
        match parse_leading_int(input) {
            Some(position) => {
                let position = position.clamp(1, self.total as i64) as usize;
                self.ordinal = position - 1;
            }
            None => self.ordinal = self.ordinal.saturating_sub(1),
        }
        self.advance(index, wrap)
    }
}

/// Parse an optionally signed run of leading digits, ignoring what follows.
fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    // Saturate absurdly long inputs; they clamp to the last match anyway.
    let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ActiveColumns;
    use crate::host::Record;
    use serde_json::json;

    /// Four matching cells: (0,0) (1,0) (1,1) (3,0).
    fn index() -> MatchIndex {
        let data: Vec<Record> = serde_json::from_value(json!([
            {"a": "x", "b": "-"},
            {"a": "x", "b": "x"},
            {"a": "-", "b": "-"},
            {"a": "x", "b": "-"},
        ]))
        .unwrap();
        let columns: ActiveColumns = ["a", "b"].into_iter().collect();
        MatchIndex::build(&data, &columns, "x")
    }

    fn target(step: Step) -> CellKey {
        match step {
            Step::Target(cell) => cell,
            other => panic!("expected a target, got {other:?}"),
        }
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(parse_leading_int("3"), Some(3));
        assert_eq!(parse_leading_int(" 12abc"), Some(12));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_advance_walks_in_order_then_stops() {
        let index = index();
        let mut cursor = Cursor::new(&index);

        let seen: Vec<CellKey> = (0..4).map(|_| target(cursor.advance(&index, false))).collect();
        assert_eq!(seen, index.cells().collect::<Vec<_>>());
        assert_eq!(cursor.ordinal(), 4);
        assert!(cursor.at_end());

        assert_eq!(cursor.advance(&index, false), Step::End);
        assert_eq!(cursor.ordinal(), 4);
    }

    #[test]
    fn test_advance_wraps_when_looping() {
        let index = index();
        let mut cursor = Cursor::new(&index);
        for _ in 0..4 {
            cursor.advance(&index, true);
        }
        assert_eq!(target(cursor.advance(&index, true)), CellKey::new(0, 0));
        assert_eq!(cursor.ordinal(), 1);
    }

    #[test]
    fn test_retreat_shows_previous() {
        let index = index();
        let mut cursor = Cursor::new(&index);
        cursor.advance(&index, false);
        cursor.advance(&index, false);
        cursor.advance(&index, false); // showing (1,1)

        assert_eq!(target(cursor.retreat(&index, false)), CellKey::new(1, 0));
        assert_eq!(cursor.ordinal(), 2);
        assert_eq!(target(cursor.retreat(&index, false)), CellKey::new(0, 0));
        assert_eq!(cursor.ordinal(), 1);
    }

    #[test]
    fn test_retreat_at_first_match() {
        let index = index();
        let mut cursor = Cursor::new(&index);
        cursor.advance(&index, false);

        assert_eq!(cursor.retreat(&index, false), Step::End);
        assert_eq!(cursor.ordinal(), 1);

        assert_eq!(target(cursor.retreat(&index, true)), CellKey::new(3, 0));
        assert_eq!(cursor.ordinal(), 4);
    }

    #[test]
    fn test_jump_clamps() {
        let index = index();
        let mut cursor = Cursor::new(&index);

        assert_eq!(target(cursor.jump_to(&index, "0", false)), CellKey::new(0, 0));
        assert_eq!(target(cursor.jump_to(&index, "5", false)), CellKey::new(3, 0));
        assert_eq!(target(cursor.jump_to(&index, "-3", false)), CellKey::new(0, 0));
        assert_eq!(target(cursor.jump_to(&index, "3", false)), CellKey::new(1, 1));
        assert_eq!(cursor.ordinal(), 3);
    }

    #[test]
    fn test_jump_with_garbage_keeps_current() {
        let index = index();
        let mut cursor = Cursor::new(&index);
        cursor.jump_to(&index, "2", false);

        assert_eq!(target(cursor.jump_to(&index, "two", false)), CellKey::new(1, 0));
        assert_eq!(cursor.ordinal(), 2);
    }

    #[test]
    fn test_empty_index_ignores_everything() {
        let index = MatchIndex::default();
        let mut cursor = Cursor::new(&index);
        assert_eq!(cursor.advance(&index, true), Step::Ignored);
        assert_eq!(cursor.retreat(&index, true), Step::Ignored);
        assert_eq!(cursor.jump_to(&index, "1", true), Step::Ignored);
        assert_eq!(cursor.ordinal(), 0);
    }

    #[test]
    fn test_ordinal_stays_in_bounds() {
        let index = index();
        let mut cursor = Cursor::new(&index);
        let inputs = ["1", "9", "x", "-1", "4"];
        for round in 0..40 {
            let wrap = round % 3 == 0;
            match round % 4 {
                0 => cursor.advance(&index, wrap),
                1 => cursor.retreat(&index, wrap),
                2 => cursor.jump_to(&index, inputs[round % inputs.len()], wrap),
                _ => cursor.advance(&index, !wrap),
            };
            assert!(cursor.ordinal() <= cursor.total());
        }
    }
}
