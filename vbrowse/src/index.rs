//! Which cells of the data source contain the keyword.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::columns::ActiveColumns;
use crate::host::{Record, cell_text};

/// Identifies one cell: a row of the data source and a column position in
/// [`ActiveColumns`]. Renders as `"{row}_{col}"`, the value tagged onto
/// highlighted cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub row: usize,
    pub col: usize,
}

impl CellKey {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.row, self.col)
    }
}

impl FromStr for CellKey {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s.split_once('_').unwrap_or((s, ""));
        Ok(Self::new(row.parse()?, col.parse()?))
    }
}

/// The matching columns of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    /// Index into the full data source, not the visible page.
    pub row_index: usize,
    /// Positions in [`ActiveColumns`], ascending, never empty.
    pub columns: Vec<usize>,
}

/// Every matching cell for a keyword, ordered by row then column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchIndex {
    keyword: String,
    entries: Vec<MatchEntry>,
    total: usize,
}

/// True when a keyword clears the search rather than running one.
pub fn is_blank(keyword: &str) -> bool {
    keyword.trim().is_empty()
}

impl MatchIndex {
    /// Scan `data` for cells whose text contains `keyword` (case-sensitive).
    pub fn build(data: &[Record], columns: &ActiveColumns, keyword: &str) -> Self {
        let mut index = Self {
            keyword: keyword.to_string(),
            ..Default::default()
        };
        if is_blank(keyword) {
            return index;
        }

        for (row_index, record) in data.iter().enumerate() {
            let matched: Vec<usize> = columns
                .iter()
                .enumerate()
                .filter(|(_, key)| {
                    record
                        .get(*key)
                        .and_then(cell_text)
                        .is_some_and(|text| text.contains(keyword))
                })
                .map(|(position, _)| position)
                .collect();

            if !matched.is_empty() {
                index.total += matched.len();
                index.entries.push(MatchEntry {
                    row_index,
                    columns: matched,
                });
            }
        }

        log::debug!(
            "indexed {:?}: {} cells in {} rows",
            keyword,
            index.total,
            index.entries.len()
        );
        index
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }

    /// Number of matching cells (not rows).
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Every matching cell in traversal order.
    pub fn cells(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.entries.iter().flat_map(|entry| {
            entry
                .columns
                .iter()
                .map(move |&col| CellKey::new(entry.row_index, col))
        })
    }

    /// The cell at a 0-based match ordinal.
    pub fn cell_at(&self, ordinal: usize) -> Option<CellKey> {
        if ordinal >= self.total {
            return None;
        }
        let mut remaining = ordinal;
        for entry in &self.entries {
            if remaining < entry.columns.len() {
                return Some(CellKey::new(entry.row_index, entry.columns[remaining]));
            }
            remaining -= entry.columns.len();
        }
        None
    }

    /// Entries whose row falls inside `rows`.
    pub fn entries_in(&self, rows: RangeInclusive<usize>) -> impl Iterator<Item = &MatchEntry> {
        // Entries are sorted by row, so skip straight to the first candidate.
        let start = self
            .entries
            .partition_point(|entry| entry.row_index < *rows.start());
        self.entries[start..]
            .iter()
            .take_while(move |entry| entry.row_index <= *rows.end())
    }
}
