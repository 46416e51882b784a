//! The subset of host columns the overlay searches.

use crate::error::OverlayError;
use crate::host::ColumnMeta;

/// Ordered keys of the columns eligible for search.
///
/// Hidden columns and columns without a plain string data index are left
/// out. Offsets into this list are the "column positions" used by match
/// entries and target keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveColumns(Vec<String>);

impl ActiveColumns {
    pub fn from_meta(columns: &[ColumnMeta]) -> Self {
        Self(
            columns
                .iter()
                .filter(|column| !column.default_hidden)
                .filter_map(|column| column.key())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.0.get(position).map(String::as_str)
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveColumns {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Check the column metadata a host reported at attach time.
pub fn validate_columns(columns: Option<Vec<ColumnMeta>>) -> Result<Vec<ColumnMeta>, OverlayError> {
    columns.ok_or_else(|| {
        log::error!("columns is required");
        OverlayError::MissingColumns
    })
}
