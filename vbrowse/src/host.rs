//! The capabilities the overlay consumes from its host table.

use serde_json::{Map, Value};

use crate::error::Unsupported;

/// A single row of the host table's data source.
pub type Record = Map<String, Value>;

/// How a column reaches into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataIndex {
    /// A plain field name.
    Key(String),
    /// A nested path. Columns indexed this way are not searchable.
    Path(Vec<String>),
}

/// Column metadata reported by the host table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub data_index: Option<DataIndex>,
    pub title: String,
    pub default_hidden: bool,
}

impl ColumnMeta {
    /// A visible column reading the field `key`.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            data_index: Some(DataIndex::Key(key.into())),
            title: title.into(),
            default_hidden: false,
        }
    }

    /// A visible column reading a nested path.
    pub fn path<I, S>(path: I, title: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data_index: Some(DataIndex::Path(path.into_iter().map(Into::into).collect())),
            title: title.into(),
            default_hidden: false,
        }
    }

    /// A column with no data index (actions, row numbers, ...).
    pub fn display(title: impl Into<String>) -> Self {
        Self {
            data_index: None,
            title: title.into(),
            default_hidden: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.default_hidden = true;
        self
    }

    /// The plain field key, if this column has one.
    pub fn key(&self) -> Option<&str> {
        match &self.data_index {
            Some(DataIndex::Key(key)) => Some(key),
            _ => None,
        }
    }
}

/// Pagination state owned by the host table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub current: usize,
    pub page_size: usize,
}

impl Pagination {
    pub const fn new(current: usize, page_size: usize) -> Self {
        Self { current, page_size }
    }
}

/// A data table the overlay can attach to.
///
/// Only `columns` and `data_source` are required. A table without pagination
/// is treated as a single page; a table that can't change pages itself is
/// handled through `pagination_mut` on a best-effort basis.
pub trait TableHost {
    /// Column metadata, or `None` if the table can't report it.
    fn columns(&self) -> Option<Vec<ColumnMeta>>;

    /// The full, unpaginated data source.
    fn data_source(&self) -> &[Record];

    /// Current pagination, or `None` when the table is not paginated.
    fn pagination(&self) -> Option<Pagination> {
        None
    }

    /// Ask the table to show another page.
    fn set_pagination(&mut self, _pagination: Pagination) -> Result<(), Unsupported> {
        Err(Unsupported)
    }

    /// Direct access to the table's pagination object.
    fn pagination_mut(&mut self) -> Option<&mut Pagination> {
        None
    }
}

/// The searchable text of a cell.
///
/// Returns `None` for values that count as empty: `null`, `false`, `0` and
/// the empty string.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(loose_string(other)),
    }
}

fn loose_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                // f64 Display drops a trailing ".0"
                n.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(loose_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_values_have_no_text() {
        assert_eq!(cell_text(&json!(null)), None);
        assert_eq!(cell_text(&json!(false)), None);
        assert_eq!(cell_text(&json!(0)), None);
        assert_eq!(cell_text(&json!(0.0)), None);
        assert_eq!(cell_text(&json!("")), None);
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(cell_text(&json!("Seoul")).as_deref(), Some("Seoul"));
        assert_eq!(cell_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(cell_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(cell_text(&json!(-7)).as_deref(), Some("-7"));
        assert_eq!(cell_text(&json!(1.5)).as_deref(), Some("1.5"));
        assert_eq!(cell_text(&json!(3.0)).as_deref(), Some("3"));
    }

    #[test]
    fn test_compound_text() {
        assert_eq!(cell_text(&json!(["a", 1, null])).as_deref(), Some("a,1,"));
        assert_eq!(
            cell_text(&json!({"k": "v"})).as_deref(),
            Some("[object Object]")
        );
    }

    #[test]
    fn test_column_key() {
        assert_eq!(ColumnMeta::new("name", "Name").key(), Some("name"));
        assert_eq!(ColumnMeta::path(["a", "b"], "AB").key(), None);
        assert_eq!(ColumnMeta::display("Actions").key(), None);
    }
}
