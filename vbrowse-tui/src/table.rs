//! The data table the overlay is attached to.

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use vbrowse::{ColumnMeta, Pagination, Record, TableHost, Unsupported};

use crate::error::AppError;

/// A paginated table over an in-memory data source.
#[derive(Debug, Clone)]
pub struct DemoTable {
    columns: Vec<ColumnMeta>,
    data: Vec<Record>,
    /// `None` shows every row on one page.
    pagination: Option<Pagination>,
    dirty: bool,
}

impl DemoTable {
    pub fn new(columns: Vec<ColumnMeta>, data: Vec<Record>, page_size: usize) -> Self {
        Self {
            columns,
            data,
            pagination: (page_size > 0).then(|| Pagination::new(1, page_size)),
            dirty: true,
        }
    }

    /// Load records from a JSON array of objects.
    pub fn load(path: &Path, page_size: usize) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let data: Vec<Record> = serde_json::from_str(&text).map_err(|source| AppError::Data {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded {} records from {}", data.len(), path.display());
        Ok(Self::new(infer_columns(&data), data, page_size))
    }

    /// A generated people directory with `rows` rows.
    pub fn generate(rows: usize, page_size: usize) -> Self {
        const FAMILY: [&str; 8] = ["Kim", "Lee", "Park", "Choi", "Jung", "Kang", "Cho", "Yoon"];
        const GIVEN: [&str; 10] = [
            "Minsu", "Jiwon", "Seoyeon", "Hyunwoo", "Jisoo", "Dohyun", "Yuna", "Kimberly", "Taeyang",
            "Sora",
        ];
        const CITY: [&str; 7] = ["Seoul", "Busan", "Kimhae", "Incheon", "Daegu", "Gimpo", "Suwon"];
        const TEAM: [&str; 5] = ["Platform", "Search", "Billing", "Design", ""];

        let data = (0..rows)
            .map(|i| {
                let record = json!({
                    "id": i + 1,
                    "name": format!("{} {}", FAMILY[i % FAMILY.len()], GIVEN[(i * 7 + i / 3) % GIVEN.len()]),
                    "city": CITY[(i * 3 + i / 5) % CITY.len()],
                    "team": TEAM[(i / 2) % TEAM.len()],
                    "score": (i * 37) % 101,
                    "active": i % 4 != 0,
                    "address": {"street": format!("{} Gangnam-daero", 100 + i), "zip": format!("06{:03}", i % 1000)},
                });
                match record {
                    Value::Object(map) => map,
                    _ => Record::new(),
                }
            })
            .collect::<Vec<_>>();

        let columns = vec![
            ColumnMeta::display("#"),
            ColumnMeta::new("id", "Id").hidden(),
            ColumnMeta::new("name", "Name"),
            ColumnMeta::new("city", "City"),
            ColumnMeta::new("team", "Team"),
            ColumnMeta::new("score", "Score"),
            ColumnMeta::new("active", "Active"),
            ColumnMeta::path(["address", "street"], "Street"),
        ];
        Self::new(columns, data, page_size)
    }

    pub fn columns_meta(&self) -> &[ColumnMeta] {
        &self.columns
    }

    pub fn current_page(&self) -> usize {
        self.pagination.map_or(1, |p| p.current)
    }

    pub fn page_count(&self) -> usize {
        match self.pagination {
            Some(p) => self.data.len().div_ceil(p.page_size).max(1),
            None => 1,
        }
    }

    /// Index of the first shown row and the shown rows.
    pub fn page_rows(&self) -> (usize, &[Record]) {
        match self.pagination {
            Some(p) => {
                let start = ((p.current - 1) * p.page_size).min(self.data.len());
                let end = (start + p.page_size).min(self.data.len());
                (start, &self.data[start..end])
            }
            None => (0, self.data.as_slice()),
        }
    }

    /// Switch to a page; out-of-range pages are clamped.
    pub fn go_to_page(&mut self, page: usize) {
        let page = page.clamp(1, self.page_count());
        if let Some(p) = &mut self.pagination
            && p.current != page
        {
            log::debug!("page {} -> {page}", p.current);
            p.current = page;
            self.dirty = true;
        }
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page() + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page().saturating_sub(1));
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the table needs re-rendering, resetting the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl TableHost for DemoTable {
    fn columns(&self) -> Option<Vec<ColumnMeta>> {
        Some(self.columns.clone())
    }

    fn data_source(&self) -> &[Record] {
        &self.data
    }

    fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    fn set_pagination(&mut self, pagination: Pagination) -> Result<(), Unsupported> {
        if self.pagination.is_none() {
            return Err(Unsupported);
        }
        if let Some(p) = &mut self.pagination
            && p.page_size != pagination.page_size
        {
            p.page_size = pagination.page_size.max(1);
            self.dirty = true;
        }
        self.go_to_page(pagination.current);
        Ok(())
    }
}

/// One column per key of the first record. Object values become
/// nested-path columns.
fn infer_columns(data: &[Record]) -> Vec<ColumnMeta> {
    let Some(first) = data.first() else {
        return Vec::new();
    };
    let mut columns = vec![ColumnMeta::display("#")];
    for (key, value) in first {
        match value {
            Value::Object(fields) => columns.extend(
                fields
                    .keys()
                    .map(|field| ColumnMeta::path([key.as_str(), field.as_str()], format!("{key}.{field}"))),
            ),
            _ => columns.push(ColumnMeta::new(key.as_str(), key.as_str())),
        }
    }
    columns
}
