//! Applying match styling to a rendered table.

use crate::config::HighlightColors;
use crate::dom::{
    Element, ScrollBehavior, body_row_mut, cell_by_data_mut, for_each_cell_mut, row_cell_mut,
};
use crate::index::{CellKey, MatchIndex, is_blank};
use crate::page::PaginationView;

/// Data attribute carrying a highlighted cell's [`CellKey`].
pub const SEARCHED_ATTR: &str = "searched-idx";

/// Ask the host to bring an element into view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub element_id: String,
    pub behavior: ScrollBehavior,
}

/// What a highlight pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightReport {
    /// Cells tagged and colored.
    pub tagged: usize,
    /// Matches on the page whose cell wasn't found in the tree.
    pub missing: usize,
    /// Set when the target cell was found.
    pub scroll: Option<ScrollRequest>,
}

/// Remove every highlight from the table.
pub fn clear_highlights(root: &mut Element) {
    for_each_cell_mut(root, &mut |cell| {
        cell.data.remove(SEARCHED_ATTR);
        cell.style.background = None;
    });
}

/// One highlight pass over the rendered page.
///
/// The tree must hold exactly the rows of `page`, in data source order, each
/// row holding one cell per active column.
#[derive(Debug, Clone, Copy)]
pub struct HighlightPass<'a> {
    pub index: &'a MatchIndex,
    pub page: PaginationView,
    /// Length of the full data source.
    pub row_count: usize,
    pub target: Option<CellKey>,
    pub colors: &'a HighlightColors,
    pub behavior: ScrollBehavior,
}

impl HighlightPass<'_> {
    /// Clear old styling, then tag and color the matches on the page.
    ///
    /// Running it twice on the same tree gives the same result.
    pub fn apply(&self, root: &mut Element) -> HighlightReport {
        clear_highlights(root);

        let mut report = HighlightReport::default();
        if is_blank(self.index.keyword()) {
            return report;
        }
        let Some(rows) = self.page.row_range(self.row_count) else {
            return report;
        };
        let first_row = *rows.start();

        for entry in self.index.entries_in(rows) {
            for &col in &entry.columns {
                let key = CellKey::new(entry.row_index, col);
                let cell = body_row_mut(root, entry.row_index - first_row)
                    .and_then(|row| row_cell_mut(row, col));
                let Some(cell) = cell else {
                    log::warn!("cell {key} not found in the rendered table");
                    report.missing += 1;
                    continue;
                };

                let color = if self.target == Some(key) {
                    self.colors.target_cell_bg
                } else {
                    self.colors.searched_cell_bg
                };
                cell.data.insert(SEARCHED_ATTR.to_string(), key.to_string());
                cell.style.background = Some(color);
                report.tagged += 1;
            }
        }

        if let Some(target) = self.target {
            match cell_by_data_mut(root, SEARCHED_ATTR, &target.to_string()) {
                Some(cell) => {
                    cell.style.background = Some(self.colors.target_cell_bg);
                    report.scroll = Some(ScrollRequest {
                        element_id: cell.id.clone(),
                        behavior: self.behavior,
                    });
                }
                None => log::debug!("target {target} is not on the rendered page"),
            }
        }

        log::debug!(
            "highlighted {} cells on page {} ({} missing)",
            report.tagged,
            self.page.current,
            report.missing
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ActiveColumns;
    use crate::dom::class;
    use crate::host::Record;
    use serde_json::json;

    fn data() -> Vec<Record> {
        serde_json::from_value(json!([
            {"name": "Kim", "city": "Seoul"},
            {"name": "Lee", "city": "Kimhae"},
            {"name": "Park", "city": "Busan"},
            {"name": "Kimberly", "city": "Kimpo"},
        ]))
        .unwrap()
    }

    fn render(data: &[Record], columns: &ActiveColumns, page: &PaginationView) -> Element {
        let rows = page.row_range(data.len()).unwrap();
        let body = Element::col()
            .class(class::TABLE_BODY)
            .child(Element::row().class(class::ROW).class(class::MEASURE_ROW))
            .children(data[rows.clone()].iter().zip(rows).map(|(record, n)| {
                Element::row()
                    .id(format!("row-{n}"))
                    .class(class::ROW)
                    .children(columns.iter().enumerate().map(|(c, key)| {
                        Element::text(record[key].as_str().unwrap_or_default())
                            .id(format!("cell-{n}-{c}"))
                            .class(class::CELL)
                    }))
            }));
        Element::col().id("table").child(body)
    }

    fn tagged(root: &mut Element) -> Vec<(String, String)> {
        let mut found = Vec::new();
        for_each_cell_mut(root, &mut |cell| {
            if let Some(key) = cell.get_data(SEARCHED_ATTR) {
                found.push((cell.id.clone(), key.clone()));
            }
        });
        found
    }

    fn page(current: usize) -> PaginationView {
        PaginationView {
            current,
            page_size: 2,
            synthesized: false,
        }
    }

    #[test]
    fn test_tags_only_current_page() {
        let data = data();
        let columns: ActiveColumns = ["name", "city"].into_iter().collect();
        let index = MatchIndex::build(&data, &columns, "Kim");
        let colors = HighlightColors::default();
        let mut root = render(&data, &columns, &page(2));

        let report = HighlightPass {
            index: &index,
            page: page(2),
            row_count: data.len(),
            target: Some(CellKey::new(3, 1)),
            colors: &colors,
            behavior: ScrollBehavior::Instant,
        }
        .apply(&mut root);

        assert_eq!(report.tagged, 2);
        assert_eq!(report.missing, 0);
        assert_eq!(
            tagged(&mut root),
            vec![
                ("cell-3-0".to_string(), "3_0".to_string()),
                ("cell-3-1".to_string(), "3_1".to_string()),
            ]
        );
        assert_eq!(
            report.scroll,
            Some(ScrollRequest {
                element_id: "cell-3-1".into(),
                behavior: ScrollBehavior::Instant
            })
        );

        let target = cell_by_data_mut(&mut root, SEARCHED_ATTR, "3_1").unwrap();
        assert_eq!(target.style.background, Some(colors.target_cell_bg));
        let other = cell_by_data_mut(&mut root, SEARCHED_ATTR, "3_0").unwrap();
        assert_eq!(other.style.background, Some(colors.searched_cell_bg));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let data = data();
        let columns: ActiveColumns = ["name", "city"].into_iter().collect();
        let index = MatchIndex::build(&data, &columns, "Kim");
        let colors = HighlightColors::default();
        let pass = HighlightPass {
            index: &index,
            page: page(1),
            row_count: data.len(),
            target: Some(CellKey::new(0, 0)),
            colors: &colors,
            behavior: ScrollBehavior::Smooth,
        };

        let mut root = render(&data, &columns, &page(1));
        let first = pass.apply(&mut root);
        let after_first = root.clone();
        let second = pass.apply(&mut root);

        assert_eq!(first, second);
        assert_eq!(root, after_first);
    }

    #[test]
    fn test_blank_keyword_only_clears() {
        let data = data();
        let columns: ActiveColumns = ["name", "city"].into_iter().collect();
        let colors = HighlightColors::default();
        let mut root = render(&data, &columns, &page(1));
        let kim = MatchIndex::build(&data, &columns, "Kim");
        let cleared = MatchIndex::build(&data, &columns, "");

        let mut pass = HighlightPass {
            index: &kim,
            page: page(1),
            row_count: data.len(),
            target: None,
            colors: &colors,
            behavior: ScrollBehavior::Instant,
        };
        assert_eq!(pass.apply(&mut root).tagged, 2);

        pass.index = &cleared;
        let report = pass.apply(&mut root);

        assert_eq!(report, HighlightReport::default());
        assert!(tagged(&mut root).is_empty());
        for_each_cell_mut(&mut root, &mut |cell| assert_eq!(cell.style.background, None));
    }

    #[test]
    fn test_missing_cells_are_skipped() {
        let data = data();
        let columns: ActiveColumns = ["name", "city"].into_iter().collect();
        let index = MatchIndex::build(&data, &columns, "Kim");
        let colors = HighlightColors::default();
        // Only the name column was rendered.
        let narrow: ActiveColumns = ["name"].into_iter().collect();
        let mut root = render(&data, &narrow, &page(1));

        let report = HighlightPass {
            index: &index,
            page: page(1),
            row_count: data.len(),
            target: Some(CellKey::new(1, 1)),
            colors: &colors,
            behavior: ScrollBehavior::Instant,
        }
        .apply(&mut root);

        assert_eq!(report.tagged, 1);
        assert_eq!(report.missing, 1);
        assert_eq!(report.scroll, None);
    }
}
