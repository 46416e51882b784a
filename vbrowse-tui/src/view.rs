//! Element trees for the table and the search panel.

use serde_json::Value;
use vbrowse::config::NO_RESULT_FG;
use vbrowse::dom::{Style, class};
use vbrowse::{
    ColumnMeta, DataIndex, Element, HighlightColors, Record, Rgba, Status, StatusView, TableHost,
};

use crate::input::TextInput;
use crate::table::DemoTable;
use crate::text::{display_width, truncate_to_width};

/// Cells of columns the overlay doesn't search.
pub const DISPLAY_CELL: &str = "display-cell";

pub const TABLE_ID: &str = "table";
pub const HEADER_ID: &str = "table-header";
pub const PANEL_ID: &str = "search-panel";

const MAX_COLUMN_WIDTH: usize = 24;
const COLUMN_GAP: u16 = 1;
const STRIPE: Rgba = Rgba::new(0xff, 0xff, 0xff, 0x0a);
const HEADER_FG: Rgba = Rgba::opaque(0x9c, 0xc8, 0xff);

fn visible_columns(table: &DemoTable) -> impl Iterator<Item = &ColumnMeta> {
    table.columns_meta().iter().filter(|c| !c.default_hidden)
}

/// Text shown for a column of a record. `row` is the 0-based data row.
pub fn cell_display(column: &ColumnMeta, record: &Record, row: usize) -> String {
    let value = match &column.data_index {
        None => return (row + 1).to_string(),
        Some(DataIndex::Key(key)) => record.get(key),
        Some(DataIndex::Path(path)) => path
            .iter()
            .try_fold(None::<&Value>, |at, key| match at {
                None => record.get(key).map(Some),
                Some(value) => value.get(key).map(Some),
            })
            .flatten(),
    };
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Column widths fitting titles and every value of the data source.
pub fn column_widths(table: &DemoTable) -> Vec<u16> {
    visible_columns(table)
        .map(|column| {
            let widest = table
                .data_source()
                .iter()
                .enumerate()
                .map(|(row, record)| display_width(&cell_display(column, record, row)))
                .chain([display_width(&column.title)])
                .max()
                .unwrap_or(0);
            widest.clamp(1, MAX_COLUMN_WIDTH) as u16
        })
        .collect()
}

pub fn header_tree(table: &DemoTable, widths: &[u16]) -> Element {
    Element::row()
        .id(HEADER_ID)
        .gap(COLUMN_GAP)
        .style(Style::new().foreground(HEADER_FG).bold())
        .children(visible_columns(table).zip(widths).map(|(column, &width)| {
            Element::text(truncate_to_width(&column.title, width as usize)).width(width)
        }))
}

/// The shown page as a table body: a measure row, then one row per record
/// with one cell per visible column.
///
/// Only searchable columns get the cell class, so a cell's position among
/// them matches its column's position in the overlay's active columns.
pub fn table_tree(table: &DemoTable, widths: &[u16]) -> Element {
    let (first_row, records) = table.page_rows();
    let columns: Vec<&ColumnMeta> = visible_columns(table).collect();

    let rows = records.iter().enumerate().map(|(i, record)| {
        let row = first_row + i;
        let mut el = Element::row()
            .id(format!("row-{row}"))
            .class(class::ROW)
            .gap(COLUMN_GAP)
            .children(columns.iter().zip(widths).enumerate().map(|(c, (column, &width))| {
                let text = truncate_to_width(&cell_display(column, record, row), width as usize);
                let cell = Element::text(text).id(format!("cell-{row}-{c}")).width(width);
                if column.key().is_some() {
                    cell.class(class::CELL)
                } else {
                    cell.class(DISPLAY_CELL).style(Style::new().dim())
                }
            }));
        if i % 2 == 1 {
            el = el.style(Style::new().background(STRIPE));
        }
        el
    });

    Element::col().id(TABLE_ID).child(
        Element::col()
            .id("table-body")
            .class(class::TABLE_BODY)
            .child(Element::row().class(class::ROW).class(class::MEASURE_ROW))
            .children(rows),
    )
}

/// Which panel field has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    Search,
    Jumper,
    Table,
}

pub struct PanelView<'a> {
    pub search: &'a TextInput,
    pub jumper: &'a TextInput,
    pub focus: PanelFocus,
    pub placeholder: &'a str,
    pub status: &'a Status,
    pub colors: &'a HighlightColors,
}

fn with_cursor(input: &TextInput, focused: bool) -> String {
    let mut text = input.text().to_string();
    if focused {
        let at = text
            .char_indices()
            .nth(input.cursor())
            .map_or(text.len(), |(i, _)| i);
        text.insert(at, '▏');
    }
    text
}

pub fn panel_tree(view: &PanelView<'_>) -> Element {
    let colors = view.colors;
    let search = if view.search.text().is_empty() && view.focus != PanelFocus::Search {
        Element::text(view.placeholder).style(Style::new().dim())
    } else {
        Element::text(with_cursor(view.search, view.focus == PanelFocus::Search))
    };

    let mut panel = Element::row()
        .id(PANEL_ID)
        .gap(1)
        .style(
            Style::new()
                .background(colors.search_area_bg)
                .foreground(colors.search_area_fg),
        )
        .child(Element::text(" /"))
        .child(search.width(22));

    match &view.status.view {
        StatusView::Hidden => {}
        StatusView::NoResult { message } => {
            panel = panel
                .child(Element::text("│").style(Style::new().dim()))
                .child(Element::text(message.as_str()).style(Style::new().foreground(NO_RESULT_FG)));
        }
        StatusView::Position { current, total } => {
            let position = if view.focus == PanelFocus::Jumper {
                with_cursor(view.jumper, true)
            } else {
                current.to_string()
            };
            panel = panel
                .child(Element::text("│").style(Style::new().dim()))
                .child(Element::text(format!("[{position}] / {total}")))
                .child(Element::text("↑↓").style(Style::new().dim()));
        }
    }

    if view.status.loading {
        panel = panel.child(Element::text("…"));
    }
    panel.child(Element::text("esc ").style(Style::new().dim()))
}
