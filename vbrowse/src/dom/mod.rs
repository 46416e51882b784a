//! A minimal element tree for rendered tables.
//!
//! Host tables describe what they drew as [`Element`]s tagged with the
//! classes in [`class`]. The highlight pass re-queries that tree on every
//! update instead of holding references into it, since the host rebuilds it
//! freely between frames.

mod element;
mod rect;
mod scroll;

pub use element::{Content, Direction, Element, Style};
pub use rect::{LayoutResult, Rect};
pub use scroll::{ScrollBehavior, ScrollState};

/// Class names that mark the parts of a table.
pub mod class {
    /// Container of the data rows.
    pub const TABLE_BODY: &str = "table-body";
    pub const ROW: &str = "table-row";
    /// Placeholder row used by the host for column measuring. Never holds data.
    pub const MEASURE_ROW: &str = "measure-row";
    pub const CELL: &str = "table-cell";
}

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }
    root.child_nodes()
        .iter()
        .find_map(|child| find_element(child, id))
}

/// First element, depth first, matching `pred`.
pub fn find_mut<'a>(
    root: &'a mut Element,
    pred: &dyn Fn(&Element) -> bool,
) -> Option<&'a mut Element> {
    if pred(root) {
        return Some(root);
    }
    for child in root.child_nodes_mut() {
        if let Some(found) = find_mut(child, pred) {
            return Some(found);
        }
    }
    None
}

/// Visit every element, depth first.
pub fn walk_mut(root: &mut Element, visit: &mut dyn FnMut(&mut Element)) {
    visit(root);
    for child in root.child_nodes_mut() {
        walk_mut(child, visit);
    }
}

/// The `n`th data row of the table body, skipping placeholder rows.
pub fn body_row_mut(root: &mut Element, n: usize) -> Option<&mut Element> {
    let body = find_mut(root, &|el| el.has_class(class::TABLE_BODY))?;
    body.child_nodes_mut()
        .iter_mut()
        .filter(|el| el.has_class(class::ROW) && !el.has_class(class::MEASURE_ROW))
        .nth(n)
}

/// The `n`th cell of a row.
pub fn row_cell_mut(row: &mut Element, n: usize) -> Option<&mut Element> {
    row.child_nodes_mut()
        .iter_mut()
        .filter(|el| el.has_class(class::CELL))
        .nth(n)
}

/// The first cell whose data attribute `key` equals `value`.
pub fn cell_by_data_mut<'a>(
    root: &'a mut Element,
    key: &str,
    value: &str,
) -> Option<&'a mut Element> {
    find_mut(root, &|el| {
        el.has_class(class::CELL) && el.get_data(key).is_some_and(|v| v == value)
    })
}

/// Visit every cell of the tree.
pub fn for_each_cell_mut(root: &mut Element, visit: &mut dyn FnMut(&mut Element)) {
    walk_mut(root, &mut |el| {
        if el.has_class(class::CELL) {
            visit(el);
        }
    });
}
