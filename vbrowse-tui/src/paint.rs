//! Painting laid-out trees into the cell buffer.

use vbrowse::dom::Content;
use vbrowse::{Element, LayoutResult, Rect, Rgba};

use crate::buffer::{Buffer, DEFAULT_FG};
use crate::text::char_width;

#[derive(Debug, Clone, Copy)]
struct Inherited {
    fg: Rgba,
    dim: bool,
    bold: bool,
}

/// Paint `root` into `viewport` (screen coordinates), with content offset
/// `scroll` at the viewport's top-left corner. Nothing outside the viewport
/// is touched.
///
/// Translucent backgrounds are composited over what is already painted.
pub fn paint(root: &Element, layout: &LayoutResult, buf: &mut Buffer, viewport: Rect, scroll: (u16, u16)) {
    let inherited = Inherited {
        fg: Rgba::opaque(DEFAULT_FG.r, DEFAULT_FG.g, DEFAULT_FG.b),
        dim: false,
        bold: false,
    };
    let viewport = viewport.intersect(Rect::from_size(buf.width(), buf.height()));
    paint_element(root, layout, buf, viewport, scroll, inherited);
}

fn paint_element(
    element: &Element,
    layout: &LayoutResult,
    buf: &mut Buffer,
    viewport: Rect,
    scroll: (u16, u16),
    inherited: Inherited,
) {
    let Some(rect) = layout.get(&element.id) else {
        return;
    };
    let style = &element.style;
    let inherited = Inherited {
        fg: style.foreground.unwrap_or(inherited.fg),
        dim: inherited.dim || style.dim,
        bold: inherited.bold || style.bold,
    };

    let x = i32::from(viewport.x) + i32::from(rect.x) - i32::from(scroll.0);
    let y = i32::from(viewport.y) + i32::from(rect.y) - i32::from(scroll.1);

    if let Some(bg) = style.background
        && let Some(area) = to_screen(x, y, rect.width, rect.height, viewport)
    {
        buf.tint(area.x, area.y, area.width, area.height, bg);
    }

    match &element.content {
        Content::None => {}
        Content::Text(text) => paint_text(text, x, y, rect.width, buf, viewport, inherited),
        Content::Children(children) => {
            for child in children {
                paint_element(child, layout, buf, viewport, scroll, inherited);
            }
        }
    }
}

/// The visible part of a content rectangle at screen position `(x, y)`.
fn to_screen(x: i32, y: i32, width: u16, height: u16, viewport: Rect) -> Option<Rect> {
    let left = x.max(i32::from(viewport.x));
    let top = y.max(i32::from(viewport.y));
    let right = (x + i32::from(width)).min(i32::from(viewport.right()));
    let bottom = (y + i32::from(height)).min(i32::from(viewport.bottom()));
    (left < right && top < bottom).then(|| {
        Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        )
    })
}

fn paint_text(
    text: &str,
    x: i32,
    y: i32,
    width: u16,
    buf: &mut Buffer,
    viewport: Rect,
    style: Inherited,
) {
    if y < i32::from(viewport.y) || y >= i32::from(viewport.bottom()) {
        return;
    }
    let limit = (x + i32::from(width)).min(i32::from(viewport.right()));

    let mut cx = x;
    for ch in text.chars() {
        let w = char_width(ch) as i32;
        if w == 0 {
            continue;
        }
        if cx + w > limit {
            break;
        }
        if cx >= i32::from(viewport.x) {
            let (col, row) = (cx as u16, y as u16);
            if let Some(cell) = buf.get_mut(col, row) {
                cell.char = ch;
                cell.fg = style.fg.over(cell.bg);
                cell.bold = style.bold;
                cell.dim = style.dim;
                cell.wide_continuation = false;
            }
            if w == 2
                && let Some(cell) = buf.get_mut(col + 1, row)
            {
                cell.char = ' ';
                cell.wide_continuation = true;
            }
        }
        cx += w;
    }
}
