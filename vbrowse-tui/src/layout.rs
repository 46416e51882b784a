//! Sizing element trees and placing the search panel.

use vbrowse::dom::{Content, Direction};
use vbrowse::{Anchor, Element, Horizontal, LayoutResult, Rect, Vertical};

use crate::text::display_width;

/// Rectangles of a laid-out tree, in content coordinates.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub rects: LayoutResult,
    /// Size of the whole tree.
    pub size: (u16, u16),
}

/// Lay out `root` at its natural size, starting at the origin.
///
/// Text is a single line as wide as its content, unless a width is set.
/// Empty elements take no height.
pub fn layout(root: &Element) -> Layout {
    let mut rects = LayoutResult::new();
    let size = place(root, 0, 0, &mut rects);
    Layout { rects, size }
}

fn place(element: &Element, x: u16, y: u16, rects: &mut LayoutResult) -> (u16, u16) {
    let (width, height) = match &element.content {
        Content::None => (element.width.unwrap_or(0), 0),
        Content::Text(text) => (
            element
                .width
                .unwrap_or_else(|| display_width(text).min(u16::MAX as usize) as u16),
            1,
        ),
        Content::Children(children) => {
            let (mut main, mut cross) = (0u16, 0u16);
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    main = main.saturating_add(element.gap);
                }
                let (w, h) = match element.direction {
                    Direction::Row => place(child, x.saturating_add(main), y, rects),
                    Direction::Column => place(child, x, y.saturating_add(main), rects),
                };
                let (along, across) = match element.direction {
                    Direction::Row => (w, h),
                    Direction::Column => (h, w),
                };
                main = main.saturating_add(along);
                cross = cross.max(across);
            }
            let (w, h) = match element.direction {
                Direction::Row => (main, cross),
                Direction::Column => (cross, main),
            };
            (element.width.unwrap_or(w), h)
        }
    };

    rects.insert(element.id.clone(), Rect::new(x, y, width, height));
    (width, height)
}

/// Where the panel goes inside `area`.
///
/// `nudge` moves it away from its anchor and `shake` jiggles it sideways;
/// the result always stays inside `area`.
pub fn place_panel(anchor: Anchor, area: Rect, size: (u16, u16), nudge: (i16, i16), shake: i16) -> Rect {
    let width = size.0.min(area.width);
    let height = size.1.min(area.height);

    let x = match anchor.horizontal {
        Horizontal::Left => area.x,
        Horizontal::Right => area.right() - width,
        Horizontal::Center => area.x + (area.width - width) / 2,
    };
    let y = match anchor.vertical {
        Vertical::Top => area.y,
        Vertical::Bottom => area.bottom() - height,
    };

    let clamp = |at: u16, delta: i16, lo: u16, hi: u16| {
        (i32::from(at) + i32::from(delta)).clamp(i32::from(lo), i32::from(hi)) as u16
    };
    Rect::new(
        clamp(x, nudge.0.saturating_add(shake), area.x, area.right() - width),
        clamp(y, nudge.1, area.y, area.bottom() - height),
        width,
        height,
    )
}
