//! Double-buffered cell grid.

use vbrowse::{Rgb, Rgba};

use crate::text::char_width;

pub const DEFAULT_FG: Rgb = Rgb::new(0xdd, 0xdd, 0xdd);
pub const DEFAULT_BG: Rgb = Rgb::new(0x16, 0x16, 0x1c);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
    /// Second column of a wide character.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: DEFAULT_FG,
            bg: DEFAULT_BG,
            bold: false,
            dim: false,
            wide_continuation: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        (x < self.width && y < self.height).then(|| &self.cells[self.index(x, y)])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Composite `color` over the background of every cell in the area.
    pub fn tint(&mut self, x: u16, y: u16, width: u16, height: u16, color: Rgba) {
        for cy in y..y.saturating_add(height).min(self.height) {
            for cx in x..x.saturating_add(width).min(self.width) {
                if let Some(cell) = self.get_mut(cx, cy) {
                    cell.bg = color.over(cell.bg);
                }
            }
        }
    }

    /// Erase the characters in the area, keeping colors.
    pub fn blank(&mut self, x: u16, y: u16, width: u16, height: u16) {
        for cy in y..y.saturating_add(height).min(self.height) {
            for cx in x..x.saturating_add(width).min(self.width) {
                if let Some(cell) = self.get_mut(cx, cy) {
                    cell.char = ' ';
                    cell.wide_continuation = false;
                }
            }
        }
    }

    /// Write `text` from `(x, y)`, stopping at `max_x`. Returns the column
    /// after the last character written.
    pub fn put_str(&mut self, x: u16, y: u16, max_x: u16, text: &str, fg: Rgba, bold: bool) -> u16 {
        let max_x = max_x.min(self.width);
        let mut x = x;
        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if x + w > max_x {
                break;
            }
            if let Some(cell) = self.get_mut(x, y) {
                cell.char = ch;
                cell.fg = fg.over(cell.bg);
                cell.bold = bold;
                cell.wide_continuation = false;
            }
            if w == 2
                && let Some(cell) = self.get_mut(x + 1, y)
            {
                cell.char = ' ';
                cell.wide_continuation = true;
            }
            x += w;
        }
        x
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Make every cell differ from any painted frame, forcing a full redraw.
    pub fn invalidate(&mut self) {
        self.cells.fill(Cell {
            char: '\0',
            ..Cell::default()
        });
    }

    /// The characters of row `y`, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }
}
