//! The table browser: state, key handling and the event loop.

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use log::{debug, trace};
use tokio::time::sleep_until;
use vbrowse::{
    Element, Navigation, Overlay, OverlayConfig, Rect, Rgba, ScrollRequest, ScrollState, StatusView,
    TableHost,
};

use crate::buffer::Buffer;
use crate::error::AppError;
use crate::input::{Edit, TextInput};
use crate::layout::{Layout, layout, place_panel};
use crate::paint::paint;
use crate::table::DemoTable;
use crate::terminal::Terminal;
use crate::view::{self, PanelFocus, PanelView};

/// Repaint interval while something animates.
const FRAME: Duration = Duration::from_millis(16);
const FOOTER_BG: Rgba = Rgba::opaque(0x26, 0x26, 0x30);
const FOOTER_FG: Rgba = Rgba::opaque(0x8a, 0x8a, 0x99);

/// Where keys go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Search,
    Jumper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Table,
    Panel,
}

pub struct App {
    table: DemoTable,
    overlay: Overlay,

    widths: Vec<u16>,
    header: Element,
    header_layout: Layout,
    body: Element,
    body_layout: Layout,
    scroll: ScrollState,
    /// Size of the table body area on screen.
    viewport: (u16, u16),

    search: TextInput,
    jumper: TextInput,
    focus: Focus,
    /// Panel displacement from its anchor.
    nudge: (i16, i16),
    quit: bool,
}

impl App {
    pub fn new(table: DemoTable, config: OverlayConfig) -> Result<Self, AppError> {
        let overlay = Overlay::attach(config, &table)?;
        let widths = view::column_widths(&table);
        let header = view::header_tree(&table, &widths);
        let header_layout = layout(&header);
        let focus = if overlay.is_open() {
            Focus::Search
        } else {
            Focus::Table
        };

        let mut app = Self {
            table,
            overlay,
            widths,
            header,
            header_layout,
            body: Element::col(),
            body_layout: Layout::default(),
            scroll: ScrollState::new(),
            viewport: (80, 22),
            search: TextInput::new(),
            jumper: TextInput::numeric(),
            focus,
            nudge: (0, 0),
            quit: false,
        };
        app.sync(Instant::now());
        Ok(app)
    }

    pub fn table(&self) -> &DemoTable {
        &self.table
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The rendered table body.
    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn search_text(&self) -> &str {
        self.search.text()
    }

    pub fn nudge(&self) -> (i16, i16) {
        self.nudge
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn scroll_offset(&self, now: Instant) -> (u16, u16) {
        self.scroll.offset(now)
    }

    /// Track the terminal size.
    pub fn resize(&mut self, (width, height): (u16, u16)) {
        self.viewport = (width, height.saturating_sub(2));
    }

    pub async fn run(mut self, terminal: &mut Terminal) -> Result<(), AppError> {
        let mut events = EventStream::new();
        self.resize(terminal.size());

        while !self.quit {
            let now = Instant::now();
            self.draw(terminal, now)?;

            let deadline = self.next_deadline(now);
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => self.handle_event(event, Instant::now()),
                    Some(Err(e)) => {
                        log::error!("event stream error: {e}");
                        return Err(e.into());
                    }
                    None => break,
                },
                _ = sleep_until_optional(deadline) => trace!("deadline reached"),
            }

            let now = Instant::now();
            self.tick(now);
            if self.table.is_dirty() {
                // Show the loading state for the frame before the table changes.
                self.overlay.before_update();
                self.draw(terminal, now)?;
            }
            self.sync(now);
        }

        debug!("quit");
        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal, now: Instant) -> Result<(), AppError> {
        terminal.draw(|buf| self.paint(buf, now))?;
        Ok(())
    }

    /// The next instant the loop must wake up without input.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let animating = self.scroll.is_animating(now) || self.overlay.status(now).shaking;
        [self.overlay.next_deadline(now), animating.then(|| now + FRAME)]
            .into_iter()
            .flatten()
            .min()
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key, now),
            Event::Resize(width, height) => self.resize((width, height)),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        trace!("key {key:?} in {:?}", self.focus);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.quit = true;
                return;
            }
            KeyCode::Char('f') if ctrl => {
                self.open_search();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Table => self.table_key(key, now),
            Focus::Search => self.search_key(key, now),
            Focus::Jumper => self.jumper_key(key, now),
        }
    }

    fn table_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('/') => self.open_search(),
            KeyCode::Esc if self.overlay.is_open() => self.close_search(),
            KeyCode::Tab if self.overlay.is_open() => self.focus = Focus::Search,
            KeyCode::Char('n') => {
                let nav = self.overlay.next(&mut self.table, now);
                self.navigated(nav);
            }
            KeyCode::Char('N') => {
                let nav = self.overlay.previous(&mut self.table, now);
                self.navigated(nav);
            }
            KeyCode::Up => self.scroll_by(0, -1, now),
            KeyCode::Down => self.scroll_by(0, 1, now),
            KeyCode::Left => self.scroll_by(-4, 0, now),
            KeyCode::Right => self.scroll_by(4, 0, now),
            KeyCode::PageDown => self.change_page(|table| table.next_page()),
            KeyCode::PageUp => self.change_page(|table| table.previous_page()),
            KeyCode::Home => self.change_page(|table| table.go_to_page(1)),
            KeyCode::End => self.change_page(|table| table.go_to_page(table.page_count())),
            _ => {}
        }
    }

    fn search_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::ALT) {
            let delta = match key.code {
                KeyCode::Left => (-2, 0),
                KeyCode::Right => (2, 0),
                KeyCode::Up => (0, -1),
                KeyCode::Down => (0, 1),
                _ => return,
            };
            self.move_panel(delta);
            return;
        }

        match key.code {
            KeyCode::Esc => self.close_search(),
            KeyCode::Enter => {
                let nav = self.overlay.enter(&mut self.table, now);
                self.navigated(nav);
            }
            KeyCode::Down => {
                let nav = self.overlay.next(&mut self.table, now);
                self.navigated(nav);
            }
            KeyCode::Up => {
                let nav = self.overlay.previous(&mut self.table, now);
                self.navigated(nav);
            }
            KeyCode::Tab => match self.overlay.status(now).view {
                StatusView::Position { current, .. } => {
                    self.jumper.set(current.to_string());
                    self.focus = Focus::Jumper;
                }
                _ => self.focus = Focus::Table,
            },
            KeyCode::BackTab => self.focus = Focus::Table,
            _ => {
                if self.search.handle_key(key) == Edit::Changed {
                    self.overlay.input(self.search.text(), now);
                }
            }
        }
    }

    fn jumper_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter => {
                let nav = self.overlay.jump_to(&mut self.table, self.jumper.text(), now);
                self.navigated(nav);
                self.focus = Focus::Search;
            }
            KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => self.focus = Focus::Search,
            _ => {
                self.jumper.handle_key(key);
            }
        }
    }

    fn open_search(&mut self) {
        self.overlay.open();
        if self.overlay.is_open() {
            self.focus = Focus::Search;
        }
    }

    fn close_search(&mut self) {
        self.overlay.close(&mut self.body);
        self.focus = Focus::Table;
    }

    fn navigated(&mut self, nav: Navigation) {
        match nav {
            Navigation::ChangePage { target, page } => debug!("showing {target} on page {page}"),
            Navigation::Highlight { target } => debug!("showing {target}"),
            Navigation::Shake | Navigation::Ignored => trace!("navigation: {nav:?}"),
        }
    }

    fn move_panel(&mut self, (dx, dy): (i16, i16)) {
        if !self.overlay.config().movable {
            return;
        }
        let max_x = self.viewport.0.min(i16::MAX as u16) as i16;
        let max_y = self.viewport.1.min(i16::MAX as u16) as i16;
        self.nudge = (
            (self.nudge.0 + dx).clamp(-max_x, max_x),
            (self.nudge.1 + dy).clamp(-max_y, max_y),
        );
    }

    fn change_page(&mut self, change: impl FnOnce(&mut DemoTable)) {
        change(&mut self.table);
        self.scroll.reset();
    }

    fn scroll_by(&mut self, dx: i32, dy: i32, now: Instant) {
        self.scroll
            .scroll_by(dx, dy, self.viewport, self.body_layout.size, now);
    }

    fn scroll_to(&mut self, request: &ScrollRequest, now: Instant) {
        match self.body_layout.rects.get(&request.element_id) {
            Some(rect) => self.scroll.scroll_into_view(
                *rect,
                self.viewport,
                self.body_layout.size,
                request.behavior,
                now,
            ),
            None => log::warn!("no layout for {}", request.element_id),
        }
    }

    /// Run timers: the debounced search and scroll animation.
    pub fn tick(&mut self, now: Instant) {
        if let Some(nav) = self.overlay.poll(&mut self.table, now) {
            self.navigated(nav);
        }
        self.scroll.settle(now);
    }

    /// Re-render the table if it changed, otherwise run a pending highlight
    /// pass on the current tree.
    pub fn sync(&mut self, now: Instant) {
        if self.table.take_dirty() {
            self.overlay.before_update();
            self.body = view::table_tree(&self.table, &self.widths);
            self.body_layout = layout(&self.body);
            if let Some(request) = self.overlay.updated(&self.table, &mut self.body) {
                self.scroll_to(&request, now);
            }
        } else if self.overlay.wants_frame() {
            let report = self.overlay.highlight(&self.table, &mut self.body);
            if let Some(request) = report.scroll {
                self.scroll_to(&request, now);
            }
        }
    }

    /// Paint a full frame.
    pub fn paint(&self, buf: &mut Buffer, now: Instant) {
        let (width, height) = (buf.width(), buf.height());
        if height < 3 {
            return;
        }
        let body_area = Rect::new(0, 1, width, height - 2);
        let offset = self.scroll.offset(now);

        paint(
            &self.header,
            &self.header_layout.rects,
            buf,
            Rect::new(0, 0, width, 1),
            (offset.0, 0),
        );

        let mut layers = [(0, Layer::Table), (self.overlay.config().z_index, Layer::Panel)];
        layers.sort_by_key(|(z, _)| *z);
        for (_, layer) in layers {
            match layer {
                Layer::Table => paint(&self.body, &self.body_layout.rects, buf, body_area, offset),
                Layer::Panel if self.overlay.is_open() => self.paint_panel(buf, body_area, now),
                Layer::Panel => {}
            }
        }

        self.paint_footer(buf, Rect::new(0, height - 1, width, 1));
    }

    fn paint_panel(&self, buf: &mut Buffer, area: Rect, now: Instant) {
        let status = self.overlay.status(now);
        let focus = match self.focus {
            Focus::Search => PanelFocus::Search,
            Focus::Jumper => PanelFocus::Jumper,
            Focus::Table => PanelFocus::Table,
        };
        let tree = view::panel_tree(&PanelView {
            search: &self.search,
            jumper: &self.jumper,
            focus,
            placeholder: &self.overlay.config().placeholder,
            status: &status,
            colors: self.overlay.colors(),
        });
        let panel_layout = layout(&tree);
        let rect = place_panel(
            self.overlay.anchor(),
            area,
            panel_layout.size,
            self.nudge,
            self.overlay.shake_offset(now),
        );

        buf.blank(rect.x, rect.y, rect.width, rect.height);
        paint(&tree, &panel_layout.rects, buf, rect, (0, 0));
    }

    fn paint_footer(&self, buf: &mut Buffer, area: Rect) {
        buf.tint(area.x, area.y, area.width, area.height, FOOTER_BG);
        let hints = match self.focus {
            Focus::Table => "ctrl+f search · n/N match · pgup/pgdn page · q quit",
            Focus::Search => "enter next · ↑/↓ match · tab jump · alt+arrows move · esc close",
            Focus::Jumper => "enter jump · esc back",
        };
        let text = format!(
            " page {}/{} · {} rows · {hints}",
            self.table.current_page(),
            self.table.page_count(),
            self.table.data_source().len(),
        );
        buf.put_str(area.x, area.y, area.right(), &text, FOOTER_FG, false);
    }
}

/// Sleep until the deadline, or forever without one.
async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}
