//! The search overlay attached to one host table.
//!
//! [`Overlay`] owns all search state. The host drives it from its event
//! loop: keystrokes go to [`Overlay::input`], timers to [`Overlay::poll`],
//! and every table re-render is bracketed by [`Overlay::before_update`] and
//! [`Overlay::updated`], which re-applies highlighting to the fresh tree.

use std::time::Instant;

use crate::columns::{ActiveColumns, validate_columns};
use crate::config::{Anchor, HighlightColors, OverlayConfig};
use crate::cursor::{Cursor, Step};
use crate::debounce::Debouncer;
use crate::dom::Element;
use crate::error::OverlayError;
use crate::highlight::{HighlightPass, HighlightReport, ScrollRequest, clear_highlights};
use crate::host::{Pagination, Record, TableHost};
use crate::index::{CellKey, MatchIndex, is_blank};
use crate::page::{PageDecision, PaginationView};
use crate::status::{Shake, Status, StatusView};

/// The data source an index was built over: its length and location.
///
/// Hosts that swap, grow or shrink their rows get a different stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct SourceStamp {
    rows: usize,
    addr: usize,
}

impl SourceStamp {
    fn of(data: &[Record]) -> Self {
        Self {
            rows: data.len(),
            addr: data.as_ptr().addr(),
        }
    }
}

/// Result of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Nothing happened.
    Ignored,
    /// Nothing to show; the panel shakes.
    Shake,
    /// The target is on the shown page. It gets highlighted on the next frame.
    Highlight { target: CellKey },
    /// The host was asked to show `page`. The target gets highlighted when
    /// the host reports the re-render through [`Overlay::updated`].
    ChangePage { target: CellKey, page: usize },
}

#[derive(Debug)]
pub struct Overlay {
    config: OverlayConfig,
    colors: HighlightColors,
    anchor: Anchor,

    active: bool,
    opened: bool,
    loading: bool,

    columns: ActiveColumns,
    source: SourceStamp,
    index: MatchIndex,
    cursor: Cursor,
    target: Option<CellKey>,

    input: Debouncer<String>,
    shake: Shake,
    frame_requested: bool,
}

impl Overlay {
    /// Attach to a host table.
    ///
    /// Fails when the host has no column metadata. With `active` turned off
    /// the overlay attaches without looking at the host and ignores every
    /// call.
    pub fn attach<H: TableHost + ?Sized>(
        config: OverlayConfig,
        host: &H,
    ) -> Result<Self, OverlayError> {
        let active = config.active;
        let (columns, source) = if active {
            (
                ActiveColumns::from_meta(&validate_columns(host.columns())?),
                SourceStamp::of(host.data_source()),
            )
        } else {
            log::debug!("overlay disabled, attaching inert");
            (ActiveColumns::default(), SourceStamp::default())
        };

        let overlay = Self {
            colors: config.colors(),
            anchor: config.anchor(),
            active,
            opened: active && config.default_open,
            loading: false,
            columns,
            source,
            index: MatchIndex::default(),
            cursor: Cursor::default(),
            target: None,
            input: Debouncer::new(config.debounce()),
            shake: Shake::new(config.shake_duration()),
            frame_requested: false,
            config,
        };
        log::debug!(
            "overlay attached: {} searchable columns, open={}",
            overlay.columns.len(),
            overlay.opened
        );
        Ok(overlay)
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn colors(&self) -> &HighlightColors {
        &self.colors
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn columns(&self) -> &ActiveColumns {
        &self.columns
    }

    /// The keyword of the current results.
    pub fn keyword(&self) -> &str {
        self.index.keyword()
    }

    pub fn index(&self) -> &MatchIndex {
        &self.index
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn target(&self) -> Option<CellKey> {
        self.target
    }

    pub fn open(&mut self) {
        if !self.active || self.opened {
            return;
        }
        log::debug!("overlay opened");
        self.opened = true;
        self.frame_requested = true;
    }

    /// Close the panel and strip all highlighting from the table.
    pub fn close(&mut self, dom: &mut Element) {
        if !self.active {
            return;
        }
        log::debug!("overlay closed");
        self.opened = false;
        self.frame_requested = false;
        clear_highlights(dom);
    }

    pub fn toggle(&mut self, dom: &mut Element) {
        if self.opened {
            self.close(dom);
        } else {
            self.open();
        }
    }

    /// Feed the current input text. The search runs once the input has been
    /// quiet for the debounce delay; see [`Overlay::poll`].
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        if !self.active {
            return;
        }
        self.input.push(text.into(), now);
    }

    /// Run the debounced search if it's due.
    pub fn poll<H: TableHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> Option<Navigation> {
        let keyword = self.input.poll(now)?;
        Some(self.search(host, &keyword, now))
    }

    /// Rebuild the results for `keyword` and show the first match.
    ///
    /// Searching for the keyword already shown does nothing.
    pub fn search<H: TableHost + ?Sized>(
        &mut self,
        host: &mut H,
        keyword: &str,
        now: Instant,
    ) -> Navigation {
        if !self.active || keyword == self.index.keyword() {
            return Navigation::Ignored;
        }

        self.rebuild(host.data_source(), keyword);
        log::debug!("search '{keyword}': {} matches", self.index.total());

        if !self.index.is_empty() {
            return self.next(host, now);
        }

        // Nothing to show: strip the old highlights on the next frame.
        self.frame_requested = true;
        if is_blank(keyword) {
            Navigation::Ignored
        } else {
            self.shake.trigger(now);
            Navigation::Shake
        }
    }

    /// Enter in the input: show the next match without re-running the
    /// search, even while an edit is still debouncing.
    pub fn enter<H: TableHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> Navigation {
        self.next(host, now)
    }

    pub fn next<H: TableHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> Navigation {
        if !self.active {
            return Navigation::Ignored;
        }
        let step = self.cursor.advance(&self.index, self.config.wrap);
        self.navigate(host, step, now)
    }

    pub fn previous<H: TableHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> Navigation {
        if !self.active {
            return Navigation::Ignored;
        }
        let step = self.cursor.retreat(&self.index, self.config.wrap);
        self.navigate(host, step, now)
    }

    /// Show the match at a 1-based position typed into the jump field.
    pub fn jump_to<H: TableHost + ?Sized>(
        &mut self,
        host: &mut H,
        position: &str,
        now: Instant,
    ) -> Navigation {
        if !self.active {
            return Navigation::Ignored;
        }
        let step = self.cursor.jump_to(&self.index, position, self.config.wrap);
        self.navigate(host, step, now)
    }

    fn navigate<H: TableHost + ?Sized>(&mut self, host: &mut H, step: Step, now: Instant) -> Navigation {
        let target = match step {
            Step::Ignored => return Navigation::Ignored,
            Step::End => {
                log::debug!("end of results");
                self.shake.trigger(now);
                return Navigation::Shake;
            }
            Step::Target(target) => target,
        };

        self.target = Some(target);
        let view = PaginationView::resolve(host);
        match view.decide(target.row) {
            PageDecision::Stay => {
                log::debug!("target {target} is on page {}", view.current);
                self.frame_requested = true;
                Navigation::Highlight { target }
            }
            PageDecision::Change(page) => {
                log::debug!("target {target} needs page {page}");
                request_page(host, Pagination::new(page, view.page_size));
                Navigation::ChangePage { target, page }
            }
        }
    }

    /// The host is about to re-render the table.
    pub fn before_update(&mut self) {
        if self.active {
            self.loading = true;
        }
    }

    /// The host re-rendered the table into `dom`.
    ///
    /// Picks up column and data changes, re-indexing the keyword when they
    /// happen, and while open re-applies highlighting.
    pub fn updated<H: TableHost + ?Sized>(&mut self, host: &H, dom: &mut Element) -> Option<ScrollRequest> {
        if !self.active {
            return None;
        }
        let mut stale = false;
        if let Some(columns) = host.columns() {
            let columns = ActiveColumns::from_meta(&columns);
            stale |= columns != self.columns;
            self.columns = columns;
        }
        stale |= SourceStamp::of(host.data_source()) != self.source;
        if stale {
            let keyword = self.index.keyword().to_string();
            self.rebuild(host.data_source(), &keyword);
            log::debug!(
                "table columns or data changed, re-indexed '{keyword}': {} matches",
                self.index.total()
            );
        }
        self.loading = false;

        if !self.opened {
            self.frame_requested = false;
            return None;
        }
        self.highlight(host, dom).scroll
    }

    /// Index `data` for `keyword` from scratch. The cursor restarts and the
    /// target is dropped.
    fn rebuild(&mut self, data: &[Record], keyword: &str) {
        self.index = MatchIndex::build(data, &self.columns, keyword);
        self.cursor = Cursor::new(&self.index);
        self.target = None;
        self.source = SourceStamp::of(data);
    }

    /// Whether a highlight pass is waiting for the next frame.
    pub fn wants_frame(&self) -> bool {
        self.frame_requested
    }

    /// Run the highlight pass on the tree as currently rendered.
    pub fn highlight<H: TableHost + ?Sized>(&mut self, host: &H, dom: &mut Element) -> HighlightReport {
        self.frame_requested = false;
        if !self.active || !self.opened {
            return HighlightReport::default();
        }
        HighlightPass {
            index: &self.index,
            page: PaginationView::resolve(host),
            row_count: host.data_source().len(),
            target: self.target,
            colors: &self.colors,
            behavior: self.config.scroll_behavior(),
        }
        .apply(dom)
    }

    pub fn status(&self, now: Instant) -> Status {
        Status {
            view: StatusView::present(self.index.keyword(), &self.cursor, &self.config.no_result_text),
            shaking: self.shake.is_active(now),
            loading: self.loading,
        }
    }

    /// Horizontal offset of the panel while shaking.
    pub fn shake_offset(&self, now: Instant) -> i16 {
        self.shake.offset(now)
    }

    /// The next instant the overlay needs the event loop to wake it.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        [self.input.deadline(), self.shake.deadline(now)]
            .into_iter()
            .flatten()
            .min()
    }
}

fn request_page<H: TableHost + ?Sized>(host: &mut H, pagination: Pagination) {
    if let Err(e) = host.set_pagination(pagination) {
        match host.pagination_mut() {
            Some(current) => {
                log::warn!("{e}, updating pagination in place");
                current.current = pagination.current;
            }
            None => log::warn!("{e}, page {} can't be shown", pagination.current),
        }
    }
}
