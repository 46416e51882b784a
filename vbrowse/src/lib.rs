//! Search, highlight and cross-page navigation for paginated data tables.
//!
//! The overlay indexes which cells of a table's full data source contain a
//! keyword, keeps a single "current match" pointer, works out which page has
//! to be shown to reveal that match, and re-applies highlight styling to the
//! rendered table tree whenever the host table updates.

pub mod color;
pub mod columns;
pub mod config;
pub mod cursor;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod host;
pub mod index;
pub mod overlay;
pub mod page;
pub mod status;

pub use color::{Rgb, Rgba};
pub use columns::ActiveColumns;
pub use config::{Anchor, HighlightColors, Horizontal, OverlayConfig, Vertical};
pub use cursor::{Cursor, Step};
pub use debounce::Debouncer;
pub use dom::{Element, LayoutResult, Rect, ScrollBehavior, ScrollState};
pub use error::{ConfigError, OverlayError, Unsupported};
pub use highlight::{HighlightReport, ScrollRequest};
pub use host::{ColumnMeta, DataIndex, Pagination, Record, TableHost};
pub use index::{CellKey, MatchEntry, MatchIndex};
pub use overlay::{Navigation, Overlay};
pub use page::{PageDecision, PaginationView, page_of};
pub use status::{Shake, Status, StatusView};
