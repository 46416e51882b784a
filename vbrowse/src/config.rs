//! Overlay options.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::color::Rgba;
use crate::dom::ScrollBehavior;
use crate::error::ConfigError;

pub const DEFAULT_PLACEHOLDER: &str = "Please Insert Keyword";
pub const DEFAULT_NO_RESULT: &str = "No Result Defined";
pub const DEFAULT_POSITION: &str = "left bottom";

const DEFAULT_SEARCH_AREA_BG: Rgba = Rgba::opaque(0x33, 0x33, 0x33);
const DEFAULT_SEARCH_AREA_FG: Rgba = Rgba::opaque(0xff, 0xff, 0xff);
const DEFAULT_SEARCHED_CELL_BG: Rgba = Rgba::new(0xff, 0xff, 0x00, 0x35);
const DEFAULT_TARGET_CELL_BG: Rgba = Rgba::new(0xff, 0x00, 0x00, 0x45);

/// Tint of the "no result" message.
pub const NO_RESULT_FG: Rgba = Rgba::opaque(0xff, 0x93, 0x5e);

/// Options for one overlay instance.
///
/// Every field is optional when deserialized; keys are camelCase.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// When false the overlay attaches but stays inert.
    pub active: bool,
    pub default_open: bool,
    pub placeholder: String,
    pub no_result_text: String,

    pub search_area_bg_color: String,
    pub search_area_font_color: String,
    pub searched_cell_bg_color: String,
    pub target_cell_bg_color: String,

    /// `"<left|right|center> <top|bottom>"`.
    pub position: String,
    pub movable: bool,
    pub smooth_scroll: bool,
    /// Wrap around at either end of the results.
    #[serde(rename = "loop")]
    pub wrap: bool,
    /// Stacking order of the search panel above the table.
    pub z_index: i16,

    pub debounce_ms: u64,
    pub shake_ms: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            active: true,
            default_open: false,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            no_result_text: DEFAULT_NO_RESULT.to_string(),
            search_area_bg_color: DEFAULT_SEARCH_AREA_BG.to_string(),
            search_area_font_color: DEFAULT_SEARCH_AREA_FG.to_string(),
            searched_cell_bg_color: DEFAULT_SEARCHED_CELL_BG.to_string(),
            target_cell_bg_color: DEFAULT_TARGET_CELL_BG.to_string(),
            position: DEFAULT_POSITION.to_string(),
            movable: true,
            smooth_scroll: false,
            wrap: false,
            z_index: 999,
            debounce_ms: 300,
            shake_ms: 300,
        }
    }
}

impl OverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn smooth_scroll(mut self, smooth: bool) -> Self {
        self.smooth_scroll = smooth;
        self
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn shake_duration(&self) -> Duration {
        Duration::from_millis(self.shake_ms)
    }

    pub fn scroll_behavior(&self) -> ScrollBehavior {
        if self.smooth_scroll {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        }
    }

    /// The panel anchor, falling back to the default on invalid input.
    pub fn anchor(&self) -> Anchor {
        Anchor::parse_or_default(&self.position)
    }

    /// Parsed colors, each falling back to its default on invalid input.
    pub fn colors(&self) -> HighlightColors {
        HighlightColors {
            search_area_bg: color_or(&self.search_area_bg_color, DEFAULT_SEARCH_AREA_BG),
            search_area_fg: color_or(&self.search_area_font_color, DEFAULT_SEARCH_AREA_FG),
            searched_cell_bg: color_or(&self.searched_cell_bg_color, DEFAULT_SEARCHED_CELL_BG),
            target_cell_bg: color_or(&self.target_cell_bg_color, DEFAULT_TARGET_CELL_BG),
        }
    }
}

fn color_or(value: &str, fallback: Rgba) -> Rgba {
    value.parse().unwrap_or_else(|e: ConfigError| {
        log::warn!("{e}, using {fallback}");
        fallback
    })
}

/// Resolved overlay colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightColors {
    pub search_area_bg: Rgba,
    pub search_area_fg: Rgba,
    pub searched_cell_bg: Rgba,
    pub target_cell_bg: Rgba,
}

impl Default for HighlightColors {
    fn default() -> Self {
        OverlayConfig::default().colors()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Top,
    Bottom,
}

/// Where the search panel sits over the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl Default for Anchor {
    fn default() -> Self {
        Self {
            horizontal: Horizontal::Left,
            vertical: Vertical::Bottom,
        }
    }
}

impl Anchor {
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|e: ConfigError| {
            log::warn!("{e}, using '{DEFAULT_POSITION}'");
            Self::default()
        })
    }
}

impl FromStr for Anchor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPosition(s.to_string());
        let parts: Vec<&str> = s.split(' ').collect();
        let [horizontal, vertical] = parts.as_slice() else {
            return Err(invalid());
        };

        let horizontal = match *horizontal {
            "left" => Horizontal::Left,
            "right" => Horizontal::Right,
            "center" => Horizontal::Center,
            _ => return Err(invalid()),
        };
        let vertical = match *vertical {
            "top" => Vertical::Top,
            "bottom" => Vertical::Bottom,
            _ => return Err(invalid()),
        };

        Ok(Self {
            horizontal,
            vertical,
        })
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let horizontal = match self.horizontal {
            Horizontal::Left => "left",
            Horizontal::Right => "right",
            Horizontal::Center => "center",
        };
        let vertical = match self.vertical {
            Vertical::Top => "top",
            Vertical::Bottom => "bottom",
        };
        write!(f, "{horizontal} {vertical}")
    }
}
