//! A terminal table browser hosting the vbrowse search overlay.

pub mod app;
pub mod buffer;
pub mod cli;
pub mod error;
pub mod input;
pub mod layout;
pub mod paint;
pub mod table;
pub mod terminal;
pub mod text;
pub mod view;
