//! Output formatting for the command line tool.
//!
//! - [`terminal`] - coloured match rows

mod terminal;

pub use terminal::{format_match_row, pad_column};
