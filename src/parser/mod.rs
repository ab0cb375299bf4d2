//! Item file parsing.

pub mod items;

pub use items::{load_items, parse_items, MalformedItem, ParsedItems};
