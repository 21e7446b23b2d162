//! Text measurement and locale-stable formatting.

pub mod format;
pub mod metrics;
pub mod numerals;

pub use format::{format_amount, format_quantity};
pub use metrics::{text_width, Font};
pub use numerals::amount_in_words;
