//! Find and replace over a single document
//!
//! - `locator` - literal wrap-around find
//! - `replacer` - literal replace-one and pattern replace-all

pub mod locator;
pub mod replacer;

pub use locator::{count_occurrences, locate, Match};
pub use replacer::{replace_all, replace_one};
