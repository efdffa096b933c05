//! Static game lookup tables.

pub mod aliases;
mod stats;

pub use aliases::{item_alias, monster_alias};
pub use stats::{STAT_WORDS, Stat};
