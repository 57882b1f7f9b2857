//! Producer award intervals.
//!
//! - Producers: split a `producers` field into names
//! - Intervals: group wins by producer and keep the min/max gaps

pub mod intervals;
pub mod producers;

pub use intervals::{award_intervals, select_extremes, ProducerWinYears};
pub use producers::split_producers;
