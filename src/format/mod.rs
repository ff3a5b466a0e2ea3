//! Display formatting for durations and timestamps.

pub mod date;
pub mod duration;

pub use date::Timestamp;
pub use duration::format_duration;
