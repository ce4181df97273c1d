//! Sentinel values standing in for "not found".

/// Vote counts, award counts.
pub const COUNT_DEFAULT: u64 = 0;
/// Star ratings.
pub const RATING_DEFAULT: f64 = 0.0;
/// Unknown day, month or year of a release date.
pub const DATE_PART_UNKNOWN: i32 = -1;
/// Unknown runtime, in seconds.
pub const RUNTIME_UNKNOWN: u64 = 0;
/// Unknown season or episode number.
pub const INDEX_UNKNOWN: i32 = -1;
/// Any text field.
pub const TEXT_DEFAULT: &str = "";

/// Structured content type of episodic titles.
pub const SERIES_MARKER: &str = "TVSeries";
