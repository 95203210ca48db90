//! The fixed set of years a report covers.

/// Recognized year labels, in report order.
pub const YEAR_DOMAIN: [&str; 3] = ["2022", "2023", "2024"];

/// Number of years in [`YEAR_DOMAIN`].
pub const YEAR_COUNT: usize = YEAR_DOMAIN.len();

/// Returns the position of `value` in [`YEAR_DOMAIN`].
///
/// The value is matched after trimming; anything else (including an empty
/// string) is outside the domain.
pub fn year_index(value: &str) -> Option<usize> {
    let trimmed = value.trim();
    YEAR_DOMAIN.iter().position(|year| *year == trimmed)
}
