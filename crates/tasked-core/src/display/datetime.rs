//! Local-time rendering of stored timestamps.

use std::fmt;

use jiff::{Timestamp, tz::TimeZone};

/// Renders a [`Timestamp`] in the system time zone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
///
/// Stored timestamps are UTC; this is only used at the edges where a human
/// reads them (the plan list).
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zoned = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", zoned.strftime("%Y-%m-%d %H:%M:%S %Z"))
    }
}
