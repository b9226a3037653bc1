//! Audit timestamps

use chrono::{DateTime, SubsecRound, Utc};

/// Current time in UTC, truncated to microseconds.
///
/// Some drivers drop zone information and MySQL `DATETIME(6)` keeps six
/// fractional digits, so stamped values must already be in that form to
/// compare equal after a round trip.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
