//! Recover the fields of a previously minted identifier.
//!
//! Decoding strips the first six decimal digits as the date and splits the
//! rest as `org_id`. No generator instance or lock is involved.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{IdGenError, Result};
use crate::layout::{org_id_digits, Layout, DATE_PREFIX_LEN, MILLIS_IN_DAY};

/// Returns `(machine_id, elapsed_ms)` of an id minted with [`Layout::LEGACY`].
///
/// Never fails. Ids shorter than seven digits decode to `(0, 0)`; the date
/// prefix is not validated.
pub fn extract_id(id: u64) -> (u64, u64) {
    Layout::LEGACY.extract(id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedId {
    /// Local date the id was minted on. Two-digit years map to 2000-2099.
    pub date: NaiveDate,
    pub machine_id: u16,
    pub elapsed_ms: u64,
    /// UTC time of day matching `elapsed_ms`.
    pub time_of_day: NaiveTime,
}

/// Strict decoding: the prefix must be a real `YYMMDD` date and the elapsed
/// time must fall inside one day.
pub fn decode(id: u64, layout: Layout) -> Result<DecodedId> {
    let malformed = || IdGenError::MalformedId(id);

    let digits = id.to_string();
    let prefix: u32 = digits
        .get(..DATE_PREFIX_LEN)
        .and_then(|p| p.parse().ok())
        .ok_or_else(malformed)?;
    let date = NaiveDate::from_ymd_opt(
        2000 + (prefix / 10_000) as i32,
        prefix / 100 % 100,
        prefix % 100,
    )
    .ok_or_else(malformed)?;

    let org_id = org_id_digits(id).ok_or_else(malformed)?;
    let (machine_id, elapsed_ms) = layout.split(org_id);
    let machine_id = u16::try_from(machine_id).map_err(|_| malformed())?;

    if elapsed_ms >= MILLIS_IN_DAY {
        return Err(malformed());
    }
    let time_of_day = NaiveTime::from_num_seconds_from_midnight_opt(
        (elapsed_ms / 1_000) as u32,
        (elapsed_ms % 1_000) as u32 * 1_000_000,
    )
    .ok_or_else(malformed)?;

    Ok(DecodedId {
        date,
        machine_id,
        elapsed_ms,
        time_of_day,
    })
}
