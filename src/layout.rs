use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

use crate::error::{IdGenError, Result};

pub const SECONDS_IN_DAY: u64 = 86_400;
pub const MILLIS_IN_DAY: u64 = SECONDS_IN_DAY * 1_000;
pub const NANOS_IN_DAY: u64 = SECONDS_IN_DAY * 1_000_000_000;

pub const BIT_LEN_TIME: u32 = 26;
pub const BIT_LEN_MACHINE_ID: u32 = 16;

/// Number of leading decimal digits holding the `YYMMDD` date.
pub const DATE_PREFIX_LEN: usize = 6;

/// Bit layout of the `org_id` part of an identifier.
/// Structure:
/// - high bits: Machine ID (16 bits)
/// - low `time_bits` bits: milliseconds since 00:00:00 UTC
///
/// The final identifier is the decimal `YYMMDD` date followed by the decimal
/// `org_id`, e.g. `220918` + `19345162233`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    time_bits: u32,
}

impl Layout {
    /// 26 time bits. Matches every identifier minted so far, but the last
    /// ~5.3 hours of a UTC day (>= 67_108_864 ms) spill into bit 0 of the
    /// machine field.
    pub const LEGACY: Layout = Layout {
        time_bits: BIT_LEN_TIME,
    };

    /// 27 time bits: every millisecond of the day fits.
    pub const WIDE: Layout = Layout {
        time_bits: BIT_LEN_TIME + 1,
    };

    pub const fn time_bits(&self) -> u32 {
        self.time_bits
    }

    pub const fn time_mask(&self) -> u64 {
        (1 << self.time_bits) - 1
    }

    /// Whether `elapsed_ms` fits the time field without touching the machine bits.
    pub const fn holds(&self, elapsed_ms: u64) -> bool {
        elapsed_ms <= self.time_mask()
    }

    pub fn org_id(&self, machine_id: u16, elapsed_ms: u64) -> u64 {
        (u64::from(machine_id) << self.time_bits) | elapsed_ms
    }

    /// Returns `(machine_id, elapsed_ms)`.
    pub fn split(&self, org_id: u64) -> (u64, u64) {
        (org_id >> self.time_bits, org_id & self.time_mask())
    }

    /// Strip the date prefix by digit offset and split the remainder.
    ///
    /// Never fails: an id with fewer than 7 digits, or a remainder that does
    /// not parse, is treated as `org_id = 0`.
    pub fn extract(&self, id: u64) -> (u64, u64) {
        self.split(org_id_digits(id).unwrap_or(0))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::LEGACY
    }
}

/// `org_id` recovered from the decimal rendering of `id`, if any digits remain
/// after the date prefix.
pub(crate) fn org_id_digits(id: u64) -> Option<u64> {
    id.to_string()
        .get(DATE_PREFIX_LEN..)
        .and_then(|rest| rest.parse::<u64>().ok())
}

/// `YYMMDD` as a number; years 2000-2009 lose their leading zero.
pub fn date_prefix(date: NaiveDate) -> u64 {
    (date.year().rem_euclid(100) as u64) * 10_000 + u64::from(date.month()) * 100 + u64::from(date.day())
}

/// Milliseconds since 00:00:00 UTC of the day `now` falls on.
pub fn elapsed_millis<Tz: TimeZone>(now: &DateTime<Tz>) -> u64 {
    now.timestamp_millis().rem_euclid(MILLIS_IN_DAY as i64) as u64
}

fn decimal_digits(value: u64) -> u32 {
    value.checked_ilog10().map_or(1, |d| d + 1)
}

/// Concatenate `prefix` and `org_id` as decimal digits.
///
/// Computed as `prefix * 10^digits(org_id) + org_id`, which yields the same
/// number as formatting both and parsing the result.
pub fn compose(prefix: u64, org_id: u64) -> Result<i64> {
    10u64
        .checked_pow(decimal_digits(org_id))
        .and_then(|scale| prefix.checked_mul(scale))
        .and_then(|value| value.checked_add(org_id))
        .and_then(|value| i64::try_from(value).ok())
        .ok_or(IdGenError::EncodingOverflow { prefix, org_id })
}
