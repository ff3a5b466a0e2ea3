//! Timestamp formatting — a single-character token mini-language.
//!
//! Format strings are processed left to right: recognized tokens expand to a
//! date/time component of the timestamp, a backslash escapes the following
//! character, and anything else is copied through verbatim. The vocabulary
//! follows the classic PHP `date()` tokens:
//!
//! - Day: `d j` (padded/plain day), `D l` (short/long name), `S` (ordinal
//!   suffix), `N` (ISO weekday, 1 = Monday), `w` (weekday, 0 = Sunday),
//!   `z` (day of year)
//! - Week: `W` (ISO week number)
//! - Month: `F M` (long/short name), `m n` (padded/plain number), `t` (days
//!   in the month)
//! - Year: `L` (leap year), `o` (ISO week-numbering year), `Y y` (4/2 digit)
//! - Time: `a A` (am/pm), `B` (swatch internet time), `g G h H` (12/24 hour,
//!   plain/padded), `i s` (padded minute/second), `u` (milliseconds)
//! - Zone: `O P` (offset `+HHMM` / `+HH:MM`), `T` (zone label), `Z` (offset
//!   seconds)
//! - Composite: `c` (ISO 8601), `r` (RFC 2822), `U` (epoch seconds)

use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone, Timelike, Utc};

// ---------------------------------------------------------------------------
// Name tables
// ---------------------------------------------------------------------------

const SHORT_DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const LONG_DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const LONG_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Sub-format used by the `c` token (ISO 8601).
const ISO_8601_FORMAT: &str = "Y-m-d\\TH:i:sP";

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// An instant in time with a fixed local offset.
///
/// Formatting borrows the timestamp immutably, so no token can leave an
/// observable change behind on the instance handed in by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    inner: DateTime<FixedOffset>,
}

impl Timestamp {
    /// Build a timestamp from milliseconds since the epoch and an offset in
    /// seconds east of UTC. Returns `None` for an out-of-range offset or
    /// instant.
    pub fn from_millis(millis: i64, offset_seconds: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(offset_seconds)?;
        let utc = DateTime::<Utc>::from_timestamp_millis(millis)?;
        Some(Self {
            inner: utc.with_timezone(&offset),
        })
    }

    /// Build a timestamp from milliseconds since the epoch in the system's
    /// local zone.
    pub fn from_millis_local(millis: i64) -> Option<Self> {
        let local = Local.timestamp_millis_opt(millis).single()?;
        Some(Self {
            inner: local.fixed_offset(),
        })
    }

    /// The current instant in the system's local zone.
    pub fn now() -> Self {
        Self {
            inner: Local::now().fixed_offset(),
        }
    }

    /// The underlying chrono value.
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.inner
    }

    /// Format the timestamp according to the token format string.
    ///
    /// A character preceded by a backslash is emitted literally, a
    /// recognized token expands, any other character passes through, and the
    /// backslash itself is never emitted. The escape test looks at the
    /// previous raw character only, so `\\\\Y` renders as `\Y`.
    pub fn format(&self, format: &str) -> String {
        let chars: Vec<char> = format.chars().collect();
        let mut out = String::with_capacity(format.len());
        for (i, &current) in chars.iter().enumerate() {
            if i > 0 && chars[i - 1] == '\\' {
                out.push(current);
            } else if let Some(value) = self.token_value(current) {
                out.push_str(&value);
            } else if current != '\\' {
                out.push(current);
            }
        }
        out
    }

    /// Expand a single format token, or `None` if the character is not one.
    fn token_value(&self, token: char) -> Option<String> {
        let dt = self.inner;
        let value = match token {
            // Day
            'd' => format!("{:02}", dt.day()),
            'D' => SHORT_DAYS[dt.weekday().num_days_from_sunday() as usize].to_string(),
            'j' => dt.day().to_string(),
            'l' => LONG_DAYS[dt.weekday().num_days_from_sunday() as usize].to_string(),
            'N' => dt.weekday().number_from_monday().to_string(),
            'S' => ordinal_suffix(dt.day()).to_string(),
            'w' => dt.weekday().num_days_from_sunday().to_string(),
            'z' => self.day_of_year().to_string(),
            // Week
            'W' => dt.iso_week().week().to_string(),
            // Month
            'F' => LONG_MONTHS[dt.month0() as usize].to_string(),
            'm' => format!("{:02}", dt.month()),
            'M' => SHORT_MONTHS[dt.month0() as usize].to_string(),
            'n' => dt.month().to_string(),
            't' => days_in_month(dt.year(), dt.month()).to_string(),
            // Year
            'L' => is_leap_year(dt.year()).to_string(),
            'o' => dt.iso_week().year().to_string(),
            'Y' => dt.year().to_string(),
            'y' => dt.year().to_string().chars().skip(2).collect(),
            // Time
            'a' => (if dt.hour() < 12 { "am" } else { "pm" }).to_string(),
            'A' => (if dt.hour() < 12 { "AM" } else { "PM" }).to_string(),
            'B' => self.swatch_beats().to_string(),
            'g' => hour12(dt.hour()).to_string(),
            'G' => dt.hour().to_string(),
            'h' => format!("{:02}", hour12(dt.hour())),
            'H' => format!("{:02}", dt.hour()),
            'i' => format!("{:02}", dt.minute()),
            's' => format!("{:02}", dt.second()),
            'u' => format!("{:03}", dt.timestamp_subsec_millis()),
            // Timezone
            'O' => self.offset_string(false),
            'P' => self.offset_string(true),
            'T' => self.zone_label(),
            'Z' => dt.offset().local_minus_utc().to_string(),
            // Full date/time
            'c' => self.format(ISO_8601_FORMAT),
            'r' => dt.to_rfc2822(),
            'U' => dt.timestamp().to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Day of year: elapsed local milliseconds since January 1st midnight,
    /// divided by a day and rounded up. Midnight on January 1st is day 0.
    fn day_of_year(&self) -> i64 {
        let dt = self.inner;
        let millis_of_day =
            i64::from(dt.num_seconds_from_midnight()) * 1000 + i64::from(dt.timestamp_subsec_millis());
        let elapsed = i64::from(dt.ordinal0()) * 86_400_000 + millis_of_day;
        (elapsed + 86_399_999) / 86_400_000
    }

    /// Swatch internet time: the UTC+1 day divided into 1000 beats.
    fn swatch_beats(&self) -> u32 {
        let utc = self.inner.with_timezone(&Utc);
        let seconds = ((utc.hour() + 1) % 24) * 3600 + utc.minute() * 60 + utc.second();
        seconds * 1000 / 86_400
    }

    /// UTC offset as `+HHMM`, or `+HH:MM` with `colon`.
    fn offset_string(&self, colon: bool) -> String {
        let seconds = self.inner.offset().local_minus_utc();
        let sign = if seconds < 0 { '-' } else { '+' };
        let abs = seconds.unsigned_abs();
        let hours = abs / 3600;
        let minutes = (abs % 3600) / 60;
        if colon {
            format!("{sign}{hours:02}:{minutes:02}")
        } else {
            format!("{sign}{hours:02}{minutes:02}")
        }
    }

    /// Zone label for the `T` token. A fixed offset carries no zone name, so
    /// this is `UTC` at zero offset and a `GMT{offset}` label otherwise.
    fn zone_label(&self) -> String {
        if self.inner.offset().local_minus_utc() == 0 {
            "UTC".to_string()
        } else {
            format!("GMT{}", self.offset_string(false))
        }
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(inner: DateTime<FixedOffset>) -> Self {
        Self { inner }
    }
}

// ---------------------------------------------------------------------------
// Component helpers
// ---------------------------------------------------------------------------

/// English ordinal suffix for a day of month (1st, 2nd, 3rd, 11th…).
fn ordinal_suffix(day: u32) -> &'static str {
    match day % 10 {
        1 if day != 11 => "st",
        2 if day != 12 => "nd",
        3 if day != 13 => "rd",
        _ => "th",
    }
}

fn hour12(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
