//! Duration formatting — millisecond durations to short human strings.
//!
//! Renders the two coarsest non-zero units of a duration ("2 min 30 sec",
//! "1 day 4 hr", "3 mo 12 days"). The unit divisors are calendar
//! approximations (a 31-day month, a 52-week year) kept for compatibility
//! with the build-server displays downstream dashboards already show.

// ---------------------------------------------------------------------------
// Unit divisors
// ---------------------------------------------------------------------------

const SECOND_MILLIS: u64 = 1000;
const MINUTE_MILLIS: u64 = 60 * SECOND_MILLIS;
const HOUR_MILLIS: u64 = 60 * MINUTE_MILLIS;
const DAY_MILLIS: u64 = 24 * HOUR_MILLIS;
const WEEK_MILLIS: u64 = 7 * DAY_MILLIS;
/// A month is 31 days.
const MONTH_MILLIS: u64 = 31 * DAY_MILLIS;
/// A year is 52 weeks (364 days), not a calendar year.
const YEAR_MILLIS: u64 = 52 * WEEK_MILLIS;

/// Integer division rounded to the nearest whole unit, halves up.
///
/// Every divisor above is even, so this is exact round-to-nearest.
fn rounded(value: u64, unit: u64) -> u64 {
    (value + unit / 2) / unit
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format a millisecond duration as its two coarsest non-zero units.
///
/// Each unit is the *rounded* quotient of the remainder so far, while the
/// remainder carried to the next unit is the plain modulo. The displayed
/// value can therefore round up ("2 min 30 sec" for 90 000 ms) without
/// affecting the finer units. The first matching branch decides the shape:
/// a duration of exactly one year still reads "1 yr 0 mo".
pub fn format_duration(duration_millis: u64) -> String {
    let years = rounded(duration_millis, YEAR_MILLIS);
    let mut remaining = duration_millis % YEAR_MILLIS;
    let months = rounded(remaining, MONTH_MILLIS);
    remaining %= MONTH_MILLIS;
    let days = rounded(remaining, DAY_MILLIS);
    remaining %= DAY_MILLIS;
    let hours = rounded(remaining, HOUR_MILLIS);
    remaining %= HOUR_MILLIS;
    let minutes = rounded(remaining, MINUTE_MILLIS);
    remaining %= MINUTE_MILLIS;
    let seconds = rounded(remaining, SECOND_MILLIS);
    remaining %= SECOND_MILLIS;
    let milliseconds = remaining;

    if years > 0 {
        format!("{years} yr {months} mo")
    } else if months > 0 && days == 1 {
        format!("{months} mo {days} day")
    } else if months > 0 {
        format!("{months} mo {days} days")
    } else if days == 1 {
        format!("{days} day {hours} hr")
    } else if days > 0 {
        format!("{days} days {hours} hr")
    } else if hours > 0 {
        format!("{hours} hr {minutes} min")
    } else if minutes > 0 {
        format!("{minutes} min {seconds} sec")
    } else if seconds > 0 {
        format!("{seconds} sec")
    } else {
        format!("{milliseconds} ms")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
