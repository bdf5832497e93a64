//! Month-granular date helpers for historical price series.
//!
//! Price files encode months as fractional years with the month number in the
//! two decimals (`1999.08` is August 1999, `1999.1` is October 1999). Dates are
//! normalised to the first of the month. Day differences use Rata Die numbering
//! so nearest-date searches stay O(1) per comparison without building `jiff::Span`s.

use jiff::civil::Date;

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Fast inline days-in-month calculation without creating a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Convert a civil date to a Rata Die day number (days since 0001-01-01).
#[inline]
fn rata_die(d: Date) -> i32 {
    let y = d.year() as i32;
    let m = d.month() as i32;
    let day = d.day() as i32;

    // Shift March = month 1 so Feb (end of "year") is month 12
    let a = (14 - m) / 12;
    let y2 = y - a;
    let m2 = m + 12 * a - 3;

    day + (153 * m2 + 2) / 5 + 365 * y2 + y2 / 4 - y2 / 100 + y2 / 400 - 306
}

/// Number of days between two dates (d2 - d1), positive when `d2 > d1`.
#[inline]
pub fn fast_days_between(d1: Date, d2: Date) -> i32 {
    rata_die(d2) - rata_die(d1)
}

/// Parse a fractional-year month code such as `1999.08` into the first day of that month.
///
/// Returns `None` for non-finite input or a month outside 1..=12.
#[must_use]
pub fn from_month_code(code: f64) -> Option<Date> {
    if !code.is_finite() {
        return None;
    }
    let hundredths = (code * 100.0).round() as i64;
    let year = hundredths.div_euclid(100);
    let month = hundredths.rem_euclid(100);
    if !(1..=12).contains(&month) {
        return None;
    }
    let year = i16::try_from(year).ok()?;
    Date::new(year, month as i8, 1).ok()
}

/// Add whole calendar years, clamping Feb 29 to Feb 28 in non-leap targets.
#[must_use]
pub fn add_years(d: Date, years: i16) -> Option<Date> {
    let year = d.year().checked_add(years)?;
    let day = d.day().min(days_in_month(year, d.month()));
    Date::new(year, d.month(), day).ok()
}
