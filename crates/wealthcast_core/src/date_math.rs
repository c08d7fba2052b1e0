//! Calendar arithmetic for the monthly projection grid.
//!
//! The engine works on whole calendar months: month `i` of a projection is the
//! calendar month `now + i`. Month offsets are computed on a flat
//! `year * 12 + month` index, and day offsets (needed for weekly events) use
//! Rata Die day-numbering, so neither path goes through jiff's `Span`
//! normalisation.

use jiff::civil::Date;

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days in the given month without creating a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Flat month index: `year * 12 + (month - 1)`.
#[inline]
fn month_index(d: Date) -> i32 {
    d.year() as i32 * 12 + (d.month() as i32 - 1)
}

/// Whole calendar months from `from` to `to` (day of month ignored).
///
/// Negative when `to` lies in an earlier month than `from`.
#[inline]
pub fn months_between(from: Date, to: Date) -> i32 {
    month_index(to) - month_index(from)
}

/// Shift a date by `n` calendar months, clamping the day to the target
/// month's length (Jan 31 + 1 month = Feb 28/29).
///
/// Results outside jiff's supported range saturate at `Date::MIN`/`Date::MAX`.
pub fn add_months(d: Date, n: i32) -> Date {
    let total = month_index(d) + n;
    let year = total.div_euclid(12);
    if year > Date::MAX.year() as i32 {
        return Date::MAX;
    }
    if year < Date::MIN.year() as i32 {
        return Date::MIN;
    }
    let year = year as i16;
    let month = (total.rem_euclid(12) + 1) as i8;
    let day = d.day().min(days_in_month(year, month));
    jiff::civil::date(year, month, day)
}

/// First day of the month containing `d`.
#[inline]
pub fn month_start(d: Date) -> Date {
    jiff::civil::date(d.year(), d.month(), 1)
}

/// Last day of the month containing `d`.
#[inline]
pub fn month_end(d: Date) -> Date {
    jiff::civil::date(d.year(), d.month(), days_in_month(d.year(), d.month()))
}

/// Short display label for a projection month, e.g. `Oct 2026`.
pub fn month_label(d: Date) -> String {
    d.strftime("%b %Y").to_string()
}

/// Convert a civil date to a Rata Die day number (days since 0001-01-01).
#[inline]
fn rata_die(d: Date) -> i32 {
    let y = d.year() as i32;
    let m = d.month() as i32;
    let day = d.day() as i32;

    // March = month 1 so February is last
    let a = (14 - m) / 12;
    let y2 = y - a;
    let m2 = m + 12 * a - 3;

    day + (153 * m2 + 2) / 5 + 365 * y2 + y2 / 4 - y2 / 100 + y2 / 400 - 306
}

/// Number of days between two dates (`d2 - d1`), positive when `d2 > d1`.
#[inline]
pub fn fast_days_between(d1: Date, d2: Date) -> i32 {
    rata_die(d2) - rata_die(d1)
}

/// Add `n` days to a date without going through `jiff::Span`.
#[inline]
pub fn add_days(d: Date, n: i32) -> Date {
    rd_to_date(rata_die(d) + n)
}

/// Inverse of `rata_die()`.
#[inline]
fn rd_to_date(rd: i32) -> Date {
    let z = rd + 306;
    let h = 100 * z - 25;
    let a = h / 3_652_425;
    let b = a - a / 4;
    let y = (100 * b + h) / 36_525;
    let c = b + z - 365 * y - y / 4;
    let m = (5 * c + 456) / 153;
    let day = c - (153 * m - 457) / 5;

    let (year, month) = if m > 12 { (y + 1, m - 12) } else { (y, m) };

    jiff::civil::date(year as i16, month as i8, day as i8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_months_between_same_month() {
        assert_eq!(months_between(date(2026, 10, 1), date(2026, 10, 31)), 0);
    }

    #[test]
    fn test_months_between_ignores_day() {
        assert_eq!(months_between(date(2026, 10, 31), date(2026, 11, 1)), 1);
        assert_eq!(months_between(date(2026, 10, 1), date(2027, 8, 31)), 10);
    }

    #[test]
    fn test_months_between_negative() {
        assert_eq!(months_between(date(2026, 3, 15), date(2025, 12, 1)), -3);
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(date(2026, 1, 31), 1), date(2026, 2, 28));
        assert_eq!(add_months(date(2027, 12, 31), 2), date(2028, 2, 29));
    }

    #[test]
    fn test_add_months_negative_crosses_year() {
        assert_eq!(add_months(date(2026, 2, 15), -3), date(2025, 11, 15));
    }

    #[test]
    fn test_add_months_saturates() {
        assert_eq!(add_months(date(9999, 6, 1), 12), Date::MAX);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_start(date(2024, 2, 17)), date(2024, 2, 1));
        assert_eq!(month_end(date(2024, 2, 17)), date(2024, 2, 29));
        assert_eq!(month_end(date(2025, 2, 17)), date(2025, 2, 28));
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(date(2026, 10, 19)), "Oct 2026");
    }

    #[test]
    fn test_fast_days_between_matches_jiff() {
        let pairs = [
            (date(2020, 1, 1), date(2030, 6, 15)),
            (date(2024, 2, 29), date(2025, 2, 28)),
            (date(2025, 12, 31), date(2026, 1, 1)),
        ];
        for (d1, d2) in pairs {
            let jiff_days = (d2 - d1).get_days();
            assert_eq!(fast_days_between(d1, d2), jiff_days, "mismatch for {d1} → {d2}");
        }
    }

    #[test]
    fn test_add_days_across_month() {
        assert_eq!(add_days(date(2025, 1, 31), 1), date(2025, 2, 1));
        assert_eq!(add_days(date(2024, 2, 28), 7), date(2024, 3, 6));
        assert_eq!(add_days(date(2025, 1, 1), -1), date(2024, 12, 31));
    }
}
