//! Birth date parsing and whole-year age computation.

use chrono::{Datelike, NaiveDate};

/// Wire format of birth dates (HTML `<input type="date">`).
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` birth date. Returns `None` for anything else.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), BIRTH_DATE_FORMAT).ok()
}

/// Elapsed whole years between `birth` and `today`.
///
/// The year difference is decremented when today's month/day still comes
/// before the birth month/day. A birth date in the future yields a negative
/// age. Someone born on 29 February turns a year older on 1 March in
/// non-leap years.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years - 1
    } else {
        years
    }
}
