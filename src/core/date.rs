// src/core/date.rs
// The pages carry calendar dates only ("March 16, 1999"). Timestamps are pinned
// to local noon so a timezone shift never moves them onto a neighbouring day.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use super::sanitize::collapse_whitespace;

const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y", // March 16, 1999
    "%b. %d, %Y",
    "%d %B %Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
];

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = collapse_whitespace(text);
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&text, fmt).ok())
}

/// Parse a display date and anchor it at 12:00 local time.
/// `None` when the text is not a date; never an error.
pub fn noon_timestamp(text: &str) -> Option<DateTime<Local>> {
    let noon = parse_date(text)?.and_hms_opt(12, 0, 0)?;
    Local.from_local_datetime(&noon).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn long_form_date_lands_on_noon() {
        let ts = noon_timestamp("January 1, 1980").unwrap();
        assert_eq!(ts.date_naive(), NaiveDate::from_ymd_opt(1980, 1, 1).unwrap());
        assert_eq!(ts.hour(), 12);
        assert_eq!(ts.minute(), 0);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let d = parse_date("\n March 16, 1999\n").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(1999, 3, 16).unwrap());
    }

    #[test]
    fn garbage_is_unset() {
        assert!(noon_timestamp("not a date").is_none());
        assert!(noon_timestamp("").is_none());
        assert!(noon_timestamp("May 1982").is_none());
    }
}
