/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{Local, NaiveDate, NaiveDateTime};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// "2024-03-15" -> "15 Mar 2024"
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// "2024-03-15" -> "Fri, 15 Mar"
pub fn format_day(date: &NaiveDate) -> String {
    date.format("%a, %d %b").to_string()
}

/// Missing timestamps render as a dash
pub fn format_datetime(datetime: Option<&NaiveDateTime>) -> String {
    datetime
        .map(|dt| dt.format("%d %b %Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Value of an `<input type="date">`
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn to_date_input(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(format_date(&d), "15 Mar 2024");
        assert_eq!(format_day(&d), "Fri, 15 Mar");
    }

    #[test]
    fn test_format_datetime() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 2, 26)
            .unwrap();
        assert_eq!(format_datetime(Some(&dt)), "15 Mar 2024 14:02");
        assert_eq!(format_datetime(None), "-");
    }

    #[test]
    fn test_date_input_round_trip() {
        let d = parse_date_input("2024-12-31").unwrap();
        assert_eq!(to_date_input(&d), "2024-12-31");
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("31.12.2024"), None);
    }
}
