use chrono::{NaiveTime, Timelike};

/// Parse `H:mm`, `HH:mm` or `HH:mm:ss` into a time of day.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    let mut parts = raw.split(':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute_part = parts.next()?;
    if minute_part.len() != 2 {
        return None;
    }
    let minute: u32 = minute_part.parse().ok()?;
    let second: u32 = match parts.next() {
        Some(s) if s.len() == 2 => s.parse().ok()?,
        Some(s) => {
            // fractional seconds, e.g. 09:00:00.000
            let whole = s.split('.').next()?;
            if whole.len() != 2 {
                return None;
            }
            whole.parse().ok()?
        }
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Canonical `HH:mm` form; the seconds component is dropped.
pub fn normalize_time(raw: &str) -> Option<String> {
    parse_time(raw).map(|t| format_hm(&t))
}

pub fn format_hm(t: &NaiveTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// `raw + hours`, or `None` when the result would pass midnight.
pub fn add_hours(raw: &str, hours: u32) -> Option<String> {
    let t = parse_time(raw)?;
    let total = t.hour() + hours;
    if total > 23 {
        return None;
    }
    NaiveTime::from_hms_opt(total, t.minute(), 0).map(|t| format_hm(&t))
}

/// Hour component of a time string, for hourly grids.
pub fn hour_of(raw: &str) -> Option<u32> {
    parse_time(raw).map(|t| t.hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_time_variants() {
        assert_eq!(normalize_time("09:00:00").as_deref(), Some("09:00"));
        assert_eq!(normalize_time("09:00").as_deref(), Some("09:00"));
        assert_eq!(normalize_time("9:00").as_deref(), Some("09:00"));
        assert_eq!(normalize_time("21:30:00.000").as_deref(), Some("21:30"));
        assert_eq!(normalize_time("25:00"), None);
        assert_eq!(normalize_time("9"), None);
        assert_eq!(normalize_time("9:0"), None);
        assert_eq!(normalize_time(""), None);
    }

    #[test]
    fn test_add_hours() {
        assert_eq!(add_hours("06:00", 1).as_deref(), Some("07:00"));
        assert_eq!(add_hours("22:30:00", 1).as_deref(), Some("23:30"));
        assert_eq!(add_hours("23:00", 1), None);
    }
}
