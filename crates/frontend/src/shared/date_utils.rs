//! Display formatting for the ISO-8601 strings the backend emits.
//! Values that do not parse are shown as-is rather than hidden.

/// Split "YYYY-MM-DD" into its three components.
fn ymd(date_part: &str) -> Option<(&str, &str, &str)> {
    let mut parts = date_part.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day)) => Some((year, month, day)),
        _ => None,
    }
}

/// "2024-03-15T14:02:26.123Z" -> "15.03.2024 14:02:26"
pub fn format_datetime(raw: &str) -> String {
    let Some((date_part, time_part)) = raw.split_once('T') else {
        return raw.to_string();
    };
    match ymd(date_part) {
        Some((year, month, day)) => {
            let time = time_part
                .split('.')
                .next()
                .unwrap_or(time_part)
                .trim_end_matches('Z');
            format!("{}.{}.{} {}", day, month, year, time)
        }
        None => raw.to_string(),
    }
}

/// "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(raw: &str) -> String {
    let date_part = raw.split('T').next().unwrap_or(raw);
    match ymd(date_part) {
        Some((year, month, day)) => format!("{}.{}.{}", day, month, year),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "15.03.2024 14:02:26"
        );
        assert_eq!(
            format_datetime("2024-12-31T23:59:59Z"),
            "31.12.2024 23:59:59"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
    }

    #[test]
    fn test_unparseable_value_passes_through() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date("2024"), "2024");
    }
}
