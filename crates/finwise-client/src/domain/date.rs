use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parses `YYYY-MM-DD` with a real calendar date. Any other shape is rejected.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !looks_like_iso_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{format_iso_date, format_timestamp, parse_iso_date, parse_timestamp};

    #[test]
    fn parse_iso_date_requires_real_calendar_dates() {
        assert!(parse_iso_date("2026-02-28").is_some());
        assert!(parse_iso_date("2026-02-31").is_none());
        assert!(parse_iso_date("2026-2-28").is_none());
        assert!(parse_iso_date("2026/02/28").is_none());
    }

    #[test]
    fn iso_date_formatting_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2023, 4, 1);
        assert!(date.is_some());
        if let Some(value) = date {
            assert_eq!(format_iso_date(&value), "2023-04-01");
        }
    }

    #[test]
    fn timestamps_survive_a_format_parse_cycle() {
        let parsed = parse_timestamp("2023-04-20T09:00:00Z");
        assert!(parsed.is_some());
        if let Some(value) = parsed {
            assert_eq!(format_timestamp(&value), "2023-04-20T09:00:00Z");
        }
    }
}
