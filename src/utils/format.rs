use chrono::{DateTime, Local, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// `1234567` → `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Renders an ISO-8601 timestamp as `YYYY/MM/DD HH:MM:SS` in local time.
///
/// Timestamps without an offset are taken as local already. Anything that
/// does not parse is returned unchanged.
pub fn format_timestamp(iso: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }

    let naive = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S"));

    match naive {
        Ok(naive) => naive.format(DISPLAY_FORMAT).to_string(),
        Err(_) => {
            tracing::debug!(value = iso, "unparseable timestamp");
            iso.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(4), "4");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123_456), "123,456");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn naive_timestamp_is_zero_padded_24_hour() {
        assert_eq!(
            format_timestamp("2025-01-05T14:03:09.123456"),
            "2025/01/05 14:03:09"
        );
        assert_eq!(format_timestamp("2025-11-20T08:00:00"), "2025/11/20 08:00:00");
    }

    #[test]
    fn offset_timestamp_converts_to_local() {
        let expected = DateTime::parse_from_rfc3339("2025-01-05T14:03:09Z")
            .unwrap()
            .with_timezone(&Local)
            .format(DISPLAY_FORMAT)
            .to_string();
        assert_eq!(format_timestamp("2025-01-05T14:03:09Z"), expected);
    }

    #[test]
    fn garbage_passes_through() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
