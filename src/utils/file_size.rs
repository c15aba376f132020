pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Base-1024 size with up to two decimals, e.g. `1.5 KB`, `5 MB`.
    pub fn format_size(size: u64) -> String {
        const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

        if size == 0 {
            return "0 Bytes".to_string();
        }

        let mut value = size as f64;
        let mut unit_index = 0;

        while value >= 1024.0 && unit_index < UNITS.len() - 1 {
            value /= 1024.0;
            unit_index += 1;
        }

        // f64's Display drops trailing zeros, so 1.50 prints as 1.5 and 5.00 as 5.
        let rounded = (value * 100.0).round() / 100.0;
        format!("{} {}", rounded, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::FileSizeUtils;

    #[test]
    fn zero_is_bytes() {
        assert_eq!(FileSizeUtils::format_size(0), "0 Bytes");
    }

    #[test]
    fn whole_units() {
        assert_eq!(FileSizeUtils::format_size(1), "1 Bytes");
        assert_eq!(FileSizeUtils::format_size(1024), "1 KB");
        assert_eq!(FileSizeUtils::format_size(1_048_576), "1 MB");
        assert_eq!(FileSizeUtils::format_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(FileSizeUtils::format_size(1024 * 1024 * 1024), "1 GB");
    }

    #[test]
    fn fractional_units_round_to_two_decimals() {
        assert_eq!(FileSizeUtils::format_size(1536), "1.5 KB");
        assert_eq!(FileSizeUtils::format_size(1023), "1023 Bytes");
        assert_eq!(FileSizeUtils::format_size(1363), "1.33 KB");
    }

    #[test]
    fn terabytes_stay_in_gigabytes() {
        assert_eq!(
            FileSizeUtils::format_size(2 * 1024 * 1024 * 1024 * 1024),
            "2048 GB"
        );
    }
}
