use chrono::{DateTime, NaiveDateTime, Timelike};

/// Layout of `obsTime` in the CWB datastore when no offset is attached.
const CWB_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render an observation timestamp the way zh-TW clocks read, e.g. `下午2:00`.
///
/// The wall-clock time of the string is used as-is, no zone conversion.
/// Returns `None` for anything that is neither RFC 3339 nor the CWB layout.
pub fn format_time(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let time = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, CWB_DATETIME_FORMAT))
        .ok()?;

    let (pm, hour) = time.hour12();
    let period = if pm { "下午" } else { "上午" };

    Some(format!("{period}{hour}:{:02}", time.minute()))
}

/// Round a string-encoded decimal for display, halves toward +∞
/// (`-2.5` -> `-2`, `2.5` -> `3`). `None` if the text is not a finite number.
pub fn round_decimal(raw: &str) -> Option<i64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then(|| (value + 0.5).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_halves_up() {
        assert_eq!(round_decimal("23.70"), Some(24));
        assert_eq!(round_decimal("2.5"), Some(3));
        assert_eq!(round_decimal("-2.5"), Some(-2));
        assert_eq!(round_decimal("-2.51"), Some(-3));
        assert_eq!(round_decimal(" -0.4 "), Some(0));
    }

    #[test]
    fn non_numeric_text_does_not_round() {
        assert_eq!(round_decimal(""), None);
        assert_eq!(round_decimal("n/a"), None);
        assert_eq!(round_decimal("NaN"), None);
        assert_eq!(round_decimal("inf"), None);
    }

    #[test]
    fn afternoon_rfc3339() {
        assert_eq!(
            format_time("2022-12-12T14:00:00+08:00").as_deref(),
            Some("下午2:00")
        );
    }

    #[test]
    fn cwb_layout_morning() {
        assert_eq!(
            format_time("2022-12-12 09:05:00").as_deref(),
            Some("上午9:05")
        );
    }

    #[test]
    fn midnight_and_noon() {
        assert_eq!(
            format_time("2022-12-12T00:30:00+08:00").as_deref(),
            Some("上午12:30")
        );
        assert_eq!(
            format_time("2022-12-12T12:00:00+08:00").as_deref(),
            Some("下午12:00")
        );
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(format_time(""), None);
        assert_eq!(format_time("yesterday"), None);
    }
}
