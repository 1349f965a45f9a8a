//! 时间显示模块
//!
//! Server timestamps arrive as RFC 3339 strings and are rendered in the
//! `en-US` styles used across the dashboards.

use chrono::{DateTime, Utc};

/// `3/5/2024`
pub fn short_date(ts: &DateTime<Utc>) -> String {
    ts.format("%-m/%-d/%Y").to_string()
}

/// `March 5, 2024`
pub fn long_date(ts: &DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y").to_string()
}

/// Renders an optional timestamp, with a dash when the server omitted it.
pub fn short_date_or_dash(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(short_date).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn formats_without_zero_padding() {
        let ts = parse("2024-03-05T10:00:00.000Z");
        assert_eq!(short_date(&ts), "3/5/2024");
        assert_eq!(long_date(&ts), "March 5, 2024");
    }

    #[test]
    fn missing_timestamps_render_a_dash() {
        assert_eq!(short_date_or_dash(None), "-");
        let ts = parse("2023-12-31T23:59:59Z");
        assert_eq!(short_date_or_dash(Some(&ts)), "12/31/2023");
    }
}
