//! Timestamp parsing and ordering for comparison conditions.
//!
//! Accepts ISO 8601 shaped strings. A trailing `Z` is treated as `+00:00`;
//! timestamps without an offset are taken to be UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use udmhunt_parser::CompareOp;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp string into an offset-aware instant.
///
/// Returns `None` for anything that is not ISO 8601 shaped.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let normalized;
    let s = match s.strip_suffix('Z') {
        Some(head) => {
            normalized = format!("{head}+00:00");
            normalized.as_str()
        }
        None => s,
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive).fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).fixed_offset());
    }

    None
}

/// Apply `op` to two already-parsed instants: `lhs <op> rhs`.
pub fn compare_instants(
    lhs: &DateTime<FixedOffset>,
    rhs: &DateTime<FixedOffset>,
    op: CompareOp,
) -> bool {
    match op {
        CompareOp::Gt => lhs > rhs,
        CompareOp::Gte => lhs >= rhs,
        CompareOp::Lt => lhs < rhs,
        CompareOp::Lte => lhs <= rhs,
    }
}

/// Parse both sides and evaluate `lhs <op> rhs`.
///
/// An unparseable side makes the comparison false, never an error.
pub fn compare_timestamps(lhs: &str, rhs: &str, op: CompareOp) -> bool {
    match (parse_timestamp(lhs), parse_timestamp(rhs)) {
        (Some(a), Some(b)) => compare_instants(&a, &b, op),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zulu() {
        let dt = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(dt.timestamp(), 1704067200);
        assert_eq!(dt.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_explicit_offset() {
        let dt = parse_timestamp("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(dt.timestamp(), 1704067200);
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let dt = parse_timestamp("2024-07-10T12:30:00.123456Z").unwrap();
        assert_eq!(dt.timestamp_subsec_micros(), 123456);
    }

    #[test]
    fn test_parse_space_separator_with_offset() {
        let dt = parse_timestamp("2024-01-01 00:00:00+00:00").unwrap();
        assert_eq!(dt.timestamp(), 1704067200);
    }

    #[test]
    fn test_parse_naive_assumes_utc() {
        assert_eq!(
            parse_timestamp("2024-01-01T00:00:00").unwrap().timestamp(),
            1704067200
        );
        assert_eq!(
            parse_timestamp("2024-01-01 00:00").unwrap().timestamp(),
            1704067200
        );
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(parse_timestamp("2024-01-01").unwrap().timestamp(), 1704067200);
    }

    #[test]
    fn test_parse_garbage() {
        for s in ["", "Z", "yesterday", "2024-13-01T00:00:00Z", "1704067200", "2024/01/01"] {
            assert!(parse_timestamp(s).is_none(), "{s:?} should not parse");
        }
    }

    #[test]
    fn test_ordering() {
        let a = "2024-01-01T00:00:00Z";
        let b = "2024-01-02T00:00:00Z";
        assert!(compare_timestamps(a, b, CompareOp::Lt));
        assert!(!compare_timestamps(a, b, CompareOp::Gt));
        assert!(compare_timestamps(a, b, CompareOp::Lte));
        assert!(!compare_timestamps(a, b, CompareOp::Gte));
        assert!(compare_timestamps(a, a, CompareOp::Gte));
        assert!(compare_timestamps(a, a, CompareOp::Lte));
        assert!(!compare_timestamps(a, a, CompareOp::Gt));
    }

    #[test]
    fn test_ordering_across_offsets() {
        // Same instant written in two offsets.
        let a = "2024-01-01T00:00:00Z";
        let b = "2024-01-01T01:00:00+01:00";
        assert!(compare_timestamps(a, b, CompareOp::Gte));
        assert!(compare_timestamps(a, b, CompareOp::Lte));
        assert!(!compare_timestamps(a, b, CompareOp::Lt));
    }

    #[test]
    fn test_unparseable_side_is_false() {
        let good = "2024-01-01T00:00:00Z";
        for op in [CompareOp::Gt, CompareOp::Gte, CompareOp::Lt, CompareOp::Lte] {
            assert!(!compare_timestamps("not a date", good, op));
            assert!(!compare_timestamps(good, "not a date", op));
        }
    }
}
