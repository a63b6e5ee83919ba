//! Date normalization for extracted profile fields.
//!
//! Dates are normalized to `YYYY-MM` when both year and month are
//! recoverable. A date carrying only a year is unparseable for
//! structured purposes and dropped rather than guessed. An ongoing
//! entry maps to the literal sentinel `"present"` - a distinct,
//! meaningful state (ongoing) versus an absent end date (unknown).

use std::sync::LazyLock;

use regex::Regex;

use crate::models::PRESENT;

/// A parsed date range. Either bound may be absent when it could not be
/// recovered at month precision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Ordered range patterns; the first match on a line wins.
static RANGE_PATTERNS: LazyLock<Vec<(Regex, RangeKind)>> = LazyLock::new(|| {
    let ongoing = r"present|today|now|current|ongoing|heute|laufend|aujourd'hui|oggi|attuale";
    vec![
        // 03/2019 - 06/2021, 03.2019 bis 06.2021
        (
            Regex::new(r"(?i)\b(\d{1,2})[./](\d{4})\s*(?:-|–|—|to|bis|à|a)\s*(\d{1,2})[./](\d{4})")
                .unwrap(),
            RangeKind::MonthYearBoth,
        ),
        // 03/2019 - present
        (
            Regex::new(&format!(
                r"(?i)\b(\d{{1,2}})[./](\d{{4}})\s*(?:-|–|—|to|bis|à|a)\s*(?:{})\b",
                ongoing
            ))
            .unwrap(),
            RangeKind::MonthYearOngoing,
        ),
        // 2019-03 - 2021-06 (ISO year-month)
        (
            Regex::new(r"\b(\d{4})-(\d{2})\s*(?:-|–|—|to)\s*(\d{4})-(\d{2})\b").unwrap(),
            RangeKind::IsoBoth,
        ),
        // 2019-03 - present
        (
            Regex::new(&format!(
                r"(?i)\b(\d{{4}})-(\d{{2}})\s*(?:-|–|—|to)\s*(?:{})\b",
                ongoing
            ))
            .unwrap(),
            RangeKind::IsoOngoing,
        ),
        // since 03/2019, seit 03.2019, depuis 03/2019
        (
            Regex::new(r"(?i)\b(?:since|seit|depuis|dal)\s+(\d{1,2})[./](\d{4})").unwrap(),
            RangeKind::SinceMonthYear,
        ),
        // Year-only ranges segment entries but carry no structured
        // dates; only the ongoing sentinel survives.
        (
            Regex::new(&format!(
                r"(?i)\b(\d{{4}})\s*(?:-|–|—|to|bis|à)\s*(?:(\d{{4}})|(?:{}))\b",
                ongoing
            ))
            .unwrap(),
            RangeKind::YearOnly,
        ),
    ]
});

#[derive(Debug, Clone, Copy)]
enum RangeKind {
    MonthYearBoth,
    MonthYearOngoing,
    IsoBoth,
    IsoOngoing,
    SinceMonthYear,
    YearOnly,
}

/// Normalize a year/month pair to `YYYY-MM`. Returns `None` when the
/// month is out of range or either part is not numeric.
pub fn normalize_year_month(year: &str, month: &str) -> Option<String> {
    let year: u32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if !(1..=12).contains(&month) || !(1900..=2100).contains(&year) {
        return None;
    }
    Some(format!("{:04}-{:02}", year, month))
}

/// End date of an entry: the `"present"` sentinel when ongoing,
/// otherwise the normalized year/month pair, otherwise absent.
pub fn end_date(current: bool, year: Option<&str>, month: Option<&str>) -> Option<String> {
    if current {
        return Some(PRESENT.to_string());
    }
    normalize_year_month(year?, month?)
}

/// Find the first date range on a line. Returns the parsed range and
/// the byte span of the match within the line.
pub fn parse_range(line: &str) -> Option<(ParsedRange, (usize, usize))> {
    for (pattern, kind) in RANGE_PATTERNS.iter() {
        let Some(caps) = pattern.captures(line) else {
            continue;
        };
        let whole = caps.get(0).unwrap();
        let span = (whole.start(), whole.end());
        let group = |i: usize| caps.get(i).map(|m| m.as_str());

        let range = match kind {
            RangeKind::MonthYearBoth => ParsedRange {
                start: normalize_year_month(group(2)?, group(1)?),
                end: normalize_year_month(group(4)?, group(3)?),
            },
            RangeKind::MonthYearOngoing => ParsedRange {
                start: normalize_year_month(group(2)?, group(1)?),
                end: Some(PRESENT.to_string()),
            },
            RangeKind::IsoBoth => ParsedRange {
                start: normalize_year_month(group(1)?, group(2)?),
                end: normalize_year_month(group(3)?, group(4)?),
            },
            RangeKind::IsoOngoing => ParsedRange {
                start: normalize_year_month(group(1)?, group(2)?),
                end: Some(PRESENT.to_string()),
            },
            RangeKind::SinceMonthYear => ParsedRange {
                start: normalize_year_month(group(2)?, group(1)?),
                end: Some(PRESENT.to_string()),
            },
            RangeKind::YearOnly => ParsedRange {
                start: None,
                end: if group(2).is_none() {
                    Some(PRESENT.to_string())
                } else {
                    None
                },
            },
        };
        return Some((range, span));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_year_month() {
        assert_eq!(normalize_year_month("2019", "03"), Some("2019-03".to_string()));
        assert_eq!(normalize_year_month("2019", "3"), Some("2019-03".to_string()));
        assert_eq!(normalize_year_month("2019", "13"), None);
        assert_eq!(normalize_year_month("19", "03"), None);
    }

    #[test]
    fn test_end_date_sentinel() {
        assert_eq!(end_date(true, None, None), Some("present".to_string()));
        assert_eq!(
            end_date(false, Some("2021"), Some("06")),
            Some("2021-06".to_string())
        );
        assert_eq!(end_date(false, Some("2021"), None), None);
    }

    #[test]
    fn test_month_year_range() {
        let (range, _) = parse_range("03/2019 - 06/2021 Software Engineer").unwrap();
        assert_eq!(range.start.as_deref(), Some("2019-03"));
        assert_eq!(range.end.as_deref(), Some("2021-06"));
    }

    #[test]
    fn test_german_ongoing_range() {
        let (range, _) = parse_range("03.2019 bis heute").unwrap();
        assert_eq!(range.start.as_deref(), Some("2019-03"));
        assert_eq!(range.end.as_deref(), Some("present"));
    }

    #[test]
    fn test_iso_range() {
        let (range, _) = parse_range("2019-03 to 2021-06").unwrap();
        assert_eq!(range.start.as_deref(), Some("2019-03"));
        assert_eq!(range.end.as_deref(), Some("2021-06"));
    }

    #[test]
    fn test_since_range() {
        let (range, _) = parse_range("seit 01.2022, Zürich").unwrap();
        assert_eq!(range.start.as_deref(), Some("2022-01"));
        assert_eq!(range.end.as_deref(), Some("present"));
    }

    #[test]
    fn test_year_only_range_drops_dates() {
        let (range, _) = parse_range("2019 - 2021 Backend Developer").unwrap();
        assert_eq!(range.start, None);
        assert_eq!(range.end, None);

        let (range, _) = parse_range("2019 - present").unwrap();
        assert_eq!(range.start, None);
        assert_eq!(range.end.as_deref(), Some("present"));
    }

    #[test]
    fn test_no_range() {
        assert!(parse_range("Software Engineer at Google").is_none());
    }
}
