//! Textual date matching.
//!
//! The calendar page has no structured date field on its day cells; dates
//! show up as prose like "Tuesday, August 25" (sometimes without the comma).
//! Everything that needs to know which date a cell belongs to goes through
//! this module.

use chrono::{NaiveDate, Weekday};

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
    ("Sunday", Weekday::Sun),
];

const MONTHS: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Matches the textual renderings of a single calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatcher {
    variants: [String; 2],
}

impl DateMatcher {
    pub fn for_date(date: NaiveDate) -> Self {
        DateMatcher {
            variants: [
                date.format("%A, %B %-d").to_string(),
                date.format("%A %B %-d").to_string(),
            ],
        }
    }

    /// "Tuesday, August 25" and "Tuesday August 25".
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// True when any variant appears in `text` and is not the prefix of a
    /// longer day number ("Sunday, August 2" vs "Sunday, August 23").
    pub fn matches(&self, text: &str) -> bool {
        self.variants
            .iter()
            .any(|variant| contains_standalone(text, variant))
    }

    /// True when the cell's own date heading is this date.
    ///
    /// Only the first "<Weekday>[,] <Month>" heading counts, so a date named
    /// later in the event prose ("Spirit Week through Wednesday, August 26")
    /// does not claim the cell. Every variant is itself a heading, so a cell
    /// without one never matches.
    pub fn matches_heading(&self, text: &str) -> bool {
        let Some((pos, _)) = first_heading(text) else {
            return false;
        };
        let heading = &text[pos..];
        self.variants.iter().any(|variant| {
            heading.starts_with(variant.as_str())
                && !heading[variant.len()..].starts_with(|c: char| c.is_ascii_digit())
        })
    }
}

fn contains_standalone(text: &str, needle: &str) -> bool {
    text.match_indices(needle).any(|(idx, _)| {
        !text[idx + needle.len()..].starts_with(|c: char| c.is_ascii_digit())
    })
}

/// Weekday of the first "<Weekday>[,] <Month>" heading in `text`.
pub fn heading_weekday(text: &str) -> Option<Weekday> {
    first_heading(text).map(|(_, weekday)| weekday)
}

fn first_heading(text: &str) -> Option<(usize, Weekday)> {
    WEEKDAYS
        .iter()
        .filter_map(|(name, weekday)| heading_position(text, name).map(|pos| (pos, *weekday)))
        .min_by_key(|(pos, _)| *pos)
}

fn heading_position(text: &str, weekday_name: &str) -> Option<usize> {
    text.match_indices(weekday_name)
        .map(|(idx, _)| idx)
        .find(|&idx| {
            let rest = &text[idx + weekday_name.len()..];
            let rest = rest.strip_prefix(',').unwrap_or(rest);
            let Some(rest) = rest.strip_prefix(' ') else {
                return false;
            };
            MONTHS.iter().any(|month| rest.starts_with(month))
        })
}

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_variants_with_and_without_comma() {
        let matcher = DateMatcher::for_date(date(2020, 8, 25));
        assert_eq!(
            matcher.variants(),
            &["Tuesday, August 25".to_string(), "Tuesday August 25".to_string()]
        );
    }

    #[test]
    fn test_matches_either_variant() {
        let matcher = DateMatcher::for_date(date(2020, 8, 25));
        assert!(matcher.matches("Events for Tuesday, August 25 Day 3"));
        assert!(matcher.matches("Tuesday August 25"));
        assert!(!matcher.matches("Wednesday, August 26"));
    }

    #[test]
    fn test_single_digit_day_does_not_match_longer_number() {
        // August 2 and August 23, 2020 are both Sundays
        let matcher = DateMatcher::for_date(date(2020, 8, 2));
        assert!(!matcher.matches("Sunday, August 23 Bake Sale"));
        assert!(matcher.matches("Sunday, August 2 Bake Sale"));
        assert!(matcher.matches("Sunday, August 2"));
    }

    #[test]
    fn test_matches_heading_ignores_dates_in_prose() {
        let matcher = DateMatcher::for_date(date(2020, 8, 26));
        let text = "Monday, August 24 Day 1 Spirit Week through Wednesday, August 26";
        assert!(matcher.matches(text));
        assert!(!matcher.matches_heading(text));
        assert!(matcher.matches_heading("Wednesday, August 26 HOLIDAY"));
        assert!(matcher.matches_heading("Wednesday August 26"));
    }

    #[test]
    fn test_matches_heading_guards_longer_day_number() {
        let matcher = DateMatcher::for_date(date(2020, 8, 2));
        assert!(!matcher.matches_heading("Sunday, August 23 Bake Sale"));
        assert!(matcher.matches_heading("Sunday, August 2 Bake Sale"));
    }

    #[test]
    fn test_matches_heading_needs_a_heading() {
        let matcher = DateMatcher::for_date(date(2020, 8, 25));
        assert!(matcher.matches_heading("Events for Tuesday, August 25 Day 3"));
        assert!(!matcher.matches_heading("Day 3 HS - B Schedule"));
    }

    #[test]
    fn test_heading_weekday_takes_first_heading() {
        assert_eq!(
            heading_weekday("Saturday, August 29 Football vs. Central Friday, September 4"),
            Some(Weekday::Sat)
        );
        assert_eq!(heading_weekday("Monday September 7 HOLIDAY"), Some(Weekday::Mon));
    }

    #[test]
    fn test_heading_weekday_needs_a_month() {
        assert_eq!(heading_weekday("Sunday Funday"), None);
        assert_eq!(heading_weekday("Day 3 HS - A Schedule"), None);
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(Weekday::Sat));
        assert!(is_weekend(Weekday::Sun));
        assert!(!is_weekend(Weekday::Fri));
    }
}
