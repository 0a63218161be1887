//! Cycle rules: rotation length, seeding, and the text markers that
//! classify a calendar cell.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DAY_TOKEN, DEFAULT_CYCLE_LENGTH, DEFAULT_DAY_SELECTOR, DEFAULT_FIRST_DAY_MARKER,
    DEFAULT_HOLIDAY_MARKERS, DEFAULT_SCHEDULE_MARKERS, MAX_CYCLE_LENGTH,
};
use crate::error::{DayCycleError, DayCycleResult};

/// How the rotation is seeded before any explicit "Day N" appears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedRule {
    /// The first-day-of-school marker counts as Day 1.
    #[default]
    FirstDayOfSchool,
    /// Only explicit "Day N" tokens anchor the rotation.
    ExplicitDayOnly,
}

/// Bell-schedule variant in effect on a cycle day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleLetter {
    A,
    B,
    C,
    D,
}

impl ScheduleLetter {
    pub fn as_char(self) -> char {
        match self {
            ScheduleLetter::A => 'A',
            ScheduleLetter::B => 'B',
            ScheduleLetter::C => 'C',
            ScheduleLetter::D => 'D',
        }
    }
}

impl fmt::Display for ScheduleLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

fn default_schedules() -> BTreeMap<String, ScheduleLetter> {
    DEFAULT_SCHEDULE_MARKERS
        .iter()
        .map(|(marker, letter)| (marker.to_string(), *letter))
        .collect()
}

/// Everything the resolver needs to know about a particular school's calendar.
///
/// Deserializes from the `[cycle]` table of the config file; every field
/// falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleRules {
    /// Number of days in the rotation.
    pub length: u8,

    pub seed: SeedRule,

    /// CSS selector for the day cells of the calendar page.
    pub day_selector: String,

    pub holiday_markers: Vec<String>,

    pub first_day_marker: String,

    /// Marker → letter. Markers are compared against cell text with all
    /// whitespace removed, so "HS - B Schedule" matches "HS-BSchedule".
    pub schedules: BTreeMap<String, ScheduleLetter>,
}

impl Default for CycleRules {
    fn default() -> Self {
        CycleRules {
            length: DEFAULT_CYCLE_LENGTH,
            seed: SeedRule::default(),
            day_selector: DEFAULT_DAY_SELECTOR.to_string(),
            holiday_markers: DEFAULT_HOLIDAY_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            first_day_marker: DEFAULT_FIRST_DAY_MARKER.to_string(),
            schedules: default_schedules(),
        }
    }
}

impl CycleRules {
    /// Rules with the default markers and the given rotation length.
    pub fn with_length(length: u8) -> Self {
        CycleRules {
            length,
            ..CycleRules::default()
        }
    }

    pub fn validate(&self) -> DayCycleResult<()> {
        self.cycle_length()?;
        if self.holiday_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(DayCycleError::EmptyHolidayMarker);
        }
        if self.schedules.keys().any(|m| strip_whitespace(m).is_empty()) {
            return Err(DayCycleError::EmptyScheduleMarker);
        }
        Ok(())
    }

    /// Rotation length, checked against `1..=MAX_CYCLE_LENGTH`.
    pub fn cycle_length(&self) -> DayCycleResult<NonZeroU8> {
        NonZeroU8::new(self.length)
            .filter(|length| length.get() <= MAX_CYCLE_LENGTH)
            .ok_or(DayCycleError::InvalidCycleLength {
                got: self.length,
                max: MAX_CYCLE_LENGTH,
            })
    }

    pub fn is_holiday(&self, text: &str) -> bool {
        self.holiday_markers.iter().any(|m| text.contains(m.as_str()))
    }

    /// True when the text carries the first-day marker and the seeding rule honors it.
    pub fn seeds_first_day(&self, text: &str) -> bool {
        self.seed == SeedRule::FirstDayOfSchool
            && !self.first_day_marker.is_empty()
            && text.contains(self.first_day_marker.as_str())
    }

    /// First explicit "Day N" token with N inside the rotation.
    ///
    /// The token must start a word ("MonDay 2" is not a token) and the
    /// whole number is read, so "Day 12" never reads as day 1.
    pub fn day_token(&self, text: &str) -> Option<u8> {
        text.match_indices(DAY_TOKEN).find_map(|(idx, _)| {
            let starts_word = text[..idx]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric());
            if !starts_word {
                return None;
            }

            let rest = &text[idx + DAY_TOKEN.len()..];
            let digits_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let day: u32 = rest[..digits_end].parse().ok()?;

            (1..=u32::from(self.length))
                .contains(&day)
                .then_some(day as u8)
        })
    }

    /// Schedule letter whose marker appears in the text.
    pub fn schedule_letter(&self, text: &str) -> Option<ScheduleLetter> {
        let compact = strip_whitespace(text);
        self.schedules
            .iter()
            .find(|(marker, _)| compact.contains(strip_whitespace(marker).as_str()))
            .map(|(_, letter)| *letter)
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
