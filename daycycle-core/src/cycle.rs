//! Cycle-number inference.
//!
//! Cells are classified one at a time and folded left to right through
//! [`CycleState::step`]. An anchor (an explicit "Day N", or the first day of
//! school) pins the rotation; every later school day moves it forward by one,
//! wrapping at the rotation length. Holidays and weekends leave it alone.

use std::num::NonZeroU8;

use crate::date_match::{heading_weekday, is_weekend};
use crate::rules::CycleRules;

/// What a single day cell means for the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    /// No school; never carries a cycle number.
    Holiday,
    /// Saturday or Sunday cell (sports, events); never carries a cycle number.
    Weekend,
    /// The cell pins the rotation to this day number.
    Anchor(u8),
    /// An ordinary school day without an explicit day number.
    SchoolDay,
}

impl DayKind {
    pub fn classify(text: &str, rules: &CycleRules) -> Self {
        if rules.is_holiday(text) {
            return DayKind::Holiday;
        }
        if let Some(day) = rules.day_token(text) {
            return DayKind::Anchor(day);
        }
        if rules.seeds_first_day(text) {
            return DayKind::Anchor(1);
        }
        if heading_weekday(text).is_some_and(is_weekend) {
            return DayKind::Weekend;
        }
        DayKind::SchoolDay
    }

    /// Whether the cell can carry a cycle number at all.
    pub fn is_school_day(self) -> bool {
        matches!(self, DayKind::Anchor(_) | DayKind::SchoolDay)
    }
}

/// Running inference state: the last anchor and the school days counted since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleState {
    length: NonZeroU8,
    anchor: Option<u8>,
    school_days: u32,
}

impl CycleState {
    /// Fresh state with no known cycle number.
    pub fn new(length: NonZeroU8) -> Self {
        CycleState {
            length,
            anchor: None,
            school_days: 0,
        }
    }

    /// State after consuming one cell.
    pub fn step(self, kind: DayKind) -> Self {
        match kind {
            DayKind::Holiday | DayKind::Weekend => self,
            DayKind::Anchor(day) => CycleState {
                anchor: Some(day),
                school_days: 0,
                ..self
            },
            DayKind::SchoolDay if self.anchor.is_some() => CycleState {
                school_days: self.school_days + 1,
                ..self
            },
            DayKind::SchoolDay => self,
        }
    }

    /// Current cycle number, if the rotation has been anchored.
    pub fn current(&self) -> Option<u8> {
        let anchor = u32::from(self.anchor?);
        let length = u32::from(self.length.get());
        let day = (anchor - 1 + self.school_days) % length + 1;
        Some(day as u8)
    }

    pub fn school_days(&self) -> u32 {
        self.school_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::SeedRule;

    fn fresh_state(length: u8) -> CycleState {
        CycleState::new(NonZeroU8::new(length).unwrap())
    }

    fn fold(length: u8, kinds: &[DayKind]) -> Vec<Option<u8>> {
        kinds
            .iter()
            .scan(fresh_state(length), |state, kind| {
                *state = state.step(*kind);
                Some(state.current())
            })
            .collect()
    }

    #[test]
    fn test_unknown_until_anchored() {
        let days = fold(6, &[DayKind::SchoolDay, DayKind::SchoolDay, DayKind::Anchor(4)]);
        assert_eq!(days, vec![None, None, Some(4)]);
    }

    #[test]
    fn test_rolls_forward_and_wraps() {
        let days = fold(
            6,
            &[
                DayKind::Anchor(5),
                DayKind::SchoolDay,
                DayKind::SchoolDay,
                DayKind::SchoolDay,
            ],
        );
        assert_eq!(days, vec![Some(5), Some(6), Some(1), Some(2)]);
    }

    #[test]
    fn test_four_day_rotation_wraps_at_four() {
        let days = fold(4, &[DayKind::Anchor(3), DayKind::SchoolDay, DayKind::SchoolDay]);
        assert_eq!(days, vec![Some(3), Some(4), Some(1)]);
    }

    #[test]
    fn test_holidays_and_weekends_do_not_advance() {
        let days = fold(
            6,
            &[
                DayKind::Anchor(2),
                DayKind::Holiday,
                DayKind::Weekend,
                DayKind::SchoolDay,
            ],
        );
        assert_eq!(days, vec![Some(2), Some(2), Some(2), Some(3)]);
    }

    #[test]
    fn test_anchor_resets_counter() {
        let state = fresh_state(6)
            .step(DayKind::Anchor(1))
            .step(DayKind::SchoolDay)
            .step(DayKind::SchoolDay);
        assert_eq!(state.school_days(), 2);

        let state = state.step(DayKind::Anchor(6));
        assert_eq!(state.school_days(), 0);
        assert_eq!(state.current(), Some(6));
    }

    #[test]
    fn test_single_day_rotation_stays_at_one() {
        let days = fold(1, &[DayKind::Anchor(1), DayKind::SchoolDay, DayKind::SchoolDay]);
        assert_eq!(days, vec![Some(1), Some(1), Some(1)]);
    }

    #[test]
    fn test_classify_precedence() {
        let rules = CycleRules::default();
        assert_eq!(
            DayKind::classify("Monday, September 7 HOLIDAY Day 3", &rules),
            DayKind::Holiday
        );
        assert_eq!(
            DayKind::classify("Tuesday, August 25 Day 3 HS - B Schedule", &rules),
            DayKind::Anchor(3)
        );
        assert_eq!(
            DayKind::classify("Thursday, August 27 1st Day of School", &rules),
            DayKind::Anchor(1)
        );
        assert_eq!(
            DayKind::classify("Saturday, August 29 Football", &rules),
            DayKind::Weekend
        );
        assert_eq!(
            DayKind::classify("Friday, August 28 HS - A Schedule", &rules),
            DayKind::SchoolDay
        );
    }

    #[test]
    fn test_explicit_seed_ignores_first_day_marker() {
        let rules = CycleRules {
            seed: SeedRule::ExplicitDayOnly,
            ..CycleRules::default()
        };
        assert_eq!(
            DayKind::classify("Thursday, August 27 1st Day of School", &rules),
            DayKind::SchoolDay
        );
    }

    #[test]
    fn test_is_school_day() {
        assert!(DayKind::Anchor(1).is_school_day());
        assert!(DayKind::SchoolDay.is_school_day());
        assert!(!DayKind::Holiday.is_school_day());
        assert!(!DayKind::Weekend.is_school_day());
    }
}
