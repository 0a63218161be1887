//! The three forward-looking dates every run resolves.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::date_match::DateMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSlot {
    Today,
    Tomorrow,
    NextDay,
}

impl TargetSlot {
    /// All slots in output order.
    pub const ALL: [TargetSlot; 3] = [TargetSlot::Today, TargetSlot::Tomorrow, TargetSlot::NextDay];

    pub fn offset_days(self) -> i64 {
        match self {
            TargetSlot::Today => 0,
            TargetSlot::Tomorrow => 1,
            TargetSlot::NextDay => 2,
        }
    }

    /// Key used in the published payload.
    pub fn key(self) -> &'static str {
        match self {
            TargetSlot::Today => "today",
            TargetSlot::Tomorrow => "tomorrow",
            TargetSlot::NextDay => "next_day",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetSlot::Today => "Today",
            TargetSlot::Tomorrow => "Tomorrow",
            TargetSlot::NextDay => "Day after tomorrow",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            TargetSlot::Today => 0,
            TargetSlot::Tomorrow => 1,
            TargetSlot::NextDay => 2,
        }
    }
}

impl fmt::Display for TargetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A slot bound to its concrete calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDate {
    pub slot: TargetSlot,
    pub date: NaiveDate,
    pub matcher: DateMatcher,
}

impl TargetDate {
    pub fn new(slot: TargetSlot, today: NaiveDate) -> Self {
        let date = today + Duration::days(slot.offset_days());
        TargetDate {
            slot,
            date,
            matcher: DateMatcher::for_date(date),
        }
    }
}

/// Today, tomorrow and the day after, always in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDates([TargetDate; 3]);

impl TargetDates {
    pub fn starting(today: NaiveDate) -> Self {
        TargetDates(TargetSlot::ALL.map(|slot| TargetDate::new(slot, today)))
    }

    pub fn today(&self) -> NaiveDate {
        self.0[0].date
    }

    pub fn get(&self, slot: TargetSlot) -> &TargetDate {
        &self.0[slot.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetDate> {
        self.0.iter()
    }
}
