//! Per-date results and the payload they are published as.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::constants::NOT_AVAILABLE;
use crate::rules::ScheduleLetter;

/// Outcome for one target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleResult {
    /// Cycle number, with the bell-schedule letter when the cell names one.
    Cycle {
        day: u8,
        letter: Option<ScheduleLetter>,
    },
    /// No match, a holiday, or no inferable cycle number.
    NotAvailable,
}

impl ScheduleResult {
    pub fn is_available(&self) -> bool {
        !matches!(self, ScheduleResult::NotAvailable)
    }
}

impl fmt::Display for ScheduleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleResult::Cycle { day, letter: None } => write!(f, "{}", day),
            ScheduleResult::Cycle {
                day,
                letter: Some(letter),
            } => write!(f, "{}{}", day, letter),
            ScheduleResult::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for ScheduleResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// JSON body sent to the update endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub today: ScheduleResult,
    pub tomorrow: ScheduleResult,
    pub next_day: ScheduleResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let bare = ScheduleResult::Cycle {
            day: 3,
            letter: None,
        };
        let lettered = ScheduleResult::Cycle {
            day: 3,
            letter: Some(ScheduleLetter::A),
        };
        assert_eq!(bare.to_string(), "3");
        assert_eq!(lettered.to_string(), "3A");
        assert_eq!(ScheduleResult::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = Payload {
            today: ScheduleResult::Cycle {
                day: 3,
                letter: Some(ScheduleLetter::B),
            },
            tomorrow: ScheduleResult::NotAvailable,
            next_day: ScheduleResult::Cycle {
                day: 4,
                letter: None,
            },
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"today": "3B", "tomorrow": "N/A", "next_day": "4"})
        );
    }
}
