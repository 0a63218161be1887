use crate::rules::ScheduleLetter;

/// Rotation length used when none is configured.
pub const DEFAULT_CYCLE_LENGTH: u8 = 6;

/// Upper bound for the rotation length; results are rendered as a single digit.
pub const MAX_CYCLE_LENGTH: u8 = 9;

/// CSS selector for calendar day cells that carry at least one event.
pub const DEFAULT_DAY_SELECTOR: &str = "div.fsStateHasEvents";

/// Marker that seeds the rotation at day 1.
pub const DEFAULT_FIRST_DAY_MARKER: &str = "1st Day of School";

/// Markers that flag a day without school.
pub const DEFAULT_HOLIDAY_MARKERS: &[&str] = &["HOLIDAY", "School Closed"];

/// Schedule-letter markers, matched against cell text with whitespace removed.
pub const DEFAULT_SCHEDULE_MARKERS: &[(&str, ScheduleLetter)] = &[
    ("HS-ASchedule", ScheduleLetter::A),
    ("HS-BSchedule", ScheduleLetter::B),
    ("HS-CSchedule", ScheduleLetter::C),
    ("HS-DSchedule", ScheduleLetter::D),
];

/// Token that precedes an explicit cycle number, e.g. "Day 3".
pub const DAY_TOKEN: &str = "Day ";

/// Sentinel published when a date has no usable result.
pub const NOT_AVAILABLE: &str = "N/A";
