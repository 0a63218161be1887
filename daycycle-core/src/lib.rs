//! Core types for the daycycle tool.
//!
//! This crate turns a scraped school calendar page into a three-day
//! cycle schedule:
//! - `event` parses day cells out of the page
//! - `date_match` finds calendar dates inside free-form cell text
//! - `cycle` folds the rotating day number across school days
//! - `resolve` binds cells to target dates and produces the results

pub mod constants;
pub mod cycle;
pub mod date_match;
pub mod error;
pub mod event;
pub mod resolve;
pub mod rules;
pub mod schedule;
pub mod target;

pub use error::{DayCycleError, DayCycleResult};
pub use resolve::{Resolution, Resolver};
pub use rules::{CycleRules, ScheduleLetter, SeedRule};
pub use schedule::{Payload, ScheduleResult};
pub use target::{TargetDate, TargetDates, TargetSlot};
