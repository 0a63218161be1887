//! The cycle resolver: calendar page in, three schedule results out.

use std::num::NonZeroU8;

use tracing::debug;

use crate::cycle::{CycleState, DayKind};
use crate::error::DayCycleResult;
use crate::event::{CalendarEvent, DaySelector, parse_events};
use crate::rules::CycleRules;
use crate::schedule::{Payload, ScheduleResult};
use crate::target::{TargetDate, TargetDates, TargetSlot};

/// How a single day cell was read during the fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTrace {
    pub index: usize,
    pub kind: DayKind,
    /// Cycle number active for this cell, if any.
    pub cycle: Option<u8>,
}

/// Result for one target date, with the cell it was bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotResolution {
    pub target: TargetDate,
    /// Index of the first cell headed by the target date.
    pub bound: Option<usize>,
    pub result: ScheduleResult,
}

/// Output of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    slots: [SlotResolution; 3],
    pub entries: Vec<EntryTrace>,
}

impl Resolution {
    pub fn slot(&self, slot: TargetSlot) -> &SlotResolution {
        &self.slots[slot.index()]
    }

    pub fn result(&self, slot: TargetSlot) -> ScheduleResult {
        self.slot(slot).result
    }

    /// Slots in output order.
    pub fn slots(&self) -> &[SlotResolution] {
        &self.slots
    }

    pub fn payload(&self) -> Payload {
        Payload {
            today: self.result(TargetSlot::Today),
            tomorrow: self.result(TargetSlot::Tomorrow),
            next_day: self.result(TargetSlot::NextDay),
        }
    }
}

/// Resolves cycle designations from a calendar page.
///
/// Holds no state between calls; each `resolve` starts a fresh fold.
#[derive(Debug, Clone)]
pub struct Resolver {
    rules: CycleRules,
    length: NonZeroU8,
    selector: DaySelector,
}

impl Resolver {
    pub fn new(rules: CycleRules) -> DayCycleResult<Self> {
        rules.validate()?;
        let length = rules.cycle_length()?;
        let selector = DaySelector::parse(&rules.day_selector)?;
        Ok(Resolver {
            rules,
            length,
            selector,
        })
    }

    pub fn rules(&self) -> &CycleRules {
        &self.rules
    }

    pub fn resolve(&self, html: &str, targets: &TargetDates) -> Resolution {
        let events = parse_events(html, &self.selector);
        debug!(cells = events.len(), "Parsed calendar day cells");
        self.resolve_events(&events, targets)
    }

    pub fn resolve_events(&self, events: &[CalendarEvent], targets: &TargetDates) -> Resolution {
        let entries = self.fold(events);

        let slots = TargetSlot::ALL.map(|slot| {
            let target = targets.get(slot).clone();
            let bound = events
                .iter()
                .position(|e| target.matcher.matches_heading(&e.text));
            let result = match bound {
                Some(idx) => self.result_for(&events[idx], &entries[idx]),
                None => ScheduleResult::NotAvailable,
            };

            debug!(
                slot = slot.key(),
                date = %target.date,
                bound = ?bound,
                result = %result,
                "Resolved target date"
            );

            SlotResolution {
                target,
                bound,
                result,
            }
        });

        Resolution { slots, entries }
    }

    fn fold(&self, events: &[CalendarEvent]) -> Vec<EntryTrace> {
        events
            .iter()
            .scan(CycleState::new(self.length), |state, event| {
                let kind = DayKind::classify(&event.text, &self.rules);
                *state = state.step(kind);
                let cycle = if kind.is_school_day() {
                    state.current()
                } else {
                    None
                };

                debug!(index = event.index, ?kind, ?cycle, text = %event.text, "Processing event");

                Some(EntryTrace {
                    index: event.index,
                    kind,
                    cycle,
                })
            })
            .collect()
    }

    fn result_for(&self, event: &CalendarEvent, entry: &EntryTrace) -> ScheduleResult {
        match (entry.kind, entry.cycle) {
            (DayKind::Holiday | DayKind::Weekend, _) | (_, None) => ScheduleResult::NotAvailable,
            (_, Some(day)) => ScheduleResult::Cycle {
                day,
                letter: self.rules.schedule_letter(&event.text),
            },
        }
    }
}
