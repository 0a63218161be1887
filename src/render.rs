//! Colored terminal rendering for resolution results.

use daycycle_core::resolve::{Resolution, SlotResolution};
use daycycle_core::ScheduleResult;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ScheduleResult {
    fn render(&self) -> String {
        if self.is_available() {
            self.to_string().green().bold().to_string()
        } else {
            self.to_string().dimmed().to_string()
        }
    }
}

impl Render for SlotResolution {
    fn render(&self) -> String {
        let date = self.target.date.format("%A, %B %-d").to_string();
        format!(
            "{}: {} {}",
            self.target.slot.label(),
            self.result.render(),
            format!("({})", date).dimmed()
        )
    }
}

impl Render for Resolution {
    fn render(&self) -> String {
        let mut lines = vec!["Scraped Results:".bold().to_string()];
        lines.extend(self.slots().iter().map(|slot| format!("  {}", slot.render())));
        lines.join("\n")
    }
}
