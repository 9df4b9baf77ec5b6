use std::time::{Duration, Instant};

use super::dismisser::Dismisser;
use super::model::DismissEvent;
use super::page::Page;

pub struct CoordinatorOutput {
    pub dismissed: Vec<DismissEvent>,
    /// True once every scheduled timer has fired; the driving loop can stop.
    pub idle: bool,
}

/// Glue between wall-clock execution and the sim-time engine. Owns the page
/// and the dismisser, and projects elapsed real time into the Duration
/// timestamps the engine works with.
pub struct Coordinator {
    page: Page,
    dismisser: Dismisser,
    started: Option<Instant>,
}

impl Coordinator {
    pub fn new(page: Page, alert_class: impl Into<String>) -> Self {
        Self {
            page,
            dismisser: Dismisser::new(alert_class),
            started: None,
        }
    }

    /// Run the dismisser's entry point once, when the page structure is
    /// available. Repeat calls are no-ops.
    pub fn initialize(&mut self) -> Vec<usize> {
        if self.started.is_some() {
            return Vec::new();
        }
        self.started = Some(Instant::now());
        self.dismisser.initialize(&self.page, Duration::ZERO)
    }

    fn sim_time(&self) -> Duration {
        self.started
            .map(|started| started.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Forward a user activation of an alert's close control at the current
    /// projected time.
    pub fn click(&mut self, handle: usize) -> Option<DismissEvent> {
        let now = self.sim_time();
        self.dismisser.click(&mut self.page, handle, now)
    }

    /// Fire due timers against the current projected time.
    pub fn tick(&mut self) -> CoordinatorOutput {
        let now = self.sim_time();
        let dismissed = self.dismisser.tick(&mut self.page, now);

        CoordinatorOutput {
            dismissed,
            idle: !self.dismisser.timers_pending(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{CloseControl, DismissCause, Element};

    #[test]
    fn test_coordinator_flow() {
        let mut page = Page::new();
        let alert = page.push(
            Element::new()
                .with_class("alert")
                .with_id("a")
                .with_close_control(CloseControl::targeting("a")),
        );

        let mut coord = Coordinator::new(page, "alert");

        // Tick before initialize: nothing scheduled, nothing fires
        let output = coord.tick();
        assert!(output.dismissed.is_empty());
        assert!(output.idle);

        let found = coord.initialize();
        assert_eq!(found, vec![alert]);

        // Timers are pending but far from due
        let output = coord.tick();
        assert!(output.dismissed.is_empty());
        assert!(!output.idle);

        // Manual close resolves immediately
        let event = coord.click(alert).unwrap();
        assert_eq!(event.cause, DismissCause::Close);
        assert!(coord.page().get(alert).unwrap().visibility.is_hidden());
    }

    #[test]
    fn test_initialize_runs_once() {
        let mut page = Page::new();
        page.push(Element::new().with_class("alert"));

        let mut coord = Coordinator::new(page, "alert");
        assert_eq!(coord.initialize().len(), 1);
        assert!(coord.initialize().is_empty(), "second call schedules nothing");
    }
}
