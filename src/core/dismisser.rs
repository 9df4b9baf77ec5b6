// Dismisser engine - applies the dismissal policy to a page's alerts.

use std::collections::HashSet;
use std::time::Duration;

use super::model::{DismissCause, DismissEvent, ElementId};
use super::page::Page;
use super::timers::TimerQueue;

/// Fixed auto-dismiss delay. Not configurable.
pub const AUTO_DISMISS_DELAY: Duration = Duration::from_millis(3000);

/// Applies a uniform dismissal policy to every alert present at
/// initialization time: a 3 second auto-hide timer per alert, plus an
/// immediate hide wired to the alert's close control when it has one.
pub struct Dismisser {
    /// Marker class identifying alert containers.
    alert_class: String,
    timers: TimerQueue,
    /// Alerts with a click handler attached. The target identifier is
    /// read from the close control at activation time, not stored here.
    handlers: HashSet<usize>,
}

impl Dismisser {
    pub fn new(alert_class: impl Into<String>) -> Self {
        Self {
            alert_class: alert_class.into(),
            timers: TimerQueue::new(),
            handlers: HashSet::new(),
        }
    }

    /// Scan the page for alert elements and wire them up. Runs once, when
    /// the page structure is fully available. For each alert found,
    /// independently and in no required order:
    /// 1. schedule a one-shot hide at `now + AUTO_DISMISS_DELAY`;
    /// 2. if the alert carries a close control, attach a click handler.
    ///
    /// Returns the handles of the alerts found.
    pub fn initialize(&mut self, page: &Page, now: Duration) -> Vec<usize> {
        let alerts = page.find_by_class(&self.alert_class);
        for &handle in &alerts {
            self.timers.schedule(now + AUTO_DISMISS_DELAY, handle);

            let has_control = page
                .get(handle)
                .map(|e| e.close_control.is_some())
                .unwrap_or(false);
            if has_control {
                self.handlers.insert(handle);
            }
        }
        log::debug!("Initialized dismisser over {} alerts", alerts.len());
        alerts
    }

    /// Whether a click handler was attached to this alert's close control.
    pub fn has_handler(&self, handle: usize) -> bool {
        self.handlers.contains(&handle)
    }

    /// Activate the close control of the given alert. Reads the target
    /// identifier from the control at activation time, resolves it in the
    /// page and hides the resolved element immediately.
    ///
    /// Every failure path is a silent no-op returning None: no handler
    /// attached, control missing, target unresolvable, or target already
    /// hidden.
    pub fn click(&mut self, page: &mut Page, handle: usize, now: Duration) -> Option<DismissEvent> {
        if !self.handlers.contains(&handle) {
            return None;
        }

        let target: ElementId = page.get(handle)?.close_control.as_ref()?.target.clone();

        let resolved = page.resolve(&target)?;
        if !page.hide(resolved) {
            return None;
        }

        Some(DismissEvent {
            element: resolved,
            id: page.get(resolved).and_then(|e| e.id.clone()),
            cause: DismissCause::Close,
            timestamp: now,
        })
    }

    /// Fire every due timer. Returns events only for elements that actually
    /// transitioned; a timer landing on an already-hidden element (manual
    /// close won the race) has no further observable effect.
    pub fn tick(&mut self, page: &mut Page, now: Duration) -> Vec<DismissEvent> {
        let mut events = Vec::new();
        for handle in self.timers.due(now) {
            if page.hide(handle) {
                events.push(DismissEvent {
                    element: handle,
                    id: page.get(handle).and_then(|e| e.id.clone()),
                    cause: DismissCause::Timer,
                    timestamp: now,
                });
            }
        }
        events
    }

    /// True while any scheduled timer has not yet fired.
    pub fn timers_pending(&self) -> bool {
        self.timers.pending_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{CloseControl, Element};

    fn make_alert(id: Option<&str>, target: Option<&str>) -> Element {
        let mut element = Element::new().with_class("alert");
        if let Some(id) = id {
            element = element.with_id(id);
        }
        if let Some(target) = target {
            element = element.with_close_control(CloseControl::targeting(target));
        }
        element
    }

    #[test]
    fn test_timer_hides_untouched_alert() {
        let mut page = Page::new();
        let handle = page.push(make_alert(Some("a"), None));

        let mut dismisser = Dismisser::new("alert");
        dismisser.initialize(&page, Duration::ZERO);

        // Nothing happens before the delay elapses
        let events = dismisser.tick(&mut page, Duration::from_millis(2999));
        assert!(events.is_empty());
        assert!(!page.is_hidden(handle));

        let events = dismisser.tick(&mut page, Duration::from_millis(3000));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].element, handle);
        assert_eq!(events[0].cause, DismissCause::Timer);
        assert!(page.is_hidden(handle));
    }

    #[test]
    fn test_click_before_timer_wins() {
        let mut page = Page::new();
        let handle = page.push(make_alert(Some("a"), Some("a")));

        let mut dismisser = Dismisser::new("alert");
        dismisser.initialize(&page, Duration::ZERO);

        let event = dismisser
            .click(&mut page, handle, Duration::from_millis(500))
            .unwrap();
        assert_eq!(event.cause, DismissCause::Close);
        assert!(page.is_hidden(handle));

        // The timer still fires later but produces no further change
        let events = dismisser.tick(&mut page, Duration::from_millis(3000));
        assert!(events.is_empty());
        assert!(page.is_hidden(handle));
    }

    #[test]
    fn test_no_handler_without_close_control() {
        let mut page = Page::new();
        let handle = page.push(make_alert(Some("b"), None));

        let mut dismisser = Dismisser::new("alert");
        dismisser.initialize(&page, Duration::ZERO);

        assert!(!dismisser.has_handler(handle));
        let event = dismisser.click(&mut page, handle, Duration::from_millis(100));
        assert!(event.is_none());
        assert!(!page.is_hidden(handle));
    }

    #[test]
    fn test_unresolvable_target_is_silent_noop() {
        let mut page = Page::new();
        let handle = page.push(make_alert(Some("c"), Some("nonexistent")));

        let mut dismisser = Dismisser::new("alert");
        dismisser.initialize(&page, Duration::ZERO);

        let event = dismisser.click(&mut page, handle, Duration::from_millis(100));
        assert!(event.is_none());
        assert!(!page.is_hidden(handle), "no state change anywhere");
    }

    #[test]
    fn test_close_control_may_target_another_element() {
        let mut page = Page::new();
        let other = page.push(Element::new().with_id("other"));
        let handle = page.push(make_alert(Some("a"), Some("other")));

        let mut dismisser = Dismisser::new("alert");
        dismisser.initialize(&page, Duration::ZERO);

        let event = dismisser
            .click(&mut page, handle, Duration::from_millis(100))
            .unwrap();
        assert_eq!(event.element, other);
        assert!(page.is_hidden(other));
        assert!(!page.is_hidden(handle), "the alert itself stays visible");
    }

    #[test]
    fn test_repeated_click_is_noop() {
        let mut page = Page::new();
        let handle = page.push(make_alert(Some("a"), Some("a")));

        let mut dismisser = Dismisser::new("alert");
        dismisser.initialize(&page, Duration::ZERO);

        assert!(dismisser
            .click(&mut page, handle, Duration::from_millis(100))
            .is_some());
        assert!(dismisser
            .click(&mut page, handle, Duration::from_millis(200))
            .is_none());
    }

    #[test]
    fn test_only_marked_elements_are_scanned() {
        let mut page = Page::new();
        page.push(Element::new().with_class("nav").with_id("nav"));
        let alert = page.push(make_alert(Some("a"), None));

        let mut dismisser = Dismisser::new("alert");
        let alerts = dismisser.initialize(&page, Duration::ZERO);
        assert_eq!(alerts, vec![alert]);

        let events = dismisser.tick(&mut page, Duration::from_millis(3000));
        assert_eq!(events.len(), 1);
        assert!(!page.is_hidden(0), "non-alert elements are untouched");
    }
}
