// One-shot timer queue over simulated time.

use std::time::Duration;

struct Timer {
    deadline: Duration,
    element: usize,
}

/// Pending one-shot hide timers, one per alert. Cancellation is not
/// supported: a timer that fires after its element was manually dismissed
/// simply hits an already-hidden element.
#[derive(Default)]
pub struct TimerQueue {
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, deadline: Duration, element: usize) {
        self.pending.push(Timer { deadline, element });
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pop every timer whose deadline has passed, in schedule order.
    pub fn due(&mut self, now: Duration) -> Vec<usize> {
        let mut fired = Vec::new();
        self.pending.retain(|timer| {
            if timer.deadline <= now {
                fired.push(timer.element);
                false
            } else {
                true
            }
        });
        fired
    }
}
