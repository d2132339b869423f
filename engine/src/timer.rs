use std::time::Duration;

/// Opaque id for a scheduled one-shot timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct PendingTimer {
    handle: TimerHandle,
    remaining: Duration,
}

/// One-shot deferred timers, advanced by the frame loop. A timer fires on
/// the first `update` whose accumulated time reaches its delay; `poll`
/// observes the firing exactly once.
pub struct TimerQueue {
    next_id: u64,
    pending: Vec<PendingTimer>,
    fired: Vec<TimerHandle>,
}

impl TimerQueue {
    pub fn new() -> TimerQueue {
        TimerQueue {
            next_id: 0,
            pending: Vec::new(),
            fired: Vec::new(),
        }
    }

    pub fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            handle,
            remaining: delay,
        });
        handle
    }

    pub fn update(&mut self, dt: Duration) {
        let mut still_pending = Vec::with_capacity(self.pending.len());
        for mut timer in self.pending.drain(..) {
            match timer.remaining.checked_sub(dt) {
                Some(remaining) if !remaining.is_zero() => {
                    timer.remaining = remaining;
                    still_pending.push(timer);
                }
                _ => self.fired.push(timer.handle),
            }
        }
        self.pending = still_pending;
    }

    /// True exactly once, on or after the frame the timer fired.
    pub fn poll(&mut self, handle: TimerHandle) -> bool {
        if let Some(idx) = self.fired.iter().position(|&h| h == handle) {
            self.fired.swap_remove(idx);
            true
        } else {
            false
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}
