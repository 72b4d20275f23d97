/// Identifier for a scheduled timer, unique for the lifetime of a [`Timers`] queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    id: TimerId,
    due: u64,
}

/// Deterministic single-threaded timer queue on a logical clock.
///
/// Stands in for the host event loop's `setTimeout`/`clearTimeout` pair: the
/// owner schedules and cancels timers, and the driving loop advances the
/// clock explicitly. One time unit corresponds to one millisecond in a real
/// host.
#[derive(Debug, Default)]
pub struct Timers {
    now: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedules a timer to fire `delay` units from now.
    pub fn schedule(&mut self, delay: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now + delay,
        });
        id
    }

    /// Cancels a pending timer. Cancelling an already-fired or unknown id is a no-op.
    pub fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|p| p.id != id);
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Number of timers that have been scheduled but not yet fired or cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Advances the clock by `dt` units and returns every timer that came due,
    /// ordered by due time (ties break by scheduling order).
    pub fn advance(&mut self, dt: u64) -> Vec<TimerId> {
        self.now += dt;
        let now = self.now;

        let mut fired = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                fired.push(*p);
                false
            } else {
                true
            }
        });
        fired.sort_by_key(|p| (p.due, p.id.0));
        fired.into_iter().map(|p| p.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_after_delay() {
        let mut timers = Timers::new();
        let id = timers.schedule(200);
        assert!(timers.is_pending(id));

        assert!(timers.advance(199).is_empty());
        assert_eq!(timers.advance(1), vec![id]);
        assert!(!timers.is_pending(id));
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut timers = Timers::new();
        let id = timers.schedule(0);
        assert_eq!(timers.advance(0), vec![id]);
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut timers = Timers::new();
        let id = timers.schedule(100);
        timers.cancel(id);
        assert!(timers.advance(100).is_empty());
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn cancel_of_fired_timer_is_noop() {
        let mut timers = Timers::new();
        let id = timers.schedule(10);
        timers.advance(10);
        timers.cancel(id);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn fires_in_due_order() {
        let mut timers = Timers::new();
        let late = timers.schedule(300);
        let early = timers.schedule(100);
        let mid = timers.schedule(200);

        assert_eq!(timers.advance(300), vec![early, mid, late]);
    }

    #[test]
    fn cancel_and_reschedule_yields_single_fire() {
        // The debounce pattern: each new event cancels the pending timer
        // and schedules a replacement.
        let mut timers = Timers::new();
        let mut pending = None;
        for _ in 0..5 {
            if let Some(id) = pending.take() {
                timers.cancel(id);
            }
            pending = Some(timers.schedule(200));
            timers.advance(10);
        }

        let fired = timers.advance(200);
        assert_eq!(fired.len(), 1);
        assert_eq!(Some(fired[0]), pending);
    }

    #[test]
    fn clock_accumulates_across_advances() {
        let mut timers = Timers::new();
        timers.advance(50);
        timers.advance(25);
        assert_eq!(timers.now(), 75);

        let id = timers.schedule(10);
        assert!(timers.advance(9).is_empty());
        assert_eq!(timers.advance(1), vec![id]);
    }
}
