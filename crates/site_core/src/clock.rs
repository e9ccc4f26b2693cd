//! Deterministic virtual clock for driving timer-based state machines without a browser.
//!
//! Hosts arm one-shot and repeating timers that carry a payload event; advancing the clock fires
//! due timers strictly in `(due time, arm order)` order and hands each payload to a handler that
//! may arm or cancel further timers before the next one fires.

use std::time::Duration;

/// Handle identifying one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    due: Duration,
    every: Option<Duration>,
    event: T,
}

/// Virtual timer queue measured from a zero origin.
#[derive(Debug, Clone)]
pub struct ManualClock<T> {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for ManualClock<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<T: Clone> ManualClock<T> {
    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still armed.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Arms a one-shot timer firing `event` after `delay`.
    pub fn set_timeout(&mut self, delay: Duration, event: T) -> TimerId {
        self.arm(delay, None, event)
    }

    /// Arms a repeating timer firing `event` every `interval` (first fire one interval from now).
    ///
    /// A zero interval is bumped to one millisecond so the queue always makes progress.
    pub fn set_interval(&mut self, interval: Duration, event: T) -> TimerId {
        let interval = interval.max(Duration::from_millis(1));
        self.arm(interval, Some(interval), event)
    }

    /// Cancels a timer. Unknown or already-fired one-shot ids are ignored.
    pub fn clear(&mut self, id: TimerId) {
        self.timers.retain(|timer| timer.id != id);
    }

    /// Advances time by `by`, firing every timer that comes due on the way.
    ///
    /// `on_fire` runs once per fire with the clock already moved to the fire time.
    pub fn advance(&mut self, by: Duration, mut on_fire: impl FnMut(&mut Self, T)) {
        let deadline = self.now + by;
        while let Some(event) = self.pop_due(deadline) {
            on_fire(self, event);
        }
        self.now = deadline;
    }

    fn arm(&mut self, delay: Duration, every: Option<Duration>, event: T) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer {
            id,
            due: self.now + delay,
            every,
            event,
        });
        id
    }

    fn pop_due(&mut self, deadline: Duration) -> Option<T> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= deadline)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)?;

        let due = self.timers[index].due;
        self.now = due;
        match self.timers[index].every {
            Some(every) => {
                let timer = &mut self.timers[index];
                timer.due = due + every;
                Some(timer.event.clone())
            }
            None => Some(self.timers.swap_remove(index).event),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fires_in_due_then_arm_order() {
        let mut clock = ManualClock::default();
        clock.set_timeout(ms(500), "late");
        clock.set_interval(ms(250), "tick");
        clock.set_timeout(ms(250), "early");

        let mut fired = Vec::new();
        clock.advance(ms(500), |clock, event| fired.push((clock.now(), event)));

        assert_eq!(
            fired,
            vec![
                (ms(250), "tick"),
                (ms(250), "early"),
                (ms(500), "late"),
                (ms(500), "tick"),
            ]
        );
        assert_eq!(clock.pending(), 1);
        assert_eq!(clock.now(), ms(500));
    }

    #[test]
    fn handler_can_cancel_remaining_timers() {
        let mut clock = ManualClock::default();
        let tick = clock.set_interval(ms(100), "tick");

        let mut fired = 0;
        clock.advance(ms(1_000), |clock, _| {
            fired += 1;
            if fired == 3 {
                clock.clear(tick);
            }
        });

        assert_eq!(fired, 3);
        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.now(), ms(1_000));
    }
}
