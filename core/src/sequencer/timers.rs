//! Scheduled reveal timers
//!
//! A `ScheduledTimer` is one pending firing. Repeating timers are re-armed by
//! the sequencer after they fire, one period after their previous deadline,
//! so a host that wakes up late still sees every tick in order.
//!
//! # Lifecycle
//!
//! 1. `start_celebration` schedules the candle tick and the balloon phase start
//! 2. `advance_to(now)` pops every timer due at or before `now`
//! 3. The sequencer re-arms repeating timers or lets them lapse
//! 4. `dispose` clears the queue

use birthday_types::Millis;

/// Which reveal step a timer drives. At most one timer per key is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Phase A: light the next candle
    CandleTick,
    /// One-shot that arms the balloon tick
    BalloonPhaseStart,
    /// Phase B: pop the next balloon
    BalloonTick,
}

/// A pending timer firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub key: TimerKey,
    pub due_at: Millis,
    /// Re-arm period for repeating timers
    pub period: Option<Millis>,
    /// Scheduling order, breaks ties between equal deadlines
    seq: u64,
}

impl ScheduledTimer {
    /// Deadline of the next firing if this timer repeats
    pub fn next_due(&self) -> Option<Millis> {
        self.period.map(|period| self.due_at + period)
    }
}

/// Pending timers ordered by deadline, then scheduling order.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: Vec<ScheduledTimer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key`, replacing any pending timer with the same key.
    pub fn schedule(&mut self, key: TimerKey, due_at: Millis, period: Option<Millis>) {
        self.cancel(key);

        let timer = ScheduledTimer {
            key,
            due_at,
            period,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let pos = self
            .timers
            .binary_search_by(|t| (t.due_at, t.seq).cmp(&(timer.due_at, timer.seq)))
            .unwrap_or_else(|pos| pos);
        self.timers.insert(pos, timer);
    }

    /// Remove the pending timer for `key`. Returns true if one was pending.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let len_before = self.timers.len();
        self.timers.retain(|t| t.key != key);
        self.timers.len() != len_before
    }

    /// Pop the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<ScheduledTimer> {
        match self.timers.first() {
            Some(timer) if timer.due_at <= now => Some(self.timers.remove(0)),
            _ => None,
        }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.first().map(|t| t.due_at)
    }

    pub fn contains(&self, key: TimerKey) -> bool {
        self.timers.iter().any(|t| t.key == key)
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKey::BalloonTick, 1500, Some(500));
        queue.schedule(TimerKey::CandleTick, 500, Some(500));
        queue.schedule(TimerKey::BalloonPhaseStart, 1000, None);

        assert_eq!(queue.next_deadline(), Some(500));
        assert_eq!(queue.pop_due(2000).unwrap().key, TimerKey::CandleTick);
        assert_eq!(queue.pop_due(2000).unwrap().key, TimerKey::BalloonPhaseStart);
        assert_eq!(queue.pop_due(2000).unwrap().key, TimerKey::BalloonTick);
        assert!(queue.pop_due(2000).is_none());
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKey::BalloonPhaseStart, 2500, None);
        queue.schedule(TimerKey::CandleTick, 2500, Some(500));

        assert_eq!(queue.pop_due(2500).unwrap().key, TimerKey::BalloonPhaseStart);
        assert_eq!(queue.pop_due(2500).unwrap().key, TimerKey::CandleTick);
    }

    #[test]
    fn nothing_pops_before_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKey::CandleTick, 500, Some(500));

        assert!(queue.pop_due(499).is_none());
        assert_eq!(queue.len(), 1);
        assert!(queue.pop_due(500).is_some());
        assert!(queue.is_empty());
    }

    #[test]
    fn rescheduling_replaces_pending_timer() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKey::CandleTick, 500, Some(500));
        queue.schedule(TimerKey::CandleTick, 900, Some(500));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_deadline(), Some(900));
    }

    #[test]
    fn cancel_and_clear() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKey::CandleTick, 500, Some(500));
        queue.schedule(TimerKey::BalloonPhaseStart, 2500, None);

        assert!(queue.cancel(TimerKey::CandleTick));
        assert!(!queue.cancel(TimerKey::CandleTick));
        assert!(queue.contains(TimerKey::BalloonPhaseStart));

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn repeating_timer_reports_next_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKey::CandleTick, 500, Some(500));
        queue.schedule(TimerKey::BalloonPhaseStart, 2500, None);

        assert_eq!(queue.pop_due(500).unwrap().next_due(), Some(1000));
        assert_eq!(queue.pop_due(2500).unwrap().next_due(), None);
    }
}
