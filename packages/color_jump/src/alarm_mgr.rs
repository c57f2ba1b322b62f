//! Delayed events on the game clock.

use std::{
    collections::BinaryHeap,
    cmp::Ordering,
};


/// Something that can deliver an event after a delay.
pub trait Scheduler<T> {
    /// Deliver `event` once `delay` more seconds of game time have passed.
    fn schedule(&mut self, delay: f32, event: T);

    /// Forget every scheduled event.
    fn cancel_all(&mut self);
}


/// Scheduled event.
#[derive(Debug)]
struct Alarm<T> {
    fire_at: f32,
    seq: u64,
    event: T,
}

// ordered so the max-heap pops the earliest alarm, and the first scheduled among equals
impl<T> Ord for Alarm<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Alarm<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Alarm<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Alarm<T> {}


/// Game-clock alarm queue. An owned instance, advanced by the frame driver.
///
/// Time only passes while running. Events come back out of `update` rather than being run as
/// callbacks, so the owner can handle them with full access to its own state.
#[derive(Debug)]
pub struct AlarmMgr<T> {
    running: bool,
    elapsed: f32,
    next_seq: u64,
    alarms: BinaryHeap<Alarm<T>>,
}

impl<T> Default for AlarmMgr<T> {
    fn default() -> Self {
        AlarmMgr {
            running: true,
            elapsed: 0.0,
            next_seq: 0,
            alarms: BinaryHeap::new(),
        }
    }
}

impl<T> AlarmMgr<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds of game time passed while running.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Number of alarms not yet fired.
    pub fn pending(&self) -> usize {
        self.alarms.len()
    }

    /// Advance the clock by `dt` if running, and return the events of every alarm now strictly in
    /// the past, earliest first.
    pub fn update(&mut self, dt: f32) -> Vec<T> {
        let mut fired = Vec::new();
        if !self.running {
            return fired;
        }

        self.elapsed += dt;
        while self.alarms
            .peek()
            .map(|alarm| alarm.fire_at < self.elapsed)
            .unwrap_or(false)
        {
            if let Some(alarm) = self.alarms.pop() {
                fired.push(alarm.event);
            }
        }
        fired
    }
}

impl<T> Scheduler<T> for AlarmMgr<T> {
    fn schedule(&mut self, delay: f32, event: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.alarms.push(Alarm {
            fire_at: self.elapsed + delay,
            seq,
            event,
        });
    }

    fn cancel_all(&mut self) {
        if !self.alarms.is_empty() {
            debug!(count = self.alarms.len(), "cancelling alarms");
        }
        self.alarms.clear();
    }
}


#[test]
fn test_alarms_fire_in_order() {
    let mut alarms = AlarmMgr::new();
    alarms.schedule(2.0, "c");
    alarms.schedule(1.0, "a");
    alarms.schedule(1.0, "b");
    assert_eq!(alarms.update(0.5), Vec::<&str>::new());
    assert_eq!(alarms.update(0.75), vec!["a", "b"]);
    assert_eq!(alarms.pending(), 1);
    assert_eq!(alarms.update(1.0), vec!["c"]);
    assert_eq!(alarms.pending(), 0);
}

#[test]
fn test_alarm_fires_strictly_after() {
    let mut alarms = AlarmMgr::new();
    alarms.schedule(1.0, ());
    assert!(alarms.update(1.0).is_empty());
    assert_eq!(alarms.update(0.01).len(), 1);
}

#[test]
fn test_alarms_paused() {
    let mut alarms = AlarmMgr::new();
    alarms.schedule(0.5, 7);
    alarms.set_running(false);
    assert!(alarms.update(10.0).is_empty());
    assert_eq!(alarms.elapsed(), 0.0);
    alarms.set_running(true);
    assert_eq!(alarms.update(1.0), vec![7]);
}

#[test]
fn test_alarms_cancel_all() {
    let mut alarms = AlarmMgr::new();
    alarms.schedule(0.1, 1);
    alarms.schedule(0.2, 2);
    alarms.cancel_all();
    assert!(alarms.update(1.0).is_empty());
    // scheduling is relative to the current clock
    alarms.schedule(0.1, 3);
    assert!(alarms.update(0.05).is_empty());
    assert_eq!(alarms.update(0.1), vec![3]);
}
