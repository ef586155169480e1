//! Single-threaded timer queue on a virtual millisecond clock.
//!
//! Tasks fire in due-time order, ties in scheduling order. Repeating chains
//! are not re-armed automatically: the handler calls `renew` when its stop
//! condition allows, so a chain ends simply by not being renewed.
//!
//! Every entry is stamped with the generation it was scheduled in.
//! `start_generation` invalidates everything pending, which keeps chains from
//! an earlier session from running alongside the ones installed by a restart.

use crate::surface::ShapeHandle;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Work the controller performs when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    SpawnDroplet,
    MoveDroplets,
    PollInput,
    DeleteShape(ShapeHandle),
}

/// A task that has come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub task: TimerTask,
    pub due_ms: u64,
    interval_ms: Option<u64>,
    generation: u64,
}

#[derive(Debug)]
struct Entry {
    due_ms: u64,
    seq: u64,
    generation: u64,
    interval_ms: Option<u64>,
    task: TimerTask,
}

// Min-heap on (due_ms, seq)
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl Eq for Entry {}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    generation: u64,
    queue: BinaryHeap<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `task` once, `delay_ms` from now.
    pub fn after(&mut self, delay_ms: u64, task: TimerTask) {
        self.push(self.now_ms + delay_ms, None, task);
    }

    /// Start a repeating chain. The first firing is due immediately.
    pub fn every(&mut self, interval_ms: u64, task: TimerTask) {
        self.push(self.now_ms, Some(interval_ms), task);
    }

    /// Re-arm a fired repeating task one interval after its due time.
    ///
    /// Returns false for one-shot tasks and for chains from an old generation.
    pub fn renew(&mut self, fired: &Fired) -> bool {
        match fired.interval_ms {
            Some(interval) if fired.generation == self.generation => {
                self.push(fired.due_ms + interval, Some(interval), fired.task);
                true
            }
            _ => false,
        }
    }

    /// Invalidate every pending task and return the new generation.
    pub fn start_generation(&mut self) -> u64 {
        self.generation += 1;
        self.queue.clear();
        self.generation
    }

    /// Move the clock forward.
    pub fn advance(&mut self, dt_ms: u64) {
        self.now_ms += dt_ms;
    }

    /// Next task due at or before the current time.
    pub fn pop_due(&mut self) -> Option<Fired> {
        while let Some(entry) = self.queue.peek() {
            if entry.due_ms > self.now_ms {
                return None;
            }
            let entry = self.queue.pop()?;
            if entry.generation != self.generation {
                continue;
            }
            return Some(Fired {
                task: entry.task,
                due_ms: entry.due_ms,
                interval_ms: entry.interval_ms,
                generation: entry.generation,
            });
        }
        None
    }

    /// Number of pending tasks of the current generation.
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|e| e.generation == self.generation)
            .count()
    }

    /// Whether `task` is pending in the current generation.
    pub fn is_scheduled(&self, task: TimerTask) -> bool {
        self.queue
            .iter()
            .any(|e| e.generation == self.generation && e.task == task)
    }

    fn push(&mut self, due_ms: u64, interval_ms: Option<u64>, task: TimerTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due_ms,
            seq,
            generation: self.generation,
            interval_ms,
            task,
        });
    }
}
