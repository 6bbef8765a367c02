//! Virtual-time timer service.
//!
//! Components never sleep or spawn. They ask the scheduler to run a [`Task`]
//! later and keep the returned [`TimerHandle`] if they may need to cancel it.
//! The host moves time forward with [`Scheduler::pop_due`], which hands back
//! due tasks in deadline order (ties in scheduling order) and advances the
//! clock to each one as it goes, so a task scheduled from inside another
//! task's callback still runs in the same pass when its deadline allows.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::document::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Deferred component actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    CarouselAdvance,
    SpawnParticle(usize),
    RemoveParticle(ElementId),
    RevealLogo,
    RelocateLogo,
    RevealNavLinks,
    RevealNavLink(ElementId),
    RevealHero,
    RevealTrophyTexts,
}

#[derive(Debug)]
struct Timer {
    due: u64,
    period: Option<u64>,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_id: u64,
    seq: u64,
    queue: BinaryHeap<Reverse<(u64, u64, u64)>>, // (due, seq, id)
    timers: HashMap<u64, Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now
    }

    /// Runs `task` once, `delay_ms` from now.
    pub fn after(&mut self, delay_ms: u64, task: Task) -> TimerHandle {
        self.insert(self.now + delay_ms, None, task)
    }

    /// Runs `task` every `period_ms`, first at `now + period_ms`.
    pub fn every(&mut self, period_ms: u64, task: Task) -> TimerHandle {
        let period = period_ms.max(1);
        self.insert(self.now + period, Some(period), task)
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle.0).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
        self.queue.clear();
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle.0)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.timers.values().map(|t| t.due).min()
    }

    /// Pops the earliest timer due at or before `until_ms`, moving the clock to
    /// its deadline. Recurring timers are re-armed before they are returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerHandle, Task)> {
        self.skip_cancelled();
        let Reverse((due, _, id)) = *self.queue.peek()?;
        if due > until_ms {
            return None;
        }
        self.queue.pop();
        self.now = self.now.max(due);

        let timer = self.timers.remove(&id)?;
        let task = match timer.period {
            Some(period) => {
                let task = timer.task.clone();
                self.seq += 1;
                self.queue.push(Reverse((due + period, self.seq, id)));
                self.timers.insert(id, Timer { due: due + period, ..timer });
                task
            }
            None => timer.task,
        };
        Some((TimerHandle(id), task))
    }

    /// Moves the clock forward without running anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now = self.now.max(now_ms);
    }

    fn insert(&mut self, due: u64, period: Option<u64>, task: Task) -> TimerHandle {
        self.next_id += 1;
        self.seq += 1;
        let id = self.next_id;
        self.queue.push(Reverse((due, self.seq, id)));
        self.timers.insert(id, Timer { due, period, task });
        TimerHandle(id)
    }

    fn skip_cancelled(&mut self) {
        while let Some(Reverse((due, _, id))) = self.queue.peek() {
            match self.timers.get(id) {
                Some(timer) if timer.due == *due => break,
                _ => {
                    self.queue.pop();
                }
            }
        }
    }
}
