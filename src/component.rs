use crate::document::{Document, ElementId};
use crate::scheduler::{Scheduler, Task, TimerHandle};

/// Page events delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Click(ElementId),
    /// A CSS transition on `target` finished for `property`.
    TransitionEnd { target: ElementId, property: String },
    /// `target`'s visible fraction changed to `ratio` (0.0 to 1.0).
    Intersection { target: ElementId, ratio: f32 },
}

/// What a component gets to touch while it handles something.
pub struct Context<'a, D: Document> {
    pub doc: &'a mut D,
    pub timers: &'a mut Scheduler,
}

impl<'a, D: Document> Context<'a, D> {
    pub fn new(doc: &'a mut D, timers: &'a mut Scheduler) -> Self {
        Self { doc, timers }
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }
}

pub trait Component<D: Document> {
    fn name(&self) -> &'static str;

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_, D>);

    /// Called for every fired timer; components ignore tasks they did not schedule.
    fn on_timer(&mut self, timer: TimerHandle, task: &Task, cx: &mut Context<'_, D>);

    /// Cancels anything still pending.
    fn teardown(&mut self, _cx: &mut Context<'_, D>) {}
}
