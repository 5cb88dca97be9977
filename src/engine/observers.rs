//! Explicit change subscriptions for re-render triggers.

use crate::gestures::DateRange;
use crate::models::task::Task;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineChange {
    /// The task snapshot was reloaded from the store.
    TasksChanged,
    /// Segments were recomputed.
    LayoutChanged,
    /// Highlighted cells changed; `None` once the selection ends.
    SelectionChanged(Option<DateRange>),
    DragPreview(Task),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&EngineChange)>;

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub(crate) fn emit(&mut self, change: EngineChange) {
        for (_, callback) in &mut self.callbacks {
            callback(&change);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }
}
