//! Single-slot queue for work that must wait for the current layout pass
//!
//! Each controller-initiated mutation advances the generation. A task only
//! runs if no other mutation happened between scheduling and draining, so a
//! stale continuation can never overwrite newer geometry.

use flixdesk_core::types::Bounds;

/// Continuation run after the window finished its state transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingTask {
    /// Start the native drag-move loop
    BeginDrag,
    /// Move/resize the window once it left the maximized or fullscreen layout
    ApplyBounds(Bounds),
}

#[derive(Debug, Default)]
pub struct DeferredSlot {
    generation: u64,
    pending: Option<(u64, PendingTask)>,
}

impl DeferredSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a new mutation; anything scheduled before it is now stale
    pub fn advance(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Queue `task` for the current generation, replacing any queued task
    pub fn schedule(&mut self, task: PendingTask) {
        if let Some((_, previous)) = self.pending.replace((self.generation, task)) {
            log::debug!("Deferred {:?} replaced by {:?}", previous, task);
        }
    }

    /// Take the queued task if it is still current. Stale tasks are dropped.
    pub fn take_current(&mut self) -> Option<PendingTask> {
        match self.pending.take() {
            Some((generation, task)) if generation == self.generation => Some(task),
            Some((generation, task)) => {
                log::debug!(
                    "Dropping superseded {:?} (generation {} < {})",
                    task,
                    generation,
                    self.generation
                );
                None
            }
            None => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_task_runs_once() {
        let mut slot = DeferredSlot::new();
        slot.advance();
        slot.schedule(PendingTask::BeginDrag);
        assert!(slot.is_pending());
        assert_eq!(slot.take_current(), Some(PendingTask::BeginDrag));
        assert_eq!(slot.take_current(), None);
    }

    #[test]
    fn test_later_mutation_supersedes_task() {
        let mut slot = DeferredSlot::new();
        slot.advance();
        slot.schedule(PendingTask::ApplyBounds(Bounds::new(0.0, 0.0, 10.0, 10.0)));
        slot.advance();
        assert_eq!(slot.take_current(), None);
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_last_write_wins_within_generation() {
        let mut slot = DeferredSlot::new();
        slot.advance();
        slot.schedule(PendingTask::BeginDrag);
        let bounds = Bounds::new(1.0, 2.0, 3.0, 4.0);
        slot.schedule(PendingTask::ApplyBounds(bounds));
        assert_eq!(slot.take_current(), Some(PendingTask::ApplyBounds(bounds)));
    }
}
