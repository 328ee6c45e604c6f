// Undo/redo over whole-canvas snapshots.

use std::collections::VecDeque;
use std::mem;

use crate::surface::DrawingSurface;

pub const HISTORY_CAPACITY: usize = 20;

/// LIFO stack with a fixed capacity. Pushing onto a full stack evicts the
/// *oldest* entry (the bottom), so the newest `capacity` pushes are kept.
///
/// Backed by a `VecDeque` ring buffer: push/pop at the back, evict at the front.
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { items: VecDeque::with_capacity(capacity), capacity }
    }

    /// Push `item`, returning the evicted bottom entry if the stack was full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    #[cfg(test)]
    pub fn peek(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Two bounded stacks of full surface copies.
///
/// The redo stack is only ever drained by `redo`; new snapshots leave it
/// untouched, so after undo + new stroke the old redo states stay reachable.
pub struct HistoryManager {
    undo: BoundedStack<DrawingSurface>,
    redo: BoundedStack<DrawingSurface>,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl HistoryManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: BoundedStack::new(capacity),
            redo: BoundedStack::new(capacity),
        }
    }

    /// Record `surface` as it is right now. Called once per stroke (at its
    /// start) and once per clear.
    pub fn snapshot_before_change(&mut self, surface: &DrawingSurface) {
        if self.undo.push(surface.clone()).is_some() {
            log::debug!("undo history full, dropped oldest snapshot");
        }
    }

    /// Swap the newest undo snapshot in as the live surface; the replaced
    /// surface goes onto the redo stack. Returns false (and does nothing)
    /// when there is nothing to undo.
    pub fn undo(&mut self, surface: &mut DrawingSurface) -> bool {
        let Some(previous) = self.undo.pop() else {
            return false;
        };
        self.redo.push(mem::replace(surface, previous));
        true
    }

    pub fn redo(&mut self, surface: &mut DrawingSurface) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push(mem::replace(surface, next));
        true
    }

    /// Snapshot, then wipe `surface` to fully transparent.
    pub fn clear_and_snapshot(&mut self, surface: &mut DrawingSurface) {
        self.snapshot_before_change(surface);
        surface.clear();
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}
