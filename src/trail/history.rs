use std::collections::VecDeque;

use crate::trail::pose::PoseSnapshot;

/// Fixed-capacity pose buffer, newest first.
///
/// Pushing at capacity evicts the oldest snapshot, so memory stays bounded no
/// matter how long the stage runs.
#[derive(Debug, Clone)]
pub struct PoseHistory {
    entries: VecDeque<PoseSnapshot>,
    capacity: usize,
}

impl PoseHistory {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Inserts `snapshot` as the newest entry.
    pub fn push(&mut self, snapshot: PoseSnapshot) {
        self.entries.push_front(snapshot);
        self.entries.truncate(self.capacity);
    }

    /// Snapshot at `index`, where 0 is the newest.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PoseSnapshot> {
        self.entries.get(index)
    }

    #[inline]
    #[must_use]
    pub fn newest(&self) -> Option<&PoseSnapshot> {
        self.entries.front()
    }

    #[inline]
    #[must_use]
    pub fn oldest(&self) -> Option<&PoseSnapshot> {
        self.entries.back()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &PoseSnapshot> {
        self.entries.iter()
    }
}
