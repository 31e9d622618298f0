//! Bounded snapshot undo/redo history.
//!
//! Every mutation of a spawn document records the placement list as it was
//! before the change, together with a label for menu text. Undo swaps the
//! current list for the recorded one and keeps the current list for redo.

use std::collections::VecDeque;

use spawn_format::SpawnPlacement;

use super::HistoryError;

/// A full copy of a document's placements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub label: String,
    pub placements: Vec<SpawnPlacement>,
}

/// Undo/redo history stack.
#[derive(Clone, Debug)]
pub struct UndoHistory {
    /// States that can be restored by undo, oldest first
    undo_stack: VecDeque<Snapshot>,
    /// States that can be restored by redo
    redo_stack: Vec<Snapshot>,
    /// Maximum undo depth
    max_size: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoHistory {
    /// Default maximum history size.
    pub const DEFAULT_MAX_SIZE: usize = 20;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_SIZE)
    }

    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    /// Check if there are states to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if there are states to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label of the next undo step.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|s| s.label.as_str())
    }

    /// Label of the next redo step.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|s| s.label.as_str())
    }

    /// Record the state before a mutation.
    pub fn record(&mut self, placements: Vec<SpawnPlacement>, label: impl Into<String>) {
        self.undo_stack.push_back(Snapshot {
            label: label.into(),
            placements,
        });
        self.redo_stack.clear();

        // Trim if over limit
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
    }

    /// Step back: `current` is replaced by the recorded state and the
    /// replaced list is kept for redo. Returns the step label.
    pub fn undo(&mut self, current: &mut Vec<SpawnPlacement>) -> Result<String, HistoryError> {
        let snapshot = self.undo_stack.pop_back().ok_or(HistoryError::NothingToUndo)?;
        let replaced = std::mem::replace(current, snapshot.placements);
        self.redo_stack.push(Snapshot {
            label: snapshot.label.clone(),
            placements: replaced,
        });
        Ok(snapshot.label)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: &mut Vec<SpawnPlacement>) -> Result<String, HistoryError> {
        let snapshot = self.redo_stack.pop().ok_or(HistoryError::NothingToRedo)?;
        let replaced = std::mem::replace(current, snapshot.placements);
        self.undo_stack.push_back(Snapshot {
            label: snapshot.label.clone(),
            placements: replaced,
        });
        Ok(snapshot.label)
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get the number of states in the undo stack.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of states in the redo stack.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spawn_format::{GridPoint, MonsterKind};

    fn state(n: u8) -> Vec<SpawnPlacement> {
        (0..n)
            .map(|i| SpawnPlacement::point(7, 0, GridPoint::new(i, i), MonsterKind::Creature))
            .collect()
    }

    #[test]
    fn test_history_basic() {
        let mut history = UndoHistory::new();

        assert!(!history.can_undo());
        assert!(!history.can_redo());

        history.record(state(0), "Add Spider");

        assert!(history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_description(), Some("Add Spider"));
    }

    #[test]
    fn test_history_undo_redo() {
        let mut history = UndoHistory::new();

        history.record(state(0), "Add A");
        history.record(state(1), "Add B");

        let mut current = state(2);
        assert_eq!(history.undo(&mut current).unwrap(), "Add B");
        assert_eq!(current, state(1));
        assert_eq!(history.redo_description(), Some("Add B"));

        assert_eq!(history.redo(&mut current).unwrap(), "Add B");
        assert_eq!(current, state(2));
        assert_eq!(history.undo_count(), 2);
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = UndoHistory::new();
        let mut current = state(1);
        history.record(state(0), "Add A");
        history.undo(&mut current).unwrap();
        assert!(history.can_redo());

        history.record(state(0), "Add C");
        assert!(!history.can_redo());
        assert_eq!(history.redo(&mut current), Err(HistoryError::NothingToRedo));
        assert_eq!(current, state(0));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = UndoHistory::new();
        for i in 0..21 {
            history.record(state(i), format!("Step {}", i));
        }
        assert_eq!(history.undo_count(), 20);

        let mut current = state(21);
        for _ in 0..20 {
            history.undo(&mut current).unwrap();
        }
        // The oldest record was evicted
        assert_eq!(current, state(1));
        assert_eq!(history.undo(&mut current), Err(HistoryError::NothingToUndo));
        assert_eq!(current, state(1));
    }
}
