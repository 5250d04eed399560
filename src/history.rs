// ============================================================================
// HISTORY MANAGER — bounded undo/redo stacks of image snapshots
// ============================================================================
//
// Two stacks of deep-copied RasterImage snapshots. The undo stack holds the
// base state plus the pre-operation state of every recorded edit
// (most-recent-last); the redo stack is invalidated by any fresh edit.
// Optional depth and byte caps evict the oldest undo entries, never below
// one. A running byte total keeps the accounting O(1).

use std::collections::VecDeque;

use thiserror::Error;

use crate::raster::RasterImage;

/// Non-fatal stepping failures. State is unchanged when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// A recorded state: the snapshot plus the label of the operation that was
/// applied from it ("Load" for the base entry).
struct Snapshot {
    image: RasterImage,
    label: String,
}

pub struct HistoryManager {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: VecDeque<Snapshot>,
    /// Maximum number of undo entries kept; `None` = unlimited.
    max_depth: Option<usize>,
    /// Byte cap across both stacks; `None` = unlimited.
    max_bytes: Option<usize>,
    /// Running pixel-buffer total across both stacks.
    total_bytes: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl HistoryManager {
    pub fn new(max_depth: Option<usize>, max_bytes: Option<usize>) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth,
            max_bytes,
            total_bytes: 0,
        }
    }

    /// Reset to a freshly-loaded state: both stacks cleared, `base` becomes
    /// the sole undo entry.
    pub fn load(&mut self, base: RasterImage) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.total_bytes = base.memory_bytes();
        self.undo_stack.push_back(Snapshot { image: base, label: "Load".to_string() });
    }

    /// Record the pre-operation state of a successful edit. Clears the redo
    /// stack and prunes to the configured caps.
    pub fn record(&mut self, pre_state: RasterImage, label: String) {
        for snap in self.redo_stack.drain(..) {
            self.total_bytes = self.total_bytes.saturating_sub(snap.image.memory_bytes());
        }
        self.total_bytes += pre_state.memory_bytes();
        self.undo_stack.push_back(Snapshot { image: pre_state, label });
        self.prune();
    }

    /// Step backward. `current` is parked on the redo stack; the popped
    /// entry — the state the most recent edit was applied from — is returned
    /// as the new current. Fails while only the base entry remains, so the
    /// original state is never popped away.
    pub fn undo(&mut self, current: &RasterImage) -> Result<RasterImage, HistoryError> {
        if self.undo_stack.len() <= 1 {
            return Err(HistoryError::NothingToUndo);
        }
        let Some(popped) = self.undo_stack.pop_back() else {
            return Err(HistoryError::NothingToUndo);
        };
        self.total_bytes = self.total_bytes.saturating_sub(popped.image.memory_bytes());

        // The popped entry carries the label of the edit that produced
        // `current`; it travels with the parked state so a later redo
        // restores the same label.
        self.total_bytes += current.memory_bytes();
        self.redo_stack.push_back(Snapshot { image: current.clone(), label: popped.label });

        Ok(popped.image)
    }

    /// Step forward after an undo. `current` is parked back on the undo
    /// stack and the parked redo state is returned as the new current.
    pub fn redo(&mut self, current: &RasterImage) -> Result<RasterImage, HistoryError> {
        let Some(snap) = self.redo_stack.pop_back() else {
            return Err(HistoryError::NothingToRedo);
        };
        self.total_bytes = self.total_bytes.saturating_sub(snap.image.memory_bytes());

        self.total_bytes += current.memory_bytes();
        self.undo_stack.push_back(Snapshot { image: current.clone(), label: snap.label });

        Ok(snap.image)
    }

    /// The oldest retained state (the loaded image, unless eviction dropped it).
    pub fn base(&self) -> Option<&RasterImage> {
        self.undo_stack.front().map(|s| &s.image)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Labels of recorded edits, most recent first.
    pub fn labels(&self) -> Vec<String> {
        self.undo_stack.iter().rev().map(|s| s.label.clone()).collect()
    }

    /// Snapshot bytes held across both stacks (O(1) via the cached total).
    pub fn memory_usage(&self) -> usize {
        self.total_bytes
    }

    /// Evict oldest undo entries beyond the caps. The last remaining entry
    /// is never evicted, so a base state always survives.
    fn prune(&mut self) {
        if let Some(max_depth) = self.max_depth {
            while self.undo_stack.len() > max_depth.max(1) {
                if let Some(evicted) = self.undo_stack.pop_front() {
                    self.total_bytes =
                        self.total_bytes.saturating_sub(evicted.image.memory_bytes());
                }
            }
        }
        if let Some(max_bytes) = self.max_bytes {
            while self.total_bytes > max_bytes && self.undo_stack.len() > 1 {
                if let Some(evicted) = self.undo_stack.pop_front() {
                    self.total_bytes =
                        self.total_bytes.saturating_sub(evicted.image.memory_bytes());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Bgra;

    fn shade(v: u8) -> RasterImage {
        RasterImage::from_pixel(2, 2, Bgra::new(v, v, v, 255)).unwrap()
    }

    #[test]
    fn fresh_load_has_nothing_to_undo() {
        let mut history = HistoryManager::default();
        history.load(shade(0));
        assert_eq!(history.undo_len(), 1);
        assert!(!history.can_undo());
        assert_eq!(history.undo(&shade(0)).unwrap_err(), HistoryError::NothingToUndo);
        assert_eq!(history.redo(&shade(0)).unwrap_err(), HistoryError::NothingToRedo);
    }

    #[test]
    fn record_grows_undo_and_clears_redo() {
        let mut history = HistoryManager::default();
        history.load(shade(0));
        history.record(shade(0), "Invert".into());
        history.record(shade(1), "Sepia".into());
        assert_eq!(history.undo_len(), 3);

        let restored = history.undo(&shade(2)).unwrap();
        assert_eq!(restored, shade(1));
        assert_eq!(history.redo_len(), 1);

        // A fresh edit invalidates the redo entry.
        history.record(shade(1), "Comic".into());
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn undo_then_redo_round_trips() {
        let mut history = HistoryManager::default();
        history.load(shade(0));
        history.record(shade(0), "Invert".into());

        let restored = history.undo(&shade(9)).unwrap();
        assert_eq!(restored, shade(0));
        let redone = history.redo(&restored).unwrap();
        assert_eq!(redone, shade(9));

        // And the redone state can be undone again.
        let restored = history.undo(&shade(9)).unwrap();
        assert_eq!(restored, shade(0));
    }

    #[test]
    fn depth_cap_evicts_oldest_but_keeps_a_base() {
        let mut history = HistoryManager::new(Some(2), None);
        history.load(shade(0));
        history.record(shade(0), "A".into());
        history.record(shade(1), "B".into());
        history.record(shade(2), "C".into());
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.base().unwrap(), &shade(1));

        let mut tight = HistoryManager::new(Some(0), None);
        tight.load(shade(0));
        tight.record(shade(0), "A".into());
        assert_eq!(tight.undo_len(), 1);
    }

    #[test]
    fn byte_cap_evicts_and_accounting_tracks_stacks() {
        let snapshot_bytes = shade(0).memory_bytes();
        let mut history = HistoryManager::new(None, Some(snapshot_bytes * 2));
        history.load(shade(0));
        assert_eq!(history.memory_usage(), snapshot_bytes);
        history.record(shade(0), "A".into());
        history.record(shade(1), "B".into());
        // Third snapshot would exceed 2x; the oldest goes.
        assert_eq!(history.undo_len(), 2);
        assert!(history.memory_usage() <= snapshot_bytes * 2);
    }

    #[test]
    fn labels_are_most_recent_first() {
        let mut history = HistoryManager::default();
        history.load(shade(0));
        history.record(shade(0), "Invert".into());
        history.record(shade(1), "Crop 2x2 at (0, 0)".into());
        assert_eq!(history.labels(), vec!["Crop 2x2 at (0, 0)", "Invert", "Load"]);
    }
}
