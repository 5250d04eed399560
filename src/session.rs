// ============================================================================
// EDIT SESSION — current image + operation dispatch + history wiring
// ============================================================================
//
// One session edits one image. `apply` follows a single canonical rule:
// validate and compute the result first, then push exactly one pre-operation
// snapshot, clear the redo stack, and install the result. A failing
// operation therefore leaves the session byte-for-byte unchanged.

use crate::history::{HistoryError, HistoryManager};
use crate::log_info;
use crate::ops::{OpError, Operation};
use crate::raster::RasterImage;

pub struct EditSession {
    current: RasterImage,
    history: HistoryManager,
}

impl EditSession {
    /// Start a session on a freshly-decoded image with unbounded history.
    pub fn new(image: RasterImage) -> Self {
        Self::with_limits(image, None, None)
    }

    /// Start a session with optional history caps (entries / snapshot bytes).
    pub fn with_limits(
        image: RasterImage,
        max_history_depth: Option<usize>,
        max_history_bytes: Option<usize>,
    ) -> Self {
        let mut history = HistoryManager::new(max_history_depth, max_history_bytes);
        history.load(image.clone());
        Self { current: image, history }
    }

    /// Replace the session contents with a newly-loaded image, discarding
    /// all history.
    pub fn load(&mut self, image: RasterImage) {
        self.history.load(image.clone());
        self.current = image;
    }

    /// Apply one operation. On success the pre-operation state becomes the
    /// newest undo entry and the redo stack is cleared; on error nothing
    /// changes.
    pub fn apply(&mut self, op: &Operation) -> Result<&RasterImage, OpError> {
        let next = op.apply(&self.current)?;
        self.history.record(self.current.clone(), op.description());
        log_info!("applied {} -> {}x{}", op.description(), next.width(), next.height());
        self.current = next;
        Ok(&self.current)
    }

    /// Step back one edit. The base (loaded) state is never undone away.
    pub fn undo(&mut self) -> Result<&RasterImage, HistoryError> {
        let restored = self.history.undo(&self.current)?;
        log_info!("undo -> {}x{}", restored.width(), restored.height());
        self.current = restored;
        Ok(&self.current)
    }

    /// Step forward one previously-undone edit.
    pub fn redo(&mut self) -> Result<&RasterImage, HistoryError> {
        let restored = self.history.redo(&self.current)?;
        log_info!("redo -> {}x{}", restored.width(), restored.height());
        self.current = restored;
        Ok(&self.current)
    }

    /// Jump back to the oldest retained state. Recorded as a regular edit,
    /// so it is itself undoable and invalidates the redo stack.
    pub fn reset_to_original(&mut self) -> &RasterImage {
        let Some(base) = self.history.base().cloned() else {
            return &self.current;
        };
        self.history.record(self.current.clone(), "Original".to_string());
        self.current = base;
        &self.current
    }

    /// The image as it stands now, for display or export.
    pub fn current(&self) -> &RasterImage {
        &self.current
    }

    /// Read access to the undo/redo bookkeeping (counts, labels, memory).
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Labels of recorded edits, most recent first.
    pub fn history_labels(&self) -> Vec<String> {
        self.history.labels()
    }
}
