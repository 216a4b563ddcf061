use thiserror::Error;

/// Default bound on each snapshot stack. `0` means unbounded.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// Undo or redo was requested with nothing to restore. A reported no-op,
    /// never fatal; callers gate UI with `can_undo`/`can_redo` but may also
    /// call the operations directly.
    #[error("no history to restore")]
    NoHistory,
}

/// Coalesced edit history: two stacks of whole-buffer snapshots.
///
/// Snapshots are pushed by [`History::capture`], which the session calls once
/// a debounce window closes, so a burst of keystrokes costs one entry. Any
/// new capture invalidates the redo branch.
///
/// `capture_enabled` is the suppression flag for programmatic buffer
/// replacement: undo and redo clear it so their own output is not recaptured
/// as a fresh edit, and the session sets it again on the next user edit.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
    capture_enabled: bool,
    max_depth: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// `max_depth` bounds each stack; the oldest snapshot is evicted when an
    /// insertion would exceed it. `0` disables the bound.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            capture_enabled: true,
            max_depth,
        }
    }

    /// Push a snapshot of `buffer` onto the undo stack.
    ///
    /// New edits invalidate the redo branch, so the redo stack is cleared.
    pub fn capture(&mut self, buffer: &str) {
        self.redo_stack.clear();
        if self.max_depth > 0 && self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(buffer.to_string());
    }

    /// Pop the most recent snapshot and return it for installation as the
    /// active buffer. `current` (the state prior to applying the snapshot)
    /// moves onto the redo stack so the operation can be reversed.
    ///
    /// Disables capture: the caller's programmatic buffer replacement must
    /// not be recorded as a new edit.
    pub fn undo(&mut self, current: &str) -> Result<String, HistoryError> {
        let snapshot = self.undo_stack.pop().ok_or(HistoryError::NoHistory)?;
        self.redo_stack.push(current.to_string());
        self.capture_enabled = false;
        Ok(snapshot)
    }

    /// Symmetric to [`History::undo`]. Does not clear the redo stack.
    pub fn redo(&mut self, current: &str) -> Result<String, HistoryError> {
        let snapshot = self.redo_stack.pop().ok_or(HistoryError::NoHistory)?;
        self.undo_stack.push(current.to_string());
        self.capture_enabled = false;
        Ok(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn capture_enabled(&self) -> bool {
        self.capture_enabled
    }

    /// Re-arm capture once the user resumes editing after an undo/redo.
    pub fn enable_capture(&mut self) {
        self.capture_enabled = true;
    }

    /// Drop both stacks (fresh file load) and re-arm capture.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.capture_enabled = true;
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
