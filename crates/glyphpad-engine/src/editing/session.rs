use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::editing::debounce::DebounceTimer;
use crate::editing::history::{History, HistoryError};
use crate::editing::rules::RuleTable;
use crate::io::{self, IoError};

/// Display name for a buffer that has never been saved.
pub const UNTITLED: &str = "Untitled.txt";

/// Owner of the live buffer, composing the rewrite engine, the edit history,
/// and the debounce timer.
///
/// Every user edit flows through [`EditorSession::apply_user_edit`]: the raw
/// text change is rewritten, the adjusted caret installed, and the quiescence
/// timer re-armed. Undo/redo install their text programmatically - that path
/// never re-enters the rewrite engine and never arms the timer, so history
/// operations cannot re-trigger themselves.
///
/// The caret is a char offset and always satisfies `0 <= cursor <= len`.
#[derive(Debug)]
pub struct EditorSession {
    buffer: String,
    cursor: usize,
    table: RuleTable,
    history: History,
    debounce: DebounceTimer,
    path: Option<PathBuf>,
    file_name: String,
    dirty: bool,
}

impl EditorSession {
    pub fn new(table: RuleTable) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            table,
            history: History::new(),
            debounce: DebounceTimer::default(),
            path: None,
            file_name: UNTITLED.to_string(),
            dirty: false,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Entry point for every raw text change coming from the widget.
    ///
    /// Runs the rewrite engine over the changed text, installs the rewritten
    /// buffer and adjusted caret, and (re)arms the quiescence timer. Typing
    /// after an undo/redo makes edits eligible for capture again.
    pub fn apply_user_edit(&mut self, text: &str, cursor: usize, now: Instant) -> (&str, usize) {
        let (rewritten, adjusted) = self.table.rewrite(text, cursor);
        self.buffer = rewritten;
        self.cursor = adjusted;
        self.dirty = true;

        // Typing after an undo/redo makes edits eligible for capture again,
        // and every eligible edit restarts the quiescence window.
        self.history.enable_capture();
        self.debounce.arm(now);
        (&self.buffer, self.cursor)
    }

    /// Capture a pending snapshot once the quiescence window has closed.
    /// Returns whether a capture happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.debounce.fire(now) {
            self.history.capture(&self.buffer);
            return true;
        }
        false
    }

    // ---- Edit operations, all routed through apply_user_edit ----

    pub fn insert_char(&mut self, ch: char, now: Instant) {
        let mut text = self.buffer.clone();
        text.insert(self.byte_offset(self.cursor), ch);
        let cursor = self.cursor + 1;
        self.apply_user_edit(&text, cursor, now);
    }

    pub fn insert_str(&mut self, s: &str, now: Instant) {
        if s.is_empty() {
            return;
        }
        let mut text = self.buffer.clone();
        text.insert_str(self.byte_offset(self.cursor), s);
        let cursor = self.cursor + s.chars().count();
        self.apply_user_edit(&text, cursor, now);
    }

    /// Delete the char before the caret.
    pub fn backspace(&mut self, now: Instant) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        let mut text = self.buffer.clone();
        text.replace_range(start..end, "");
        let cursor = self.cursor - 1;
        self.apply_user_edit(&text, cursor, now);
    }

    /// Delete the char after the caret.
    pub fn delete_forward(&mut self, now: Instant) {
        let start = self.byte_offset(self.cursor);
        if start == self.buffer.len() {
            return;
        }
        let end = self.byte_offset(self.cursor + 1);
        let mut text = self.buffer.clone();
        text.replace_range(start..end, "");
        self.apply_user_edit(&text, self.cursor, now);
    }

    // ---- Caret motion (widget state only, never rewrites) ----

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_up(&mut self) {
        let (line, col) = self.line_col();
        if line > 0 {
            self.cursor = self.offset_at(line - 1, col);
        }
    }

    pub fn move_down(&mut self) {
        let (line, col) = self.line_col();
        self.cursor = self.offset_at(line + 1, col).min(self.char_len());
    }

    pub fn move_line_start(&mut self) {
        let (line, _) = self.line_col();
        self.cursor = self.offset_at(line, 0);
    }

    pub fn move_line_end(&mut self) {
        let (line, _) = self.line_col();
        self.cursor = self.offset_at(line, usize::MAX);
    }

    /// 1-based `(line, column)` of the caret, for the status bar.
    pub fn cursor_position(&self) -> (usize, usize) {
        let (line, col) = self.line_col();
        (line + 1, col + 1)
    }

    // ---- History ----

    /// Restore the most recent snapshot. The restored text is installed
    /// directly: it is never fed back through the rewrite engine and never
    /// arms the debounce timer. Any pending capture is discarded, or it
    /// would push the pre-undo buffer on top of the restored one.
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        let restored = self.history.undo(&self.buffer)?;
        self.debounce.cancel();
        self.install(restored);
        Ok(())
    }

    /// Symmetric to [`EditorSession::undo`].
    pub fn redo(&mut self) -> Result<(), HistoryError> {
        let restored = self.history.redo(&self.buffer)?;
        self.debounce.cancel();
        self.install(restored);
        Ok(())
    }

    /// Programmatic buffer replacement shared by undo and redo.
    fn install(&mut self, text: String) {
        self.cursor = self.cursor.min(text.chars().count());
        self.buffer = text;
        self.dirty = true;
    }

    // ---- File lifecycle ----

    pub fn new_file(&mut self) {
        self.debounce.cancel();
        self.history.clear();
        self.buffer.clear();
        self.cursor = 0;
        self.path = None;
        self.file_name = UNTITLED.to_string();
        self.dirty = false;
    }

    /// Replace the buffer with the contents of `path`. File content is
    /// already substituted, so it is installed without rewriting; history is
    /// cleared and any pending capture discarded so a stale buffer cannot be
    /// captured into the fresh history.
    pub fn open(&mut self, path: &Path) -> Result<(), IoError> {
        let content = io::read_file(path)?;
        self.debounce.cancel();
        self.history.clear();
        self.buffer = content;
        self.cursor = 0;
        self.set_path(path);
        self.dirty = false;
        Ok(())
    }

    /// Write the buffer back to its stored path. Fails with
    /// [`IoError::NoPath`] when the buffer has never been saved, so the
    /// frontend can prompt for a destination.
    pub fn save(&mut self) -> Result<(), IoError> {
        let path = self.path.clone().ok_or(IoError::NoPath)?;
        self.save_as(&path)
    }

    pub fn save_as(&mut self, path: &Path) -> Result<(), IoError> {
        io::write_file(path, &self.buffer)?;
        self.set_path(path);
        self.dirty = false;
        Ok(())
    }

    // ---- Helpers ----

    fn set_path(&mut self, path: &Path) {
        self.file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string());
        self.path = Some(path.to_path_buf());
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Byte offset of the given char offset, clamped to the buffer end.
    fn byte_offset(&self, char_offset: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_offset)
            .map(|(index, _)| index)
            .unwrap_or(self.buffer.len())
    }

    /// 0-based `(line, column)` of the caret.
    fn line_col(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.buffer.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Char offset of `(line, col)`, clamping `col` to the line's length and
    /// `line` to the last line.
    fn offset_at(&self, line: usize, col: usize) -> usize {
        let mut offset = 0;
        let mut current_line = 0;
        let mut chars = self.buffer.chars();

        while current_line < line {
            match chars.next() {
                Some('\n') => {
                    current_line += 1;
                    offset += 1;
                }
                Some(_) => offset += 1,
                None => return offset,
            }
        }

        let mut advanced = 0;
        for ch in chars {
            if advanced == col || ch == '\n' {
                break;
            }
            offset += 1;
            advanced += 1;
        }
        offset
    }
}
