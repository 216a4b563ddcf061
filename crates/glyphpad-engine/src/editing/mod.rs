/*!
 * # Editing Core Module
 *
 * The editing system is built from three leaf pieces and one composing owner:
 *
 * ### 1. Ordered Substitution Table
 * - An explicit list of `(pattern, replacement)` rules (`rules`)
 * - Declaration order encodes priority among overlapping patterns and is
 *   never reordered, deduped, or applied in parallel
 * - Empty patterns are rejected when the table is built
 *
 * ### 2. Rewrite Engine
 * - A pure function from `(buffer, cursor)` to `(buffer, cursor)` (`rewrite`)
 * - Applies every rule in table order as a global left-to-right literal
 *   replace; each rule's output feeds the next rule's input
 * - Tracks the length delta of every replacement at or before the caret so
 *   the caret keeps referencing the same logical position after glyphs
 *   shrink or grow the text
 *
 * ### 3. Coalesced Edit History
 * - Two bounded stacks of whole-buffer snapshots (`history`)
 * - A quiescence timer (`debounce`) merges a burst of keystrokes into a
 *   single snapshot once input pauses
 * - Undo/redo suppress capture of their own programmatic buffer writes
 *
 * ### 4. Editor Session
 * - `session::EditorSession` owns the live buffer and cursor, runs every
 *   user edit through the rewrite engine, arms the timer, and services
 *   undo/redo and the file lifecycle
 * - Frontends render from `EditorSession` accessors and never mutate the
 *   buffer directly
 */

pub mod debounce;
pub mod history;
pub mod rules;
pub mod session;

mod rewrite;

// Public API re-exports
pub use debounce::{DebounceTimer, QUIESCENCE_INTERVAL};
pub use history::{History, HistoryError};
pub use rules::{Rule, RuleError, RuleTable};
pub use session::EditorSession;
