pub mod editing;
pub mod io;

// Re-export key types for easier usage
pub use editing::debounce::{DebounceTimer, QUIESCENCE_INTERVAL};
pub use editing::history::{History, HistoryError};
pub use editing::rules::{Rule, RuleError, RuleTable};
pub use editing::session::EditorSession;
pub use io::IoError;
