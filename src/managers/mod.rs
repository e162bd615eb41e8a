// Chromini state managers
// Managers handle stateful operations: tabs, windows, history, shortcuts.

pub mod history_manager;
pub mod shortcut_manager;
pub mod tab_manager;
pub mod window_manager;
