use std::fmt;

use serde::{Deserialize, Serialize};

/// A shell command reachable from a global key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    NewWindow,
    ShowWelcome,
    PreviousTab,
    NextTab,
    CloseTab,
    Reload,
    ToggleFullscreen,
    ToggleDevTools,
    Back,
    Forward,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::NewWindow => "new_window",
            Command::ShowWelcome => "show_welcome",
            Command::PreviousTab => "previous_tab",
            Command::NextTab => "next_tab",
            Command::CloseTab => "close_tab",
            Command::Reload => "reload",
            Command::ToggleFullscreen => "toggle_fullscreen",
            Command::ToggleDevTools => "toggle_devtools",
            Command::Back => "back",
            Command::Forward => "forward",
        };
        f.write_str(name)
    }
}
