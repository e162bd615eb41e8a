use std::path::PathBuf;

use thiserror::Error;

use super::surface::SurfaceId;
use super::window::WindowId;

// === TabError ===

/// Errors related to tab and window bookkeeping.
#[derive(Debug, Error)]
pub enum TabError {
    /// No open window has the given id.
    #[error("Window not found: {0}")]
    WindowNotFound(WindowId),
    /// The window id is already registered.
    #[error("Window already registered: {0}")]
    WindowAlreadyRegistered(WindowId),
    /// No live surface has the given id.
    #[error("Surface not found: {0}")]
    SurfaceNotFound(SurfaceId),
    /// The host could not create a window or surface.
    #[error(transparent)]
    Host(#[from] HostError),
}

// === HostError ===

/// Errors reported by the windowing and rendering host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host window could not be created.
    #[error("Failed to create window: {0}")]
    WindowCreation(String),
    /// The content surface could not be created.
    #[error("Failed to create content surface: {0}")]
    SurfaceCreation(String),
    /// The OS default handler refused the URL.
    #[error("Failed to open {url} externally: {reason}")]
    OpenExternal { url: String, reason: String },
}

// === ConfigError ===

/// Errors related to reading and writing the persisted config document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred on the config file or its directory.
    #[error("Config I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config document could not be serialized or parsed.
    #[error("Config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// === HistoryError ===

/// Errors related to browsing history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The updated history could not be persisted.
    #[error("History could not be saved: {0}")]
    Persist(#[from] ConfigError),
}

// === InputError ===

/// Rejections of user-typed addresses, shown on the welcome page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Nothing but whitespace was entered.
    #[error("Please enter a URL")]
    Empty,
    /// The text does not form a usable URL.
    #[error("Invalid URL format")]
    InvalidFormat(String),
}

// === ShortcutError ===

/// Errors raised while building or registering the chord table.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// The keys are already bound to another command.
    #[error("Shortcut conflict: {0}")]
    Conflict(String),
    /// The key combination is invalid.
    #[error("Invalid shortcut keys: {0}")]
    InvalidKeys(String),
    /// The OS refused to register the chord.
    #[error("Failed to register shortcut {keys}: {reason}")]
    Registration { keys: String, reason: String },
}

// === BridgeError ===

/// Errors related to messages posted by renderer pages.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The message is not valid JSON or has an unknown shape.
    #[error("Malformed bridge message: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A page surface sent a command reserved for the welcome page.
    #[error("Command '{0}' is not allowed from this page")]
    Forbidden(&'static str),
    /// The sending surface is no longer alive.
    #[error("Message from unknown surface: {0}")]
    UnknownSurface(SurfaceId),
    /// A history operation failed.
    #[error(transparent)]
    History(#[from] HistoryError),
    /// The registry rejected the resulting operation.
    #[error(transparent)]
    Tab(#[from] TabError),
}
