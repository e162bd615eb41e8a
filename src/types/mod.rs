// Chromini shared type definitions
// Each submodule defines types used across the application.

pub mod bridge;
pub mod config;
pub mod errors;
pub mod history;
pub mod shortcut;
pub mod surface;
pub mod tab;
pub mod window;
