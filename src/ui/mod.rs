//! Chromini UI layer.
//!
//! Uses `tao` for windows and `wry` for the content surfaces:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! Global key chords come from `global-hotkey`. Everything here converts
//! host callbacks into `UserEvent`s and hands them to the `App`.

pub mod hotkeys;
pub mod webview_app;
