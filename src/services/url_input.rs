//! Turns text typed on the welcome page into a navigable URL.
//!
//! Anything rejected here is reported back to the page and never reaches
//! the tab manager.

use url::Url;

use crate::types::errors::InputError;

/// Resolves user input to an absolute `http`/`https` URL.
///
/// Input without a scheme is assumed to be `https`.
pub fn resolve_input(input: &str) -> Result<String, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    match Url::parse(&candidate) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => Ok(candidate),
        _ => Err(InputError::InvalidFormat(trimmed.to_string())),
    }
}

/// Schemes passed through to the content primitive untouched.
const KNOWN_SCHEMES: &[&str] = &[
    "http", "https", "file", "about", "data", "mailto", "tel", "chromini",
];

/// Prefixes `https://` unless `url` already carries a known scheme.
pub fn ensure_scheme(url: &str) -> String {
    let trimmed = url.trim();
    match Url::parse(trimmed) {
        Ok(parsed) if KNOWN_SCHEMES.contains(&parsed.scheme()) => trimmed.to_string(),
        _ => format!("https://{}", trimmed),
    }
}
