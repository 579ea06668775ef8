// Pure navigation logic - no Tauri imports allowed.
// URL-field text handling and how an address is handed to the engine.

use url::Url;

/// Schemes that are passed through untouched when typed into the URL field.
const KNOWN_SCHEMES: [&str; 5] = ["http:", "https:", "file:", "about:", "data:"];

/// Turns URL-field text into the address handed to the engine.
///
/// Text without a known scheme gets `https://` prepended. Nothing else is
/// checked: malformed input goes to the engine, which shows its own error
/// page. Returns `None` for blank input.
pub fn normalize_address(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if KNOWN_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return Some(trimmed.to_string());
    }

    Some(format!("https://{}", trimmed))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Loaded by the engine itself; pages may not script a top-level jump to `data:` or `file:`.
    Url(Url),
    /// A `location` assignment run inside the page, so unparseable text still
    /// reaches the engine's error page.
    Script(String),
}

pub fn navigation_target(address: &str) -> NavigationTarget {
    match Url::parse(address) {
        Ok(url) => NavigationTarget::Url(url),
        Err(_) => {
            // serde_json gives a correctly escaped JS string literal
            let literal = serde_json::to_string(address).unwrap_or_else(|_| "\"about:blank\"".to_string());
            NavigationTarget::Script(format!("window.location.href = {}", literal))
        }
    }
}
