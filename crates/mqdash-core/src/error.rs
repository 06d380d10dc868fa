//! Typed errors surfaced through `anyhow` and recovered by downcast.

use std::fmt;

/// The backend rejected the session (HTTP 401).
///
/// By the time a caller sees this, the stored credentials have already been
/// cleared and navigation forced to the login view; the error carries the
/// original failure so call sites can still observe it.
#[derive(Debug)]
pub struct UnauthorizedError {
    pub status: u16,
    pub body: String,
}

impl fmt::Display for UnauthorizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unauthorized (HTTP {})", self.status)
    }
}

impl std::error::Error for UnauthorizedError {}

/// A non-2xx response that is not an authorization failure.
///
/// Passed through to callers untouched; display/retry policy is theirs.
#[derive(Debug)]
pub struct StatusError {
    pub status: u16,
    pub body: String,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "HTTP {}", self.status)
        } else {
            write!(f, "HTTP {}: {}", self.status, truncate(&self.body, 200))
        }
    }
}

impl std::error::Error for StatusError {}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
