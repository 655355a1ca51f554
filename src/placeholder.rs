//! Locating the `<generated_bzl_deps/>` marker in a template.
//!
//! Templates are matched as raw bytes so files in any ASCII-compatible
//! encoding pass through untouched.

use regex::bytes::Regex;
use std::sync::LazyLock;

/// Source of the placeholder pattern, as reported in diagnostics.
pub const PLACEHOLDER_PATTERN: &str = "<generated_bzl_deps ?/>";

pub(crate) static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is a valid regex")
});

/// Byte range of a placeholder occurrence within the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderMatch {
    pub start: usize,
    pub end: usize,
}

impl PlaceholderMatch {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Find the first placeholder in `template`.
///
/// Returns `None` when the template carries no marker. Later occurrences are
/// ignored here; see [`count`].
pub fn locate(template: &[u8]) -> Option<PlaceholderMatch> {
    PLACEHOLDER.find(template).map(|m| PlaceholderMatch {
        start: m.start(),
        end: m.end(),
    })
}

/// Number of placeholder occurrences in `template`.
pub fn count(template: &[u8]) -> usize {
    PLACEHOLDER.find_iter(template).count()
}
