use crate::indent::{padding_for, reindent};
use crate::placeholder::{self, PlaceholderMatch};
use tracing::debug;

/// What happened to the placeholder during substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Replaced {
        /// 1-based line of the placeholder
        line: usize,
        /// 0-based column of the placeholder, in characters of the lossily
        /// decoded line prefix
        column: usize,
        /// Width of the padding applied to continuation lines, `None` when
        /// the replacement was inserted as given
        padding_width: Option<usize>,
        /// Further placeholders left verbatim in the output
        remaining: usize,
    },
    NotFound,
}

impl Outcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Outcome::Replaced { .. })
    }
}

/// Output bytes together with the outcome that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: Vec<u8>,
    pub outcome: Outcome,
}

/// Replace the first placeholder in `template` with `replacement`.
///
/// The replacement is re-indented to the placeholder's column when the
/// placeholder sits behind spaces only. When the template carries no
/// placeholder the bytes are returned unchanged with [`Outcome::NotFound`].
/// Both inputs are raw bytes and need not be valid UTF-8.
///
/// The replacement is inserted literally. Sequences such as `\n`, `\\`,
/// `$1` or `\g<name>` in the blob are copied as they are and never expanded
/// as substitution escapes, unlike a regex `sub` with a template string.
///
/// # Examples
///
/// ```
/// use replace_bazel_deps::substitute;
///
/// let result = substitute(b"x\n  <generated_bzl_deps/>\n", b"dep1\ndep2");
/// assert_eq!(result.text, b"x\n  dep1\n  dep2\n");
/// ```
pub fn substitute(template: &[u8], replacement: &[u8]) -> Substitution {
    let Some(found) = placeholder::locate(template) else {
        return Substitution {
            text: template.to_vec(),
            outcome: Outcome::NotFound,
        };
    };

    let padding = padding_for(template, found.start);
    let body = match padding {
        Some(padding) => reindent(replacement, padding),
        None => replacement.to_vec(),
    };

    let (line, column) = position_of(template, found);
    let remaining = placeholder::count(&template[found.end..]);
    debug!(line, column, padding = ?padding.map(<[u8]>::len), remaining, "placeholder located");

    let mut text = Vec::with_capacity(template.len() - found.len() + body.len());
    text.extend_from_slice(&template[..found.start]);
    text.extend_from_slice(&body);
    text.extend_from_slice(&template[found.end..]);

    Substitution {
        text,
        outcome: Outcome::Replaced {
            line,
            column,
            padding_width: padding.map(<[u8]>::len),
            remaining,
        },
    }
}

fn position_of(template: &[u8], found: PlaceholderMatch) -> (usize, usize) {
    let before = &template[..found.start];
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|n| n + 1)
        .unwrap_or(0);
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let column = String::from_utf8_lossy(&before[line_start..]).chars().count();
    (line, column)
}
