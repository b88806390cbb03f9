//! Identity keys
//!
//! Keys produced here follow React's textual conventions so that re-keyed
//! elements stay compatible with a reconciler that expects them:
//!
//! - a top-level traversal key starts with [`ROOT_PREFIX`]
//! - positions inside nested raw sequences are joined with [`SUBTREE_SEPARATOR`]
//! - caller-supplied keys carry [`EXPLICIT_MARKER`] and are escaped, so the
//!   explicit key `"5"` (`$5`) never collides with position 5 (`5`)
//! - positional keys are rendered in base 36

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;
use std::sync::Arc;

pub const ROOT_PREFIX: &str = ".";
pub const SUBTREE_SEPARATOR: &str = ":";
pub const EXPLICIT_MARKER: &str = "$";

static ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[=:]").unwrap());

/// Escape a caller-supplied key and tag it as explicit
pub fn explicit_key(key: &str) -> String {
    let escaped = ESCAPE_REGEX.replace_all(key, |caps: &Captures| match &caps[0] {
        "=" => "=0",
        _ => "=2",
    });
    format!("{}{}", EXPLICIT_MARKER, escaped)
}

/// Render a slot index as a positional key
pub fn positional_key(index: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if index == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    let mut n = index;
    while n > 0 {
        digits.push(DIGITS[n % 36]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Local key of a node: its explicit key if one was given, else its slot index
pub fn element_key(explicit: Option<&str>, index: usize) -> String {
    match explicit {
        Some(key) => explicit_key(key),
        None => positional_key(index),
    }
}

#[derive(Debug)]
struct Segment {
    value: String,
    parent: Option<Arc<Segment>>,
}

/// Key segments inherited from enclosing fragments.
///
/// The path is persistent: [`KeyPath::push`] returns an extended copy that
/// shares its prefix with the receiver, and the receiver is left untouched.
/// Sibling branches therefore never observe each other's segments.
#[derive(Debug, Clone, Default)]
pub struct KeyPath {
    last: Option<Arc<Segment>>,
    len: usize,
}

impl KeyPath {
    pub fn new() -> Self {
        KeyPath::default()
    }

    pub fn push(&self, segment: impl Into<String>) -> KeyPath {
        KeyPath {
            last: Some(Arc::new(Segment {
                value: segment.into(),
                parent: self.last.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Segments from the outermost fragment inwards
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = Vec::with_capacity(self.len);
        let mut cursor = self.last.as_deref();
        while let Some(segment) = cursor {
            segments.push(segment.value.as_str());
            cursor = segment.parent.as_deref();
        }
        segments.reverse();
        segments
    }

    /// The full key of a leaf: every segment followed by `leaf`, joined by `separator`
    pub fn join(&self, leaf: &str, separator: &str) -> String {
        let mut segments = self.segments();
        segments.push(leaf);
        segments.join(separator)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.segments().join(", "))
    }
}
