//! Snapshots of individual call-stack entries.
//!
//! A [`StackFrame`] is what the resolver hands to the formatter: the location of one
//! active function, reduced to the four fields a clickable log line needs.
//!
//! Rust has no classes, so the "class" of a frame is the symbol path without its last
//! segment and the "method" is that last segment:
//!
//! | demangled symbol                       | class                 | method        |
//! |----------------------------------------|-----------------------|---------------|
//! | `app::worker::run`                     | `app::worker`         | `run`         |
//! | `app::Queue::push`                     | `app::Queue`          | `push`        |
//! | `<app::Queue as core::fmt::Debug>::fmt`| `<app::Queue as core::fmt::Debug>` | `fmt` |
//! | `app::main::{{closure}}`               | `app::main`           | `{{closure}}` |

use serde::Serialize;
use std::path::Path;

/// Placeholder used when the symbolizer could not name a frame or its file.
pub const UNKNOWN: &str = "<unknown>";

/// One entry of the call stack, as seen by a log call.
///
/// Frames are plain values captured at call time; nothing in them refers back to the
/// live stack.
///
/// # Examples
///
/// ```
/// use stacklog::StackFrame;
///
/// let frame = StackFrame::new("app::worker", "run", "worker.rs", 42);
/// assert_eq!(frame.class(), "app::worker");
/// assert_eq!(frame.method(), "run");
/// assert_eq!(frame.file(), "worker.rs");
/// assert_eq!(frame.line(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackFrame {
    class: String,
    method: String,
    file: String,
    line: u32,
}

impl StackFrame {
    pub fn new(
        class: impl Into<String>,
        method: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        StackFrame {
            class: class.into(),
            method: method.into(),
            file: file.into(),
            line,
        }
    }

    /// Builds a frame from what the symbolizer reports.
    ///
    /// `symbol` is the demangled name without its hash suffix. The file is reduced to its
    /// base name, which is what consoles and logcat match against when making the line
    /// clickable. A missing line number becomes `0`.
    pub fn from_symbol(symbol: Option<&str>, file: Option<&Path>, line: Option<u32>) -> Self {
        let (class, method) = match symbol {
            Some(symbol) => split_symbol(symbol),
            None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
        };
        let file = file
            .and_then(|f| f.file_name())
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNKNOWN.to_string());
        StackFrame {
            class,
            method,
            file,
            line: line.unwrap_or(0),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Splits a demangled path at its last top-level `::`.
///
/// Separators inside `<...>` (trait impls, generic arguments) do not count. A symbol with
/// no separator is all method and an empty class.
fn split_symbol(symbol: &str) -> (String, String) {
    let symbol = strip_hash(symbol);
    let bytes = symbol.as_bytes();
    let mut depth = 0usize;
    let mut split = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                split = Some(i);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    match split {
        Some(at) => (strip_inherent(&symbol[..at]).to_string(), symbol[at + 2..].to_string()),
        None => (String::new(), symbol.to_string()),
    }
}

/// `<app::Queue>` (v0 mangling of an inherent impl) names the same type as `app::Queue`.
fn strip_inherent(class: &str) -> &str {
    match class.strip_prefix('<').and_then(|c| c.strip_suffix('>')) {
        Some(inner) if !inner.contains(" as ") && !inner.contains('<') => inner,
        _ => class,
    }
}

/// Drops a legacy-mangling hash segment (`::h0123456789abcdef`) if one slipped through.
fn strip_hash(symbol: &str) -> &str {
    if let Some((head, tail)) = symbol.rsplit_once("::") {
        if tail.len() == 17
            && tail.starts_with('h')
            && tail[1..].bytes().all(|b| b.is_ascii_hexdigit())
        {
            return head;
        }
    }
    symbol
}
