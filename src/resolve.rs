//! Stack resolution: which frame does a log call describe?
//!
//! The stack is captured innermost first. The resolver looks for the logger's entry
//! points (the *markers*): it finds the first frame that is one of them, follows the run
//! of consecutive marker frames outward, calls the outermost one `base`, and answers with
//! the frame at `base + offset + 1`. With `offset == 0` that is whoever called into the
//! logger.
//!
//! Anchoring on the whole run rather than on one fixed function means the number of
//! wrapper frames does not matter. In optimized builds a wrapper whose last action is
//! the call into the logger is compiled as a tail call and leaves no frame behind; the
//! run is then simply one frame shorter and the answer is the same.
//!
//! Any failure (no marker because symbols were stripped, an index past the end of the
//! stack, arithmetic overflow) yields `None`, and the caller logs nothing.

use crate::frame::StackFrame;
use std::path::PathBuf;

/// What the symbolizer told us about one (possibly inlined) frame.
#[derive(Debug, Default)]
struct RawSymbol {
    name: Option<String>,
    file: Option<PathBuf>,
    line: Option<u32>,
}

impl RawSymbol {
    fn from_symbol(symbol: &backtrace::Symbol) -> Self {
        RawSymbol {
            // `{:#}` drops the trailing hash
            name: symbol.name().map(|n| format!("{:#}", n)),
            file: symbol.filename().map(|f| f.to_path_buf()),
            line: symbol.lineno(),
        }
    }

    fn to_frame(&self) -> StackFrame {
        StackFrame::from_symbol(self.name.as_deref(), self.file.as_deref(), self.line)
    }
}

/// Resolves the frame `offset` levels above the code that called into `markers`.
///
/// `markers` are the demangled paths of the functions that make up an entry point. At
/// least one of them must be on the stack, above this call, and `#[inline(never)]`.
#[inline(never)]
pub(crate) fn locate(markers: &[&str], offset: usize) -> Option<StackFrame> {
    let mut symbols: Vec<RawSymbol> = Vec::new();
    let mut target: Option<usize> = None;

    backtrace::trace(|frame| {
        let start = symbols.len();
        backtrace::resolve_frame(frame, |symbol| {
            symbols.push(RawSymbol::from_symbol(symbol));
        });
        if symbols.len() == start {
            // unsymbolized frames still occupy a slot
            symbols.push(RawSymbol::default());
        }
        // once the target slot exists the marker run is closed, so the answer is final
        target = target_index(symbols.iter().map(|s| s.name.as_deref()), markers, offset);
        target.is_none()
    });

    symbols.get(target?).map(RawSymbol::to_frame)
}

/// Compares a demangled symbol against a marker path.
///
/// v0 mangling renders inherent methods as `<Type>::method`, legacy mangling as
/// `Type::method`; both name the same function.
fn is_marker(name: &str, marker: &str) -> bool {
    if name == marker {
        return true;
    }
    match (marker.rsplit_once("::"), name.strip_prefix('<')) {
        (Some((owner, method)), Some(rest)) => {
            rest.strip_prefix(owner).and_then(|r| r.strip_prefix(">::")) == Some(method)
        }
        _ => false,
    }
}

fn is_any_marker(name: Option<&str>, markers: &[&str]) -> bool {
    name.is_some_and(|n| markers.iter().any(|m| is_marker(n, m)))
}

/// The index arithmetic of [`locate`], over symbol names alone.
///
/// Returns `None` if no marker is present or the target falls outside `names`.
pub(crate) fn target_index<'a, I>(names: I, markers: &[&str], offset: usize) -> Option<usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut names = names.into_iter().enumerate();
    let (mut base, _) = names.find(|(_, name)| is_any_marker(*name, markers))?;
    let mut len = base + 1;
    let mut run_open = true;
    for (i, name) in names {
        if run_open && is_any_marker(name, markers) {
            base = i;
        } else {
            run_open = false;
        }
        len = i + 1;
    }
    let index = base.checked_add(offset)?.checked_add(1)?;
    (index < len).then_some(index)
}
