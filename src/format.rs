//! Runtime environments and the line formats that belong to them.
//!
//! # Overview
//!
//! Two environments are recognized, and each has a fixed line template:
//!
//! | environment | template                                 | trailing newline |
//! |-------------|------------------------------------------|------------------|
//! | `Mobile`    | `{class}.{method}({file}:{line}){extra}` | no               |
//! | `Console`   | `{class} ({file}:{line}){extra}`         | yes              |
//!
//! `{extra}` is empty when a call has no arguments, and otherwise a newline, a tab and
//! the rendered argument list.
//!
//! # Detection
//!
//! The environment is a property of the build target, not of the running process:
//! Android builds are `Mobile`, everything else is `Console`. Nothing is checked at
//! runtime, so detection cannot fail.
//!
//! # Examples
//!
//! ```
//! use stacklog::{Environment, LineFormat};
//!
//! let format = Environment::detect().format();
//! # #[cfg(not(target_os = "android"))]
//! assert_eq!(format, LineFormat::Verbose);
//! ```

use crate::frame::StackFrame;
use crate::value::{Value, render_list};
use std::fmt::Write;

/// Where the process is running, as far as log output is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// A mobile runtime with its own log facility (Android logcat).
    Mobile,
    /// Anything else; lines go to standard output.
    Console,
}

impl Environment {
    /// The environment this binary was built for.
    ///
    /// The choice is made at compile time, so it cannot fail and never changes while
    /// the process runs.
    pub const fn detect() -> Self {
        if cfg!(target_os = "android") {
            Environment::Mobile
        } else {
            Environment::Console
        }
    }

    pub const fn format(self) -> LineFormat {
        match self {
            Environment::Mobile => LineFormat::Compact,
            Environment::Console => LineFormat::Verbose,
        }
    }
}

/// Templates for one log line.
///
/// Both shapes are matched by the link detectors of common consoles: `(File.rs:12)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    /// `{class}.{method}({file}:{line}){extra}`, no trailing newline (logcat adds its own).
    Compact,
    /// `{class} ({file}:{line}){extra}` followed by a newline.
    Verbose,
}

impl LineFormat {
    /// Substitutes a frame and its arguments into the template.
    ///
    /// ```
    /// use stacklog::{LineFormat, StackFrame, Value};
    ///
    /// let frame = StackFrame::new("app::worker", "run", "worker.rs", 12);
    /// assert_eq!(
    ///     LineFormat::Verbose.render(&frame, &[Value::from("x"), Value::from(42)]),
    ///     "app::worker (worker.rs:12)\n\t[\"x\", 42]\n"
    /// );
    /// assert_eq!(
    ///     LineFormat::Compact.render(&frame, &[]),
    ///     "app::worker.run(worker.rs:12)"
    /// );
    /// ```
    pub fn render(self, frame: &StackFrame, args: &[Value]) -> String {
        let extra = extra(args);
        let mut line = String::new();
        // writing into a String cannot fail
        let _ = match self {
            LineFormat::Compact => write!(
                line,
                "{}.{}({}:{}){}",
                frame.class(),
                frame.method(),
                frame.file(),
                frame.line(),
                extra
            ),
            LineFormat::Verbose => writeln!(
                line,
                "{} ({}:{}){}",
                frame.class(),
                frame.file(),
                frame.line(),
                extra
            ),
        };
        line
    }
}

/// The `{extra}` slot: empty without arguments, otherwise newline, tab, rendered list.
pub fn extra(args: &[Value]) -> String {
    if args.is_empty() {
        String::new()
    } else {
        format!("\n\t{}", render_list(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> StackFrame {
        StackFrame::new("app::Queue", "push", "queue.rs", 1234)
    }

    #[test]
    fn extra_is_empty_without_args() {
        assert_eq!(extra(&[]), "");
        assert_eq!(LineFormat::Verbose.render(&frame(), &[]), "app::Queue (queue.rs:1234)\n");
    }

    #[test]
    fn extra_starts_with_newline_tab() {
        let args = [Value::from(1), Value::from(vec!["a", "b"])];
        assert_eq!(extra(&args), "\n\t[1, [\"a\", \"b\"]]");
        assert_eq!(
            LineFormat::Compact.render(&frame(), &args),
            "app::Queue.push(queue.rs:1234)\n\t[1, [\"a\", \"b\"]]"
        );
    }

    #[test]
    fn environments_pick_their_format() {
        assert_eq!(Environment::Mobile.format(), LineFormat::Compact);
        assert_eq!(Environment::Console.format(), LineFormat::Verbose);
    }

    #[test]
    #[cfg(not(target_os = "android"))]
    fn detects_console_off_android() {
        assert_eq!(Environment::detect(), Environment::Console);
    }
}
