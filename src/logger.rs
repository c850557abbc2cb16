//! The logger itself: resolve, format, write.
//!
//! # Overview
//!
//! A [`StackLogger`] pairs an [`Environment`] (which decides the line format) with a
//! [`LineSink`] (which decides where lines go). Each call is self-contained:
//!
//! 1. capture the stack and find the frame the call should describe
//! 2. substitute that frame and the arguments into the environment's template
//! 3. hand the line to the sink, which writes and flushes it
//!
//! If step 1 finds nothing the call does nothing. If step 3 fails the line is dropped.
//!
//! # The process-wide logger
//!
//! [`logger()`] returns a logger built by [`StackLogger::detect`] on first use and kept
//! for the life of the process. The free functions [`log_stack`](crate::log_stack) and
//! [`log_stack_with_offset`](crate::log_stack_with_offset), and the `stack_log!` macros,
//! all go through it.
//!
//! # Entry points
//!
//! The resolver recognizes every public logging function as part of the logger, however
//! they call one another and whether or not the optimizer kept their frames. Offsets
//! are therefore always counted from the code that called into the logger.
//!
//! # Examples
//!
//! Routing lines into memory, as the tests do:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use stacklog::{Environment, StackLogger, Value};
//! use stacklog::sink::{LineSink, SinkError};
//!
//! #[derive(Clone, Default)]
//! struct Lines(Arc<Mutex<Vec<String>>>);
//!
//! impl LineSink for Lines {
//!     fn write_line(&self, line: &str) -> Result<(), SinkError> {
//!         self.0.lock().unwrap().push(line.to_string());
//!         Ok(())
//!     }
//! }
//!
//! let lines = Lines::default();
//! let logger = StackLogger::new(Environment::Console, lines.clone());
//! logger.log_stack(&[Value::from(1)]);
//!
//! let lines = lines.0.lock().unwrap();
//! assert_eq!(lines.len(), 1);
//! assert!(lines[0].ends_with("\n\t[1]\n"));
//! ```

use crate::format::Environment;
use crate::resolve;
use crate::sink::LineSink;
use crate::value::Value;
use std::fmt;
use std::sync::LazyLock;

/// Demangled paths of every function a log call passes through on its way to the
/// resolver. Must stay in sync with the functions' names.
const ENTRY_POINTS: &[&str] = &[
    concat!(module_path!(), "::StackLogger::log_stack_with_offset"),
    concat!(module_path!(), "::StackLogger::log_stack"),
    concat!(env!("CARGO_CRATE_NAME"), "::log_stack_with_offset"),
    concat!(env!("CARGO_CRATE_NAME"), "::log_stack"),
];

/// Resolves the calling frame and writes one clickable line to a sink.
///
/// Most programs use the process-wide instance through [`log_stack`](crate::log_stack)
/// or the [`stack_log!`](crate::stack_log) macro. Building a `StackLogger` by hand is
/// useful for routing lines somewhere else, such as an in-memory buffer in tests.
///
/// # Examples
///
/// ```
/// use stacklog::{Environment, StackLogger, Value};
/// use stacklog::sink::ConsoleSink;
///
/// let logger = StackLogger::new(Environment::Console, ConsoleSink::new(std::io::stderr()));
/// logger.log_stack(&[Value::from("checkpoint"), Value::from(3)]);
/// ```
pub struct StackLogger {
    environment: Environment,
    sink: Box<dyn LineSink>,
    diagnostics: bool,
}

impl fmt::Debug for StackLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackLogger")
            .field("environment", &self.environment)
            .field("sink", &"<sink>")
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

impl StackLogger {
    /// A logger that formats for `environment` and writes to `sink`.
    pub fn new(environment: Environment, sink: impl LineSink + 'static) -> Self {
        StackLogger {
            environment,
            sink: Box::new(sink),
            diagnostics: false,
        }
    }

    /// The logger for the environment this binary was built for.
    ///
    /// - Android: compact lines to logcat under the `stackLog` tag.
    /// - Everywhere else: verbose lines to standard output.
    pub fn detect() -> Self {
        #[cfg(target_os = "android")]
        let logger = StackLogger::new(
            Environment::detect(),
            crate::sink::BufferedSink::new(crate::sink::logcat::Logcat),
        );
        #[cfg(not(target_os = "android"))]
        let logger = StackLogger::new(Environment::detect(), crate::sink::ConsoleSink::stdout());
        logger.with_diagnostics(cfg!(feature = "diagnostics"))
    }

    /// Whether discarded sink errors are reported on stderr.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Logs the caller's location. Same as `log_stack_with_offset(0, args)`.
    #[inline(never)]
    pub fn log_stack(&self, args: &[Value]) {
        self.log_stack_with_offset(0, args);
    }

    /// Logs the location `offset` frames above the caller.
    ///
    /// With `offset == 0` the line points at the code that called this method; each
    /// increment moves one caller further out, which lets helper functions log their
    /// caller's location instead of their own.
    ///
    /// Nothing is written when the frame cannot be resolved: `offset` past the top of
    /// the stack, or a binary without symbols.
    ///
    /// A function whose last action is this call may be compiled as a tail call and
    /// vanish from the stack in optimized builds. The [`stack_log!`](crate::stack_log)
    /// macros guard against that; direct callers that care can follow the call with
    /// `std::hint::black_box(())`.
    #[inline(never)]
    pub fn log_stack_with_offset(&self, offset: usize, args: &[Value]) {
        let Some(frame) = resolve::locate(ENTRY_POINTS, offset) else {
            return;
        };
        let line = self.environment.format().render(&frame, args);
        if let Err(e) = self.sink.write_line(&line) {
            if self.diagnostics {
                crate::logging::discarded(&e);
            }
        }
    }
}

static LOGGER: LazyLock<StackLogger> = LazyLock::new(StackLogger::detect);

/// The process-wide logger, created on first use.
pub fn logger() -> &'static StackLogger {
    &LOGGER
}
