//! Destinations for formatted log lines.
//!
//! A [`LineSink`] takes one fully formatted line and makes it visible immediately. Two
//! implementations cover the supported environments:
//!
//! - [`ConsoleSink`] writes straight to a stream (standard output in practice) and
//!   flushes after every line.
//! - [`BufferedSink`] accumulates text and hands the whole buffer to a platform
//!   [`Facility`] as one message when flushed. This is how lines reach logcat on Android,
//!   where every facility call becomes one log entry.
//!
//! # Choosing a sink
//!
//! [`StackLogger::detect`](crate::StackLogger::detect) picks one for the current
//! platform. Anything else can be plugged in through
//! [`StackLogger::new`](crate::StackLogger::new): a `ConsoleSink` over stderr or a file
//! handle, a `BufferedSink` over a custom [`Facility`], or a type implementing
//! [`LineSink`] directly. Wrapping a sink in an `Arc` keeps a handle to it after the
//! logger takes ownership.
//!
//! # Examples
//!
//! ```
//! use stacklog::sink::{ConsoleSink, LineSink};
//!
//! let sink = ConsoleSink::new(Vec::new());
//! sink.write_line("app::worker (worker.rs:12)\n").unwrap();
//! assert_eq!(sink.into_inner(), b"app::worker (worker.rs:12)\n");
//! ```
//!
//! # Concurrency
//!
//! Both sinks keep their state behind a `Mutex`. `BufferedSink::write_line` holds the
//! lock across append, emit and clear, so concurrent callers never see their text merged
//! into someone else's message. A poisoned lock is recovered: the protected state is
//! plain text and stays valid.

#[cfg(target_os = "android")]
pub mod logcat;

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Tag under which platform messages are emitted.
pub const TAG: &str = "stackLog";

/// Errors a sink can run into.
///
/// The logger never surfaces these to its callers; they exist so sinks can use `?` and
/// so a diagnostics channel has something to report.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The underlying stream failed to write or flush.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// The message cannot cross a C string boundary.
    #[error("message contains a NUL byte: {0}")]
    NulError(#[from] std::ffi::NulError),
    /// The platform facility reported failure with this status code.
    #[error("log facility rejected the message (status {0})")]
    Rejected(i32),
}

/// Something that accepts complete log lines.
pub trait LineSink: Send + Sync {
    /// Writes `line` and flushes it to its destination.
    fn write_line(&self, line: &str) -> Result<(), SinkError>;
}

/// Lets a sink be shared between a logger and code that still needs to reach it, such
/// as a caller that flushes a [`BufferedSink`] directly.
impl<S: LineSink + ?Sized> LineSink for Arc<S> {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        (**self).write_line(line)
    }
}

/// A platform log facility that takes whole messages under a tag.
///
/// # Examples
///
/// ```
/// use stacklog::sink::{Facility, SinkError};
///
/// struct Stderr;
///
/// impl Facility for Stderr {
///     fn emit(&self, tag: &str, message: &str) -> Result<(), SinkError> {
///         eprintln!("{}: {}", tag, message);
///         Ok(())
///     }
/// }
/// ```
pub trait Facility: Send + Sync {
    fn emit(&self, tag: &str, message: &str) -> Result<(), SinkError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes lines to a stream, flushing after each one.
#[derive(Debug)]
pub struct ConsoleSink<W> {
    stream: Mutex<W>,
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(stream: W) -> Self {
        ConsoleSink {
            stream: Mutex::new(stream),
        }
    }

    /// Gives the stream back, e.g. to inspect what an in-memory writer captured.
    pub fn into_inner(self) -> W {
        self.stream.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleSink::new(std::io::stdout())
    }
}

impl<W: Write + Send> LineSink for ConsoleSink<W> {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut stream = lock(&self.stream);
        stream.write_all(line.as_bytes())?;
        stream.flush()?;
        Ok(())
    }
}

/// Accumulates text and emits it to a [`Facility`] as one message per flush.
///
/// # Examples
///
/// ```
/// use std::sync::Mutex;
/// use stacklog::sink::{BufferedSink, Facility, LineSink, SinkError};
///
/// #[derive(Default)]
/// struct Recorder(Mutex<Vec<(String, String)>>);
///
/// impl Facility for Recorder {
///     fn emit(&self, tag: &str, message: &str) -> Result<(), SinkError> {
///         self.0.lock().unwrap().push((tag.to_string(), message.to_string()));
///         Ok(())
///     }
/// }
///
/// let sink = BufferedSink::new(Recorder::default());
/// sink.append("first half, ");
/// sink.append("second half");
/// sink.flush().unwrap();
/// sink.write_line("a line").unwrap();
///
/// let messages = sink.facility().0.lock().unwrap().clone();
/// assert_eq!(messages, vec![
///     ("stackLog".to_string(), "first half, second half".to_string()),
///     ("stackLog".to_string(), "a line".to_string()),
/// ]);
/// ```
#[derive(Debug)]
pub struct BufferedSink<F> {
    facility: F,
    buffer: Mutex<String>,
}

impl<F: Facility> BufferedSink<F> {
    pub fn new(facility: F) -> Self {
        BufferedSink {
            facility,
            buffer: Mutex::new(String::new()),
        }
    }

    pub fn facility(&self) -> &F {
        &self.facility
    }

    /// Adds text to the pending message without emitting it.
    pub fn append(&self, text: &str) {
        lock(&self.buffer).push_str(text);
    }

    /// Emits everything appended so far as one message, then clears the buffer.
    ///
    /// The buffer is cleared even if the facility fails; a message is never retried.
    pub fn flush(&self) -> Result<(), SinkError> {
        let mut buffer = lock(&self.buffer);
        self.flush_locked(&mut buffer)
    }

    fn flush_locked(&self, buffer: &mut String) -> Result<(), SinkError> {
        let result = self.facility.emit(TAG, buffer);
        buffer.clear();
        result
    }
}

impl<F: Facility> LineSink for BufferedSink<F> {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut buffer = lock(&self.buffer);
        buffer.push_str(line);
        self.flush_locked(&mut buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Facility for Failing {
        fn emit(&self, _tag: &str, _message: &str) -> Result<(), SinkError> {
            Err(SinkError::Rejected(-1))
        }
    }

    #[test]
    fn console_sink_writes_verbatim() {
        let sink = ConsoleSink::new(Vec::new());
        sink.write_line("one\n").unwrap();
        sink.write_line("two\n").unwrap();
        assert_eq!(sink.into_inner(), b"one\ntwo\n");
    }

    #[test]
    fn failed_flush_still_clears() {
        let sink = BufferedSink::new(Failing);
        sink.append("lost");
        assert!(matches!(sink.flush(), Err(SinkError::Rejected(-1))));
        assert!(lock(&sink.buffer).is_empty());
    }

    #[test]
    fn errors_describe_themselves() {
        let err = SinkError::from(std::ffi::CString::new("a\0b").unwrap_err());
        assert!(err.to_string().starts_with("message contains a NUL byte"));
        assert_eq!(
            SinkError::Rejected(-22).to_string(),
            "log facility rejected the message (status -22)"
        );
    }
}
