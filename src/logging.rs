//! The crate's own diagnostics.
//!
//! # Overview
//!
//! stacklog never reports failures to its callers, but a logger that silently drops
//! lines is hard to debug. When diagnostics are enabled, lines dropped because a sink
//! failed are described here instead:
//!
//! - for the process-wide logger, with the `diagnostics` cargo feature
//! - for a hand-built logger, with
//!   [`StackLogger::with_diagnostics`](crate::StackLogger::with_diagnostics)
//!
//! # Platform Behavior
//!
//! Messages go to stderr, never to the sink being diagnosed: the console sink writes to
//! stdout, and the platform sink may be the very thing that is failing. On Android
//! stderr is usually discarded, so diagnostics are mainly useful on the desktop.
//!
//! # Examples
//!
//! ```
//! # mod logging {
//! #     pub fn log(str: &str) {
//! #         eprintln!("stacklog: {}", str);
//! #     }
//! # }
//! # use logging::log;
//! log("discarded log line: IO error: broken pipe");
//! ```

use crate::sink::SinkError;

/// Writes one diagnostic line to stderr, prefixed with the crate name.
///
/// # Examples
///
/// ```
/// # mod logging {
/// #     pub fn log(str: &str) {
/// #         eprintln!("stacklog: {}", str);
/// #     }
/// # }
/// # use logging::log;
/// let status = -22;
/// log(&format!("log facility rejected the message (status {})", status));
/// ```
pub fn log(str: &str) {
    eprintln!("stacklog: {}", str);
}

/// Reports a sink error that the logger is about to drop.
pub fn discarded(error: &SinkError) {
    log(&format!("discarded log line: {}", error));
}
