//! Android logcat, through liblog.

use super::{Facility, SinkError};
use std::ffi::{CString, c_char, c_int};

/// `ANDROID_LOG_DEBUG` from `<android/log.h>`.
const ANDROID_LOG_DEBUG: c_int = 3;

#[link(name = "log")]
unsafe extern "C" {
    fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
}

/// Emits each message as one debug-priority logcat entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct Logcat;

impl Facility for Logcat {
    fn emit(&self, tag: &str, message: &str) -> Result<(), SinkError> {
        let tag = CString::new(tag)?;
        let text = CString::new(message)?;
        // SAFETY: both pointers are valid NUL-terminated strings for the whole call.
        let status =
            unsafe { __android_log_write(ANDROID_LOG_DEBUG, tag.as_ptr(), text.as_ptr()) };
        if status < 0 {
            return Err(SinkError::Rejected(status));
        }
        Ok(())
    }
}
