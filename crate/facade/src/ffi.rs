//! C ABI for foreign call sites.
//!
//! Strings cross the boundary as NUL-terminated UTF-8. A NULL string reads as
//! empty and invalid UTF-8 is replaced lossily. Details travel as a JSON
//! object; anything else is reported through `tracing` and left out of the
//! record.

use std::{
    ffi::{c_char, CStr, CString},
    panic::{catch_unwind, AssertUnwindSafe},
    ptr,
    sync::Arc,
};

use tracing::warn;

use crate::{facade, CallSite, Details, LogBackend, LogRecord, Severity, TracingBackend};

/// Foreign sink invoked once per record.
///
/// `details_json` is NULL when the record has no details. All pointers are
/// only valid for the duration of the call.
pub type LogCallback = unsafe extern "C" fn(
    severity: u8,
    message: *const c_char,
    details_json: *const c_char,
    file: *const c_char,
    function: *const c_char,
    line: u32,
);

/// Hands records to a foreign [`LogCallback`].
#[derive(Debug, Clone, Copy)]
pub struct CallbackBackend {
    callback: LogCallback,
}

impl CallbackBackend {
    #[must_use]
    pub const fn new(callback: LogCallback) -> Self {
        Self { callback }
    }
}

fn to_c_string(s: &str) -> CString {
    CString::new(s.replace('\0', "")).unwrap_or_default()
}

impl LogBackend for CallbackBackend {
    fn deliver(&self, record: LogRecord) {
        let message = to_c_string(record.message());
        let details = record
            .details()
            .map(|details| to_c_string(&details.to_json_string()));
        let file = to_c_string(&record.site().file);
        let function = to_c_string(&record.site().function);
        // SAFETY: every pointer outlives the call and is NUL-terminated
        unsafe {
            (self.callback)(
                record.severity().code(),
                message.as_ptr(),
                details.as_ref().map_or(ptr::null(), |d| d.as_ptr()),
                file.as_ptr(),
                function.as_ptr(),
                record.site().line,
            );
        }
    }
}

unsafe fn read_str(s: *const c_char) -> String {
    if s.is_null() {
        return String::new();
    }
    CStr::from_ptr(s).to_string_lossy().into_owned()
}

unsafe fn read_details(details_json: *const c_char) -> Option<Details> {
    if details_json.is_null() {
        return None;
    }
    let json = read_str(details_json);
    if json.trim().is_empty() {
        return None;
    }
    match Details::from_json_str(&json) {
        Ok(details) => Some(details),
        Err(e) => {
            warn!("ignoring log details that are not a JSON object: {e}");
            None
        }
    }
}

unsafe fn dispatch(
    severity: Severity,
    message: *const c_char,
    details_json: *const c_char,
    file: *const c_char,
    function: *const c_char,
    line: u32,
) {
    // unwinding across the C ABI aborts the process; a subscriber reached
    // through `warn!` or a backend may panic
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let message = read_str(message);
        let details = if severity.accepts_details() {
            read_details(details_json)
        } else {
            None
        };
        let site = CallSite::new(read_str(file), read_str(function), line);
        facade().log(severity, message, details, site);
    }));
}

/// # Safety
/// Every non-NULL pointer must reference a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mxlog_verbose(
    message: *const c_char,
    file: *const c_char,
    function: *const c_char,
    line: u32,
) {
    dispatch(Severity::Verbose, message, ptr::null(), file, function, line);
}

/// # Safety
/// Every non-NULL pointer must reference a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mxlog_debug(
    message: *const c_char,
    file: *const c_char,
    function: *const c_char,
    line: u32,
) {
    dispatch(Severity::Debug, message, ptr::null(), file, function, line);
}

/// # Safety
/// Every non-NULL pointer must reference a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mxlog_info(
    message: *const c_char,
    file: *const c_char,
    function: *const c_char,
    line: u32,
) {
    dispatch(Severity::Info, message, ptr::null(), file, function, line);
}

/// # Safety
/// Every non-NULL pointer must reference a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mxlog_warning(
    message: *const c_char,
    file: *const c_char,
    function: *const c_char,
    line: u32,
) {
    dispatch(Severity::Warning, message, ptr::null(), file, function, line);
}

/// # Safety
/// Every non-NULL pointer must reference a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mxlog_error(
    message: *const c_char,
    details_json: *const c_char,
    file: *const c_char,
    function: *const c_char,
    line: u32,
) {
    dispatch(Severity::Error, message, details_json, file, function, line);
}

/// # Safety
/// Every non-NULL pointer must reference a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mxlog_failure(
    message: *const c_char,
    details_json: *const c_char,
    file: *const c_char,
    function: *const c_char,
    line: u32,
) {
    dispatch(Severity::Failure, message, details_json, file, function, line);
}

/// Register `callback` as the process-wide backend. NULL unregisters the
/// current backend.
#[no_mangle]
pub extern "C" fn mxlog_set_callback(callback: Option<LogCallback>) {
    match callback {
        Some(callback) => {
            facade().set_backend(Arc::new(CallbackBackend::new(callback)));
        }
        None => {
            facade().clear_backend();
        }
    }
}

/// Register a [`TracingBackend`] as the process-wide backend.
#[no_mangle]
pub extern "C" fn mxlog_use_tracing_backend() {
    facade().set_backend(Arc::new(TracingBackend));
}
