use std::fmt;

use serde::{Deserialize, Serialize};

/// Where in source a log event originated.
///
/// The facade never inspects or rewrites these fields: whatever the caller
/// captured is what the backend receives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallSite {
    pub file: String,
    pub function: String,
    pub line: u32,
}

impl CallSite {
    pub fn new(file: impl Into<String>, function: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
            line,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.file, self.line, self.function)
    }
}

/// Helper macro to extract the enclosing function name at the call site
#[doc(hidden)]
#[macro_export]
macro_rules! __fn_name {
    () => {{
        let type_name = ::std::any::type_name_of_val(&|| {});
        type_name
            .rsplit("::")
            .find(|&part| part != "{{closure}}")
            .unwrap_or("unknown")
    }};
}

/// Build a [`CallSite`] for the current source location.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(::core::file!(), $crate::__fn_name!(), ::core::line!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_site_macro() {
        let site = crate::call_site!();
        assert_eq!(site.file, file!());
        assert_eq!(site.function, "test_call_site_macro");
        assert!(site.line > 0);
    }

    #[test]
    fn test_call_site_in_closure() {
        let capture = || crate::call_site!();
        assert_eq!(capture().function, "test_call_site_in_closure");
    }

    #[test]
    fn test_display() {
        let site = CallSite::new("Storage.swift", "write", 120);
        assert_eq!(site.to_string(), "Storage.swift:120 write");
    }
}
