use serde::Serialize;

use crate::{CallSite, Details, Severity};

/// A single log event, built fresh for each facade call and handed to the
/// backend by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    severity: Severity,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Details>,
    site: CallSite,
}

impl LogRecord {
    /// Empty detail maps are normalized to absent, and details are only kept
    /// for severities that accept them.
    pub(crate) fn new(
        severity: Severity,
        message: String,
        details: Option<Details>,
        site: CallSite,
    ) -> Self {
        let details = details.filter(|d| severity.accepts_details() && !d.is_empty());
        Self {
            severity,
            message,
            details,
            site,
        }
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }

    #[must_use]
    pub const fn site(&self) -> &CallSite {
        &self.site
    }

    #[must_use]
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details;

    #[test]
    fn test_empty_details_normalized() {
        let record = LogRecord::new(
            Severity::Error,
            "boom".to_owned(),
            Some(Details::new()),
            CallSite::new("a.rs", "f", 1),
        );
        assert!(record.details().is_none());
    }

    #[test]
    fn test_details_dropped_below_error() {
        let record = LogRecord::new(
            Severity::Info,
            "connected".to_owned(),
            Some(details! { "k" => 1 }),
            CallSite::new("Net.swift", "open", 10),
        );
        assert!(record.details().is_none());
    }

    #[test]
    fn test_json_rendering() {
        let record = LogRecord::new(
            Severity::Error,
            "disk full".to_owned(),
            Some(details! { "path" => "/tmp/x" }),
            CallSite::new("Storage.swift", "write", 120),
        );
        assert_eq!(
            record.to_json_string(),
            r#"{"severity":"error","message":"disk full","details":{"path":"/tmp/x"},"site":{"file":"Storage.swift","function":"write","line":120}}"#
        );
    }
}
