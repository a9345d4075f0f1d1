//! Error reporting contract
//!
//! Backend and network failures surface through one callback. Callers that
//! supply none still work: messages go to the log instead.

/// Receives user-facing error messages
#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporter: Send + Sync {
    fn report_error(&self, message: &str);
}

/// Reporter that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report_error(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Report through `reporter`, falling back to the log
pub fn report(reporter: Option<&dyn ErrorReporter>, message: &str) {
    match reporter {
        Some(r) => r.report_error(message),
        None => LogReporter.report_error(message),
    }
}
