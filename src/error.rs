// 🚨 Error Taxonomy - Fatal failure categories for the report pipeline
// Every error aborts the run; there are no retries and no partial results.

use thiserror::Error;

/// Report pipeline error type
#[derive(Debug, Error)]
pub enum ReportError {
    /// Input data source missing or not parseable as JSON
    #[error("Input not found: {0}")]
    InputNotFound(String),

    /// A record's price is unparsable, or the record set is empty
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The document renderer failed to persist the report
    #[error("Render failed: {0}")]
    Render(String),

    /// Message construction or SMTP delivery failed
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl ReportError {
    /// Create an input-not-found error
    pub fn input_not_found(msg: impl Into<String>) -> Self {
        Self::InputNotFound(msg.into())
    }

    /// Create a malformed-record error
    pub fn malformed_record(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Create a delivery error
    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }
}
