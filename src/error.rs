use thiserror::Error;

/// Errors reported by [`StreamSummary`](crate::StreamSummary).
///
/// Both variants are caller contract violations detected before any state
/// changes. Evictions and overestimation during normal ingestion are never
/// errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// The summary was configured with a capacity of zero.
    #[error("{name} must be positive, got {value}")]
    Configuration { name: &'static str, value: usize },

    /// An absent value was offered to the summary.
    #[error("{0} is absent")]
    InvalidArgument(&'static str),
}
