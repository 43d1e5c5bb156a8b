use thiserror::Error;

/// Failures inside a single engine step. None of these escape a pulse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// A required host element is absent; the step is retried later.
    #[error("{0} not found")]
    LookupMiss(&'static str),
    /// A programmatic text write left the composer unchanged.
    #[error("composer write had no effect")]
    WriteFailure,
    /// The host refused the click or form submission.
    #[error("host rejected the submission")]
    SendRejected,
}
