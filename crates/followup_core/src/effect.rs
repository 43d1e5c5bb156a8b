#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the composer content with a queued message.
    StageText { text: String },
    /// Run the send continuation after `delay_ms`.
    DeferSend { delay_ms: u64 },
    /// Invoke the send control, or submit the composer form.
    DispatchSend,
    /// Put the user's draft back into the composer.
    ///
    /// Skipped by the executor when the composer holds something other than
    /// `staged_text` or nothing at all, since that is newer typing.
    RestoreDraft {
        draft: String,
        staged_text: String,
        reason: RestoreReason,
    },
    ClearComposer,
    SchedulePulse { delay_ms: u64 },
}

/// Why a staged or pending send is being unwound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreReason {
    /// Generation started: the send went through.
    Confirmed,
    /// Generation never started within the confirmation window.
    TimedOut,
    /// The send control could not be invoked.
    SendFailed,
    /// The host started generating before the staged text was sent.
    Interrupted,
    /// The conversation changed underneath the send.
    Navigation,
    /// The user removed the message being sent.
    Removed,
    /// The engine was shut down.
    Reset,
}
