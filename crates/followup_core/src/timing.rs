use serde::{Deserialize, Serialize};

/// Timing constants for reconciliation and replay.
///
/// The defaults are tuned against one host's rendering latency; every field can
/// be overridden from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueTiming {
    /// Minimum spacing between two pulses.
    pub min_pulse_gap_ms: u64,
    /// A dispatched send not observed as generating within this window is failed.
    pub confirm_timeout_ms: u64,
    /// Delay between staging text and the first send attempt.
    pub redraw_delay_ms: u64,
    /// Delay between two send attempts for the same staged text.
    pub send_retry_spacing_ms: u64,
    /// Send attempts per staged message before the draft is restored.
    pub max_send_attempts: u8,
    /// Pulse delay after a failed send or a missing composer.
    pub retry_pulse_ms: u64,
    /// Follow-up pulse delay while there is queued or in-flight work.
    pub watch_interval_ms: u64,
    /// Pulse delay requested by a host mutation notification.
    pub mutation_pulse_delay_ms: u64,
    /// Maximum characters of a queued message shown in the panel.
    pub preview_chars: usize,
}

impl Default for QueueTiming {
    fn default() -> Self {
        Self {
            min_pulse_gap_ms: 220,
            confirm_timeout_ms: 2_600,
            redraw_delay_ms: 34,
            send_retry_spacing_ms: 140,
            max_send_attempts: 2,
            retry_pulse_ms: 700,
            watch_interval_ms: 400,
            mutation_pulse_delay_ms: 90,
            preview_chars: 140,
        }
    }
}
