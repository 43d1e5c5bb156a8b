/// Coalesces pulse requests into at most one future pulse.
///
/// Requests never schedule a second timer: an earlier-or-equal due time wins,
/// and a later one is pulled forward, but never closer than `min_gap_ms` to the
/// previous pulse. Time is caller-supplied milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseScheduler {
    min_gap_ms: u64,
    due_at: Option<u64>,
    last_pulse_at: Option<u64>,
    running: bool,
    pulses: u64,
}

impl PulseScheduler {
    pub fn new(min_gap_ms: u64) -> Self {
        Self {
            min_gap_ms,
            due_at: None,
            last_pulse_at: None,
            running: false,
            pulses: 0,
        }
    }

    /// Requests a pulse `delay_ms` from `now_ms` and returns the effective due time.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64) -> u64 {
        let mut target = now_ms.saturating_add(delay_ms);
        if let Some(last) = self.last_pulse_at {
            target = target.max(last.saturating_add(self.min_gap_ms));
        }
        match self.due_at {
            Some(existing) if existing <= target => existing,
            _ => {
                self.due_at = Some(target);
                target
            }
        }
    }

    pub fn due_at(&self) -> Option<u64> {
        self.due_at
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        !self.running && self.due_at.is_some_and(|due| now_ms >= due)
    }

    /// Marks a pulse as started. Returns `None` if one is already running.
    pub fn begin(&mut self, now_ms: u64) -> Option<u64> {
        if self.running {
            return None;
        }
        self.running = true;
        self.due_at = None;
        self.last_pulse_at = Some(now_ms);
        self.pulses += 1;
        Some(self.pulses)
    }

    pub fn finish(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Drops any scheduled pulse.
    pub fn cancel(&mut self) {
        self.due_at = None;
    }
}
