use std::time::Instant;

/// Time source for the engine.
pub trait Clock {
    /// Monotonic milliseconds.
    fn now_ms(&self) -> u64;

    /// Wall-clock time shown next to queued messages.
    fn display_time(&self) -> String {
        chrono::Local::now().format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
