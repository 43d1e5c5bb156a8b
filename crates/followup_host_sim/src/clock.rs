use std::cell::Cell;
use std::rc::Rc;

use followup_engine::{Clock, QueueEngine};

use crate::SimPage;

/// Hand-advanced clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    pub fn now(&self) -> u64 {
        self.now_ms.get()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn display_time(&self) -> String {
        let minutes = self.now_ms.get() / 60_000;
        format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
    }
}

const STEP_MS: u64 = 10;

/// Runs the engine's timer for `total_ms`, forwarding page mutations.
pub fn advance(engine: &mut QueueEngine<SimPage>, clock: &ManualClock, total_ms: u64) {
    let mut elapsed = 0;
    while elapsed < total_ms {
        step(engine, clock);
        elapsed += STEP_MS;
    }
}

/// Like [`advance`], but stops as soon as `done` holds. Returns whether it did.
pub fn advance_until(
    engine: &mut QueueEngine<SimPage>,
    clock: &ManualClock,
    max_ms: u64,
    mut done: impl FnMut(&QueueEngine<SimPage>) -> bool,
) -> bool {
    let mut elapsed = 0;
    while elapsed < max_ms {
        if done(engine) {
            return true;
        }
        step(engine, clock);
        elapsed += STEP_MS;
    }
    done(engine)
}

fn step(engine: &mut QueueEngine<SimPage>, clock: &ManualClock) {
    clock.advance(STEP_MS);
    if engine.host_mut().take_mutated() {
        engine.on_host_mutation();
    }
    engine.tick();
}
