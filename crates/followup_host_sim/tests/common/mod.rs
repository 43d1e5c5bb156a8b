#![allow(dead_code)]

use followup_engine::{EngineConfig, KeyInput, QueueEngine, SharedSettings};
use followup_host_sim::{ManualClock, SimPage};

pub const CHAT: &str = "https://chat.example/c/first";
pub const OTHER_CHAT: &str = "https://chat.example/c/second";

pub struct Harness {
    pub engine: QueueEngine<SimPage>,
    pub clock: ManualClock,
    pub settings: SharedSettings,
}

impl Harness {
    pub fn new(page: SimPage) -> Self {
        engine_logging::initialize_for_tests();
        let clock = ManualClock::new(10_000);
        let settings = SharedSettings::new(true, true);
        let config = EngineConfig::new(settings.clone()).with_clock(clock.clone());
        Self {
            engine: QueueEngine::new(page, config),
            clock,
            settings,
        }
    }

    pub fn page(&self) -> &SimPage {
        self.engine.host()
    }

    pub fn page_mut(&mut self) -> &mut SimPage {
        self.engine.host_mut()
    }

    pub fn advance(&mut self, ms: u64) {
        followup_host_sim::advance(&mut self.engine, &self.clock, ms);
    }

    pub fn advance_until(
        &mut self,
        max_ms: u64,
        done: impl FnMut(&QueueEngine<SimPage>) -> bool,
    ) -> bool {
        followup_host_sim::advance_until(&mut self.engine, &self.clock, max_ms, done)
    }

    /// Types `text` and presses plain Enter in the composer.
    pub fn submit(&mut self, text: &str) -> followup_engine::KeyDisposition {
        self.page_mut().type_text(text);
        let composer = self.page().composer_node().expect("fixture has a composer");
        self.engine.handle_key(&KeyInput::enter(composer))
    }

    pub fn queued(&self) -> Vec<String> {
        self.engine.state().queued_texts()
    }
}
