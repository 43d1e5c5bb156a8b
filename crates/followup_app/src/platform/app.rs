use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use followup_engine::{
    Clock, EngineConfig, HostPage, KeyDisposition, KeyInput, QueueEngine, SharedSettings,
    SystemClock,
};
use followup_host_sim::{SimPage, TEXTAREA_FIXTURE};

use super::config::{self, FollowupConfig, DEFAULT_CONFIG_PATH};
use super::logging;

const DEMO_ORIGIN: &str = "https://chat.example/c/demo";
const TICK: Duration = Duration::from_millis(10);
/// How long the simulated host takes to answer one message.
const ANSWER_MS: u64 = 800;
const SESSION_LIMIT_MS: u64 = 15_000;

enum Action {
    /// Type and press Enter.
    Submit(&'static str),
    /// Type without submitting.
    Type(&'static str),
}

const SCRIPT: &[(u64, Action)] = &[
    (0, Action::Submit("What does the borrow checker actually check?")),
    (150, Action::Submit("Show a minimal example that fails to compile.")),
    (300, Action::Submit("Now fix it with a lifetime annotation.")),
    (450, Action::Type("note to self: ask about Pin")),
];

pub fn run_app() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let (config, load_error) = match config::load(&path) {
        Ok(config) => (config, None),
        Err(err) => (FollowupConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination);
    if let Some(err) = load_error {
        engine_warn!("using default configuration: {err:#}");
    }

    let clock = SystemClock::new();
    let settings = SharedSettings::new(config.queue_enabled, config.extension_enabled);
    let engine_config = EngineConfig::new(settings)
        .with_timing(config.timing)
        .with_clock(clock);
    let mut engine = QueueEngine::new(SimPage::new(TEXTAREA_FIXTURE, DEMO_ORIGIN), engine_config);
    engine_info!("demo session started, queue enabled: {}", engine.is_enabled());

    run_session(&mut engine, &clock);

    let page = engine.host();
    println!("Sent {} message(s):", page.sent().len());
    for (n, message) in page.sent().iter().enumerate() {
        println!("  {}. {}", n + 1, message.text);
    }
    println!("Composer: {:?}", page.composer_text());
    println!("Still queued: {}", engine.state().queue_len());
    Ok(())
}

/// Plays the script in real time until the queue drains and the host is idle.
fn run_session(engine: &mut QueueEngine<SimPage>, clock: &SystemClock) {
    let mut script = SCRIPT.iter().peekable();
    let mut answering_since: Option<u64> = None;

    loop {
        let now = clock.now_ms();
        while let Some((_, action)) = script.next_if(|(at, _)| *at <= now) {
            perform(engine, action);
        }

        let page = engine.host_mut();
        match (page.is_generating(), answering_since) {
            (true, None) => answering_since = Some(now),
            (true, Some(since)) if now.saturating_sub(since) >= ANSWER_MS => {
                page.set_generating(false);
                answering_since = None;
            }
            (false, _) => answering_since = None,
            _ => {}
        }

        if engine.host_mut().take_mutated() {
            engine.on_host_mutation();
        }
        engine.tick();

        let idle = !engine.has_work() && !engine.host().is_generating();
        if script.peek().is_none() && idle {
            break;
        }
        if now > SESSION_LIMIT_MS {
            engine_warn!("session limit reached with {} queued", engine.state().queue_len());
            break;
        }
        thread::sleep(TICK);
    }
}

fn perform(engine: &mut QueueEngine<SimPage>, action: &Action) {
    match action {
        Action::Type(text) => engine.host_mut().type_text(text),
        Action::Submit(text) => {
            engine.host_mut().type_text(text);
            let Some(composer) = engine.host().composer_node() else {
                return;
            };
            if engine.handle_key(&KeyInput::enter(composer)) == KeyDisposition::PassThrough {
                // The host's own Enter handling.
                if let Some(send) = engine.host().send_node() {
                    engine.host_mut().click(&send);
                }
            }
        }
    }
}
