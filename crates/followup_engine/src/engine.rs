use engine_logging::{engine_debug, engine_info, engine_trace, engine_warn};
use followup_core::{
    update, Effect, Msg, Observation, PulseScheduler, QueueState, QueueTiming, QueueViewModel,
    RestoreReason,
};

use crate::composer::{self, Composer};
use crate::controls::{find_send_button, find_stop_button};
use crate::surface::{OverlayEvent, Surface, SurfaceAnchors};
use crate::{
    Clock, EnglishMessages, HostPage, KeyDisposition, KeyInput, Localizer, QueueError,
    SettingsProvider, SystemClock,
};

/// Collaborators and tuning for a [`QueueEngine`].
pub struct EngineConfig {
    pub timing: QueueTiming,
    pub clock: Box<dyn Clock>,
    pub settings: Box<dyn SettingsProvider>,
    pub localizer: Box<dyn Localizer>,
}

impl EngineConfig {
    /// Default timing, system clock and the English catalogue.
    pub fn new(settings: impl SettingsProvider + 'static) -> Self {
        Self {
            timing: QueueTiming::default(),
            clock: Box::new(SystemClock::new()),
            settings: Box::new(settings),
            localizer: Box::new(EnglishMessages),
        }
    }

    pub fn with_timing(mut self, timing: QueueTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_localizer(mut self, localizer: impl Localizer + 'static) -> Self {
        self.localizer = Box::new(localizer);
        self
    }
}

/// Host elements found by one probe of the page.
struct Probe<H: HostPage> {
    composer: Option<Composer<H>>,
    stop: Option<H::Node>,
    send: Option<H::Node>,
}

/// Follow-up message queue for one host page.
///
/// All work happens in [`pulse`](Self::pulse) and the short send continuation
/// run from [`tick`](Self::tick); both are driven by the embedding layer's
/// timer and never overlap.
pub struct QueueEngine<H: HostPage> {
    host: H,
    state: QueueState,
    scheduler: PulseScheduler,
    surface: Surface,
    send_due_at: Option<u64>,
    clock: Box<dyn Clock>,
    settings: Box<dyn SettingsProvider>,
    localizer: Box<dyn Localizer>,
}

impl<H: HostPage> QueueEngine<H> {
    pub fn new(host: H, config: EngineConfig) -> Self {
        Self {
            host,
            state: QueueState::with_timing(config.timing),
            scheduler: PulseScheduler::new(config.timing.min_pulse_gap_ms),
            surface: Surface::new(),
            send_due_at: None,
            clock: config.clock,
            settings: config.settings,
            localizer: config.localizer,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> &QueueState {
        &self.state
    }

    pub fn view(&self) -> QueueViewModel {
        self.state.view()
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.extension_enabled() && self.settings.queue_enabled()
    }

    pub fn has_work(&self) -> bool {
        self.state.has_work()
    }

    /// Requests a pulse in `delay_ms`, coalesced with any already scheduled.
    pub fn schedule_pulse(&mut self, delay_ms: u64) {
        if !self.is_enabled() {
            return;
        }
        let now = self.clock.now_ms();
        let due = self.scheduler.schedule(now, delay_ms);
        engine_trace!("pulse requested in {delay_ms}ms, due at {due}");
    }

    /// Earliest time at which [`tick`](Self::tick) has work to do.
    pub fn next_wakeup(&self) -> Option<u64> {
        match (self.scheduler.due_at(), self.send_due_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Timer entry point: runs the send continuation and the pulse if due.
    /// Returns whether anything ran.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        let mut ran = false;
        if self.send_due_at.is_some_and(|due| now >= due) {
            self.send_due_at = None;
            self.continue_send();
            ran = true;
        }
        if self.scheduler.is_due(now) {
            self.pulse();
            ran = true;
        }
        ran
    }

    /// One reconciliation pass. Lookup misses skip steps; nothing here fails.
    pub fn pulse(&mut self) {
        let now = self.clock.now_ms();
        let Some(seq) = self.scheduler.begin(now) else {
            self.scheduler.schedule(now, 0);
            return;
        };
        engine_logging::set_pulse_seq(seq);

        if !self.is_enabled() {
            if self.state.has_work() || self.surface.is_visible() {
                engine_info!("queue disabled; dropping queued work");
                self.shutdown();
            }
            self.scheduler.finish();
            return;
        }

        let probe = self.probe();
        let observation = Observation {
            origin: self.host.origin(),
            generating: probe.stop.is_some(),
            composer: probe.composer.as_ref().map(|c| c.get_text(&self.host)),
            now_ms: now,
        };
        engine_debug!(
            "observed origin={} generating={} composer={} queued={}",
            observation.origin,
            observation.generating,
            observation.composer.is_some(),
            self.state.queue_len()
        );

        self.dispatch(Msg::Pulse(observation));
        self.refresh_surface();
        self.scheduler.finish();
    }

    /// Clears queue, in-flight send and overlay. Key handling stays wired up.
    pub fn shutdown(&mut self) {
        self.dispatch(Msg::Reset);
        self.scheduler.cancel();
        self.send_due_at = None;
        self.surface.clear(&mut self.host);
        engine_debug!("engine reset");
    }

    /// Queues the current composer text. Returns `false` if it was blank.
    pub fn enqueue_from_composer(&mut self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let Some(composer) = composer::find_active(&self.host) else {
            engine_debug!("enqueue requested without a composer");
            return false;
        };
        let text = composer.get_text(&self.host);
        self.enqueue_text(text)
    }

    /// Keyboard-intercept policy: a plain Enter in the composer while the host
    /// is generating is queued instead of submitted.
    pub fn handle_key(&mut self, input: &KeyInput<H::Node>) -> KeyDisposition {
        if !input.is_plain_submit() || !self.is_enabled() {
            return KeyDisposition::PassThrough;
        }
        let Some(composer) = composer::find_from_event_target(&self.host, &input.target) else {
            return KeyDisposition::PassThrough;
        };
        let form = composer::get_form(&self.host, composer.node());
        if find_stop_button(&self.host, form.as_ref()).is_none() {
            return KeyDisposition::PassThrough;
        }

        let text = composer.get_text(&self.host);
        if !self.enqueue_text(text) {
            engine_debug!("blank submit while generating ignored");
        }
        KeyDisposition::Intercepted
    }

    pub fn handle_overlay_event(&mut self, event: OverlayEvent) {
        match event {
            OverlayEvent::ToggleClicked => {
                self.enqueue_from_composer();
            }
            OverlayEvent::RemoveClicked(index) => {
                engine_info!("removing queued message #{index}");
                self.dispatch(Msg::RemoveAt(index));
                self.refresh_surface();
            }
        }
    }

    /// The host UI tree changed.
    pub fn on_host_mutation(&mut self) {
        let delay = self.state.timing().mutation_pulse_delay_ms;
        self.schedule_pulse(delay);
    }

    pub fn on_settings_changed(&mut self) {
        if self.is_enabled() {
            self.schedule_pulse(0);
        } else {
            self.shutdown();
        }
    }

    fn enqueue_text(&mut self, text: String) -> bool {
        let last_id = |state: &QueueState| state.queued().last().map(|m| m.id);
        let before = last_id(&self.state);
        let msg = Msg::Enqueue {
            text,
            origin: self.host.origin(),
            at_ms: self.clock.now_ms(),
            display_time: self.clock.display_time(),
        };
        self.dispatch(msg);

        let queued = last_id(&self.state) != before;
        if queued {
            engine_info!("queued follow-up, {} waiting", self.state.queue_len());
            self.refresh_surface();
        }
        queued
    }

    fn continue_send(&mut self) {
        if !self.is_enabled() {
            return;
        }
        let origin = self.host.origin();
        self.dispatch(Msg::SendDue { origin });
        self.refresh_surface();
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::StageText { text } => {
                engine_info!("replaying queued message ({} chars)", text.chars().count());
                if let Err(err) = self.write_composer(&text) {
                    engine_warn!("staging queued text: {err}");
                }
            }
            Effect::DeferSend { delay_ms } => {
                self.send_due_at = Some(self.clock.now_ms() + delay_ms);
            }
            Effect::DispatchSend => {
                let at_ms = self.clock.now_ms();
                let ok = match self.dispatch_send() {
                    Ok(()) => true,
                    Err(err) => {
                        engine_warn!("send attempt failed: {err}");
                        false
                    }
                };
                self.dispatch(Msg::SendDispatched { ok, at_ms });
            }
            Effect::RestoreDraft {
                draft,
                staged_text,
                reason,
            } => self.restore_draft(&draft, &staged_text, reason),
            Effect::ClearComposer => {
                if let Err(err) = self.write_composer("") {
                    engine_warn!("clearing composer: {err}");
                }
            }
            Effect::SchedulePulse { delay_ms } => self.schedule_pulse(delay_ms),
        }
    }

    fn probe(&self) -> Probe<H> {
        let composer = composer::find_active(&self.host);
        let form = composer
            .as_ref()
            .and_then(|c| composer::get_form(&self.host, c.node()));
        let stop = find_stop_button(&self.host, form.as_ref());
        let send = match stop {
            Some(_) => None,
            None => find_send_button(&self.host, form.as_ref()),
        };
        Probe {
            composer,
            stop,
            send,
        }
    }

    fn refresh_surface(&mut self) {
        let probe = self.probe();
        let anchors = SurfaceAnchors {
            control: probe
                .stop
                .or(probe.send)
                .map(|node| self.host.bounds(&node)),
            composer: probe.composer.map(|c| self.host.bounds(c.node())),
        };
        let view = self.state.view();
        self.surface
            .refresh(&mut self.host, &view, anchors, self.localizer.as_ref());
    }

    fn write_composer(&mut self, text: &str) -> Result<(), QueueError> {
        let composer =
            composer::find_active(&self.host).ok_or(QueueError::LookupMiss("composer"))?;
        composer.set_text(&mut self.host, text)
    }

    fn dispatch_send(&mut self) -> Result<(), QueueError> {
        let composer =
            composer::find_active(&self.host).ok_or(QueueError::LookupMiss("composer"))?;
        let form = composer::get_form(&self.host, composer.node());

        if let Some(button) = find_send_button(&self.host, form.as_ref()) {
            if self.host.is_disabled(&button) {
                return Err(QueueError::LookupMiss("enabled send control"));
            }
            return if self.host.click(&button) {
                Ok(())
            } else {
                Err(QueueError::SendRejected)
            };
        }

        let form = form.ok_or(QueueError::LookupMiss("send control"))?;
        if self.host.request_submit(&form) {
            Ok(())
        } else {
            Err(QueueError::SendRejected)
        }
    }

    /// Puts `draft` back unless the composer holds newer typing.
    fn restore_draft(&mut self, draft: &str, staged_text: &str, reason: RestoreReason) {
        match reason {
            RestoreReason::Confirmed => engine_info!("queued message confirmed"),
            RestoreReason::Removed | RestoreReason::Reset => {
                engine_debug!("unwinding send ({reason:?})")
            }
            _ => engine_warn!("unwinding send ({reason:?})"),
        }

        let Some(composer) = composer::find_active(&self.host) else {
            engine_debug!("no composer to restore the draft into");
            return;
        };
        let current = composer.get_text(&self.host);
        if current == draft {
            return;
        }
        let current = current.trim();
        if !current.is_empty() && current != staged_text.trim() {
            engine_info!("composer holds newer text; draft not restored");
            return;
        }
        if let Err(err) = composer.set_text(&mut self.host, draft) {
            engine_warn!("restoring draft: {err}");
        }
    }
}
