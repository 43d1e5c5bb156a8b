use crate::state::{PendingSend, StagedSend};
use crate::{Effect, Msg, Observation, QueueState, RestoreReason};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: QueueState, msg: Msg) -> (QueueState, Vec<Effect>) {
    let effects = match msg {
        Msg::Pulse(observation) => reconcile(&mut state, observation),
        Msg::SendDue { origin } => send_due(&mut state, &origin),
        Msg::SendDispatched { ok, at_ms } => send_dispatched(&mut state, ok, at_ms),
        Msg::Enqueue {
            text,
            origin,
            at_ms,
            display_time,
        } => {
            let text = text.trim();
            // The composer holds the replay text while a send is in flight.
            if text.is_empty() || state.in_flight_text() == Some(text) {
                return (state, Vec::new());
            }
            // A submit racing a navigation lands in the new conversation only.
            let mut effects = state.observe_origin(&origin);
            state.push_message(text.to_owned(), origin, at_ms, display_time);
            effects.push(Effect::ClearComposer);
            effects.push(Effect::SchedulePulse { delay_ms: 0 });
            effects
        }
        Msg::RemoveAt(index) => remove_at(&mut state, index),
        Msg::Reset => {
            let effects = state.discard_all(RestoreReason::Reset);
            state.forget_origin();
            effects
        }
    };

    (state, effects)
}

fn reconcile(state: &mut QueueState, observation: Observation) -> Vec<Effect> {
    let timing = *state.timing();
    let Observation {
        origin,
        generating,
        composer,
        now_ms,
    } = observation;

    let mut effects = state.observe_origin(&origin);
    state.set_generating(generating);
    // A send unwound in this pulse is retried by a later pulse, after its
    // draft restore has run, so the restored draft is what gets captured.
    let mut unwound = false;

    if let Some(pending) = state.take_pending() {
        if pending.origin != origin {
            effects.push(restore_pending(pending, RestoreReason::Navigation));
        } else if generating {
            state.remove_message(pending.message_id);
            effects.push(restore_pending(pending, RestoreReason::Confirmed));
        } else if now_ms.saturating_sub(pending.attempted_at_ms) > timing.confirm_timeout_ms {
            effects.push(restore_pending(pending, RestoreReason::TimedOut));
            unwound = true;
            effects.push(Effect::SchedulePulse {
                delay_ms: timing.retry_pulse_ms,
            });
        } else {
            state.set_pending(pending);
        }
    }

    if let Some(staged) = state.take_staged() {
        if staged.origin != origin {
            effects.push(restore_staged(staged, RestoreReason::Navigation));
        } else if generating {
            effects.push(restore_staged(staged, RestoreReason::Interrupted));
            unwound = true;
        } else if now_ms.saturating_sub(staged.staged_at_ms) > timing.confirm_timeout_ms {
            effects.push(restore_staged(staged, RestoreReason::SendFailed));
            effects.push(Effect::SchedulePulse {
                delay_ms: timing.retry_pulse_ms,
            });
            unwound = true;
        } else {
            state.set_staged(staged);
        }
    }

    let ready =
        !generating && !unwound && state.pending().is_none() && state.staged().is_none();
    let head = state.head().map(|m| (m.id, m.text.clone()));
    if let Some((message_id, text)) = head.filter(|_| ready) {
        match composer {
            Some(draft) => {
                state.set_staged(StagedSend {
                    message_id,
                    text: text.clone(),
                    draft,
                    origin,
                    staged_at_ms: now_ms,
                    attempts: 0,
                });
                effects.push(Effect::StageText { text });
                effects.push(Effect::DeferSend {
                    delay_ms: timing.redraw_delay_ms,
                });
            }
            None => effects.push(Effect::SchedulePulse {
                delay_ms: timing.retry_pulse_ms,
            }),
        }
    }

    if state.has_work() {
        effects.push(Effect::SchedulePulse {
            delay_ms: timing.watch_interval_ms,
        });
    }
    effects
}

fn send_due(state: &mut QueueState, origin: &str) -> Vec<Effect> {
    let staged_origin = state.staged().map(|s| s.origin.clone());
    match staged_origin {
        None => Vec::new(),
        Some(staged_origin) if staged_origin != origin => state.observe_origin(origin),
        Some(_) => vec![Effect::DispatchSend],
    }
}

fn send_dispatched(state: &mut QueueState, ok: bool, at_ms: u64) -> Vec<Effect> {
    let timing = *state.timing();
    let Some(mut staged) = state.take_staged() else {
        return Vec::new();
    };

    if ok {
        state.set_pending(PendingSend {
            message_id: staged.message_id,
            text: staged.text,
            draft_to_restore: staged.draft,
            origin: staged.origin,
            attempted_at_ms: at_ms,
        });
        return vec![Effect::SchedulePulse {
            delay_ms: timing.min_pulse_gap_ms,
        }];
    }

    staged.attempts = staged.attempts.saturating_add(1);
    if staged.attempts < timing.max_send_attempts {
        state.set_staged(staged);
        vec![Effect::DeferSend {
            delay_ms: timing.send_retry_spacing_ms,
        }]
    } else {
        vec![
            restore_staged(staged, RestoreReason::SendFailed),
            Effect::SchedulePulse {
                delay_ms: timing.retry_pulse_ms,
            },
        ]
    }
}

fn remove_at(state: &mut QueueState, index: usize) -> Vec<Effect> {
    let Some(removed) = state.remove_at(index) else {
        return Vec::new();
    };
    let mut effects = Vec::new();
    if state.staged().is_some_and(|s| s.message_id == removed.id) {
        if let Some(staged) = state.take_staged() {
            effects.push(restore_staged(staged, RestoreReason::Removed));
        }
    }
    effects.push(Effect::SchedulePulse { delay_ms: 0 });
    effects
}

fn restore_staged(staged: StagedSend, reason: RestoreReason) -> Effect {
    Effect::RestoreDraft {
        draft: staged.draft,
        staged_text: staged.text,
        reason,
    }
}

fn restore_pending(pending: PendingSend, reason: RestoreReason) -> Effect {
    Effect::RestoreDraft {
        draft: pending.draft_to_restore,
        staged_text: pending.text,
        reason,
    }
}
