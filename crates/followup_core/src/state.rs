use std::collections::VecDeque;

use crate::view_model::{QueueItemView, QueueViewModel};
use crate::{Effect, QueueTiming, RestoreReason};

pub type MessageId = u64;

/// A message submitted while the host was busy, waiting for replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedMessage {
    pub id: MessageId,
    /// Trimmed, never empty.
    pub text: String,
    pub origin: String,
    pub created_at_ms: u64,
    pub display_time: String,
}

/// Text written into the composer and waiting for the send control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedSend {
    pub message_id: MessageId,
    pub text: String,
    /// What the user had typed before the text was staged.
    pub draft: String,
    pub origin: String,
    pub staged_at_ms: u64,
    pub attempts: u8,
}

/// A dispatched send whose outcome has not been observed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub message_id: MessageId,
    pub text: String,
    pub draft_to_restore: String,
    pub origin: String,
    pub attempted_at_ms: u64,
}

/// Engine phase, derived from state on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Generating,
    AwaitingNext,
    Confirming,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueState {
    queue: VecDeque<QueuedMessage>,
    staged: Option<StagedSend>,
    pending: Option<PendingSend>,
    last_origin: Option<String>,
    generating: bool,
    next_id: MessageId,
    timing: QueueTiming,
}

impl QueueState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timing(timing: QueueTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    pub fn timing(&self) -> &QueueTiming {
        &self.timing
    }

    pub fn queued(&self) -> impl Iterator<Item = &QueuedMessage> {
        self.queue.iter()
    }

    pub fn queued_texts(&self) -> Vec<String> {
        self.queue.iter().map(|m| m.text.clone()).collect()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn staged(&self) -> Option<&StagedSend> {
        self.staged.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingSend> {
        self.pending.as_ref()
    }

    pub fn last_origin(&self) -> Option<&str> {
        self.last_origin.as_deref()
    }

    /// Text of the staged or pending send, if any.
    pub fn in_flight_text(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .map(|p| p.text.as_str())
            .or_else(|| self.staged.as_ref().map(|s| s.text.as_str()))
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Queued or in-flight work exists.
    pub fn has_work(&self) -> bool {
        !self.queue.is_empty() || self.staged.is_some() || self.pending.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            Phase::Confirming
        } else if self.generating {
            Phase::Generating
        } else if !self.queue.is_empty() {
            Phase::AwaitingNext
        } else {
            Phase::Idle
        }
    }

    pub fn view(&self) -> QueueViewModel {
        let in_flight = self
            .pending
            .as_ref()
            .map(|p| p.message_id)
            .or_else(|| self.staged.as_ref().map(|s| s.message_id));
        let items = self
            .queue
            .iter()
            .enumerate()
            .map(|(index, message)| QueueItemView {
                index,
                text: preview(&message.text, self.timing.preview_chars),
                display_time: message.display_time.clone(),
                sending: in_flight == Some(message.id),
            })
            .collect();

        QueueViewModel {
            phase: self.phase(),
            generating: self.generating,
            queue_len: self.queue.len(),
            items,
            sending: in_flight.is_some(),
            panel_visible: !self.queue.is_empty() || self.pending.is_some(),
        }
    }

    /// Adopts `origin`, discarding all work if it differs from the last one seen.
    pub(crate) fn observe_origin(&mut self, origin: &str) -> Vec<Effect> {
        match self.last_origin.as_deref() {
            Some(last) if last == origin => Vec::new(),
            Some(_) => {
                self.last_origin = Some(origin.to_owned());
                self.discard_all(RestoreReason::Navigation)
            }
            None => {
                self.last_origin = Some(origin.to_owned());
                Vec::new()
            }
        }
    }

    /// Drops the queue and any in-flight send, returning the draft restores owed.
    pub(crate) fn discard_all(&mut self, reason: RestoreReason) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(staged) = self.staged.take() {
            effects.push(Effect::RestoreDraft {
                draft: staged.draft,
                staged_text: staged.text,
                reason,
            });
        }
        if let Some(pending) = self.pending.take() {
            effects.push(Effect::RestoreDraft {
                draft: pending.draft_to_restore,
                staged_text: pending.text,
                reason,
            });
        }
        self.queue.clear();
        effects
    }

    pub(crate) fn forget_origin(&mut self) {
        self.last_origin = None;
        self.generating = false;
    }

    pub(crate) fn set_generating(&mut self, generating: bool) {
        self.generating = generating;
    }

    pub(crate) fn push_message(
        &mut self,
        text: String,
        origin: String,
        created_at_ms: u64,
        display_time: String,
    ) -> MessageId {
        self.next_id += 1;
        let id = self.next_id;
        self.queue.push_back(QueuedMessage {
            id,
            text,
            origin,
            created_at_ms,
            display_time,
        });
        id
    }

    pub(crate) fn head(&self) -> Option<&QueuedMessage> {
        self.queue.front()
    }

    pub(crate) fn remove_message(&mut self, id: MessageId) -> Option<QueuedMessage> {
        let position = self.queue.iter().position(|m| m.id == id)?;
        self.queue.remove(position)
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Option<QueuedMessage> {
        self.queue.remove(index)
    }

    pub(crate) fn take_staged(&mut self) -> Option<StagedSend> {
        self.staged.take()
    }

    pub(crate) fn set_staged(&mut self, staged: StagedSend) {
        debug_assert!(self.pending.is_none());
        self.staged = Some(staged);
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingSend> {
        self.pending.take()
    }

    pub(crate) fn set_pending(&mut self, pending: PendingSend) {
        debug_assert!(self.staged.is_none());
        self.pending = Some(pending);
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut out: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
