use crate::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueViewModel {
    pub phase: Phase,
    pub generating: bool,
    pub queue_len: usize,
    pub items: Vec<QueueItemView>,
    /// A queued message is staged or awaiting confirmation.
    pub sending: bool,
    pub panel_visible: bool,
}

impl QueueViewModel {
    /// Badge count, hidden when nothing is queued.
    pub fn badge(&self) -> Option<usize> {
        (self.queue_len > 0).then_some(self.queue_len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItemView {
    pub index: usize,
    pub text: String,
    pub display_time: String,
    pub sending: bool,
}
