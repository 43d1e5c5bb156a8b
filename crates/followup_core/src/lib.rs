//! Follow-up core: pure queue state machine, pulse scheduler and view-model helpers.
mod effect;
mod msg;
mod scheduler;
mod state;
mod timing;
mod update;
mod view_model;

pub use effect::{Effect, RestoreReason};
pub use msg::{Msg, Observation};
pub use scheduler::PulseScheduler;
pub use state::{MessageId, PendingSend, Phase, QueueState, QueuedMessage, StagedSend};
pub use timing::QueueTiming;
pub use update::update;
pub use view_model::{QueueItemView, QueueViewModel};
