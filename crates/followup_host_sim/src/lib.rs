//! In-memory host page for exercising the follow-up engine without a browser.
mod clock;
mod fixtures;
mod page;

pub use clock::{advance, advance_until, ManualClock};
pub use fixtures::{RICH_FIXTURE, TEXTAREA_FIXTURE};
pub use page::{SentMessage, SimBehaviour, SimEvent, SimPage, ToggleView};
