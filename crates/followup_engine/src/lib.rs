//! Follow-up engine: host abstractions, widget lookup and effect execution.
mod clock;
mod controls;
mod engine;
mod error;
mod host;
mod i18n;
mod keys;
mod settings;
mod surface;

pub mod composer;

pub use clock::{Clock, SystemClock};
pub use controls::{find_send_button, find_stop_button};
pub use engine::{EngineConfig, QueueEngine};
pub use error::QueueError;
pub use host::{HostPage, Rect};
pub use i18n::{EnglishMessages, Localizer};
pub use keys::{KeyDisposition, KeyInput};
pub use settings::{SettingsProvider, SharedSettings, StaticSettings};
pub use surface::{OverlayCommand, OverlayEvent, PanelFrame, PanelRow, Surface, SurfaceAnchors};

pub use followup_core::{Phase, QueueTiming, QueueViewModel};
