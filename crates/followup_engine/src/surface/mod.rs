//! Floating toggle and status panel: a projection of queue state.
//!
//! The surface renders each frame into [`OverlayCommand`]s and hands them to
//! the host only when the frame changed. It never touches queue state; clicks
//! come back as [`OverlayEvent`]s for the engine to handle.

mod layout;
mod render;

use followup_core::QueueViewModel;

use crate::{HostPage, Localizer, Rect};

pub use render::render;

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCommand {
    /// Show the toggle next to the host's stop/send control.
    PlaceToggle {
        rect: Rect,
        label: String,
        /// Queue length; `None` hides the badge.
        badge: Option<String>,
        /// A queued message is being sent.
        active: bool,
    },
    HideToggle,
    ShowPanel(PanelFrame),
    HidePanel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelFrame {
    pub rect: Rect,
    pub title: String,
    pub subtitle: String,
    pub rows: Vec<PanelRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    pub index: usize,
    pub text: String,
    pub display_time: String,
    pub sending: bool,
    pub remove_label: String,
}

/// User interaction with the overlay, reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    /// The toggle was clicked: queue the current draft.
    ToggleClicked,
    /// The remove button of the row at this index was clicked.
    RemoveClicked(usize),
}

/// Geometry of the host elements the overlay attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceAnchors {
    /// Bounds of whichever of stop/send is present.
    pub control: Option<Rect>,
    pub composer: Option<Rect>,
}

#[derive(Debug, Default)]
pub struct Surface {
    frame: Vec<OverlayCommand>,
    last_composer: Option<Rect>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-renders and pushes the frame to the host if it changed.
    pub fn refresh<H: HostPage>(
        &mut self,
        host: &mut H,
        view: &QueueViewModel,
        anchors: SurfaceAnchors,
        localizer: &dyn Localizer,
    ) {
        // Keep the panel in place while the composer is briefly re-mounted.
        if anchors.composer.is_some() {
            self.last_composer = anchors.composer;
        }
        let anchors = SurfaceAnchors {
            composer: self.last_composer,
            ..anchors
        };

        let frame = render(view, &anchors, localizer);
        if frame != self.frame {
            host.apply_overlay(frame.clone());
            self.frame = frame;
        }
    }

    /// Hides everything.
    pub fn clear<H: HostPage>(&mut self, host: &mut H) {
        if self.is_visible() {
            host.apply_overlay(vec![OverlayCommand::HideToggle, OverlayCommand::HidePanel]);
        }
        self.frame.clear();
        self.last_composer = None;
    }

    pub fn is_visible(&self) -> bool {
        self.frame.iter().any(|command| {
            matches!(
                command,
                OverlayCommand::PlaceToggle { .. } | OverlayCommand::ShowPanel(_)
            )
        })
    }
}
