use followup_core::{Phase, QueueViewModel};

use super::layout::{panel_rect, toggle_rect};
use super::{OverlayCommand, PanelFrame, PanelRow, SurfaceAnchors};
use crate::Localizer;

/// One overlay frame: toggle first, then panel.
pub fn render(
    view: &QueueViewModel,
    anchors: &SurfaceAnchors,
    localizer: &dyn Localizer,
) -> Vec<OverlayCommand> {
    let toggle = match anchors.control {
        Some(control) => OverlayCommand::PlaceToggle {
            rect: toggle_rect(control),
            label: message(localizer, "queueToggleLabel", &[]),
            badge: view.badge().map(|count| count.to_string()),
            active: view.sending,
        },
        None => OverlayCommand::HideToggle,
    };

    let panel = match (view.panel_visible, anchors.composer) {
        (true, Some(composer)) => OverlayCommand::ShowPanel(PanelFrame {
            rect: panel_rect(composer, view.items.len()),
            title: message(localizer, "queuePanelTitle", &[&view.queue_len.to_string()]),
            subtitle: message(localizer, status_key(view), &[]),
            rows: build_rows(view, localizer),
        }),
        _ => OverlayCommand::HidePanel,
    };

    vec![toggle, panel]
}

fn build_rows(view: &QueueViewModel, localizer: &dyn Localizer) -> Vec<PanelRow> {
    let remove_label = message(localizer, "queueRemoveItem", &[]);
    view.items
        .iter()
        .map(|item| PanelRow {
            index: item.index,
            text: item.text.clone(),
            display_time: item.display_time.clone(),
            sending: item.sending,
            remove_label: remove_label.clone(),
        })
        .collect()
}

fn status_key(view: &QueueViewModel) -> &'static str {
    match view.phase {
        Phase::Confirming => "queueStatusSending",
        Phase::Generating => "queueStatusGenerating",
        Phase::AwaitingNext | Phase::Idle if view.sending => "queueStatusSending",
        Phase::AwaitingNext | Phase::Idle => "queueStatusIdle",
    }
}

/// Looks up `key`, falling back to the key itself so a gap in a catalogue stays visible.
fn message(localizer: &dyn Localizer, key: &str, substitutions: &[&str]) -> String {
    let text = localizer.get_message(key, substitutions);
    if text.is_empty() {
        key.to_string()
    } else {
        text
    }
}
