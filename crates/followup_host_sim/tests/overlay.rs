mod common;

use common::{Harness, CHAT};
use followup_engine::{OverlayEvent, Rect};
use followup_host_sim::{SimBehaviour, SimPage, TEXTAREA_FIXTURE};
use pretty_assertions::assert_eq;

fn generating_harness() -> Harness {
    let mut page = SimPage::new(TEXTAREA_FIXTURE, CHAT);
    page.set_generating(true);
    let mut h = Harness::new(page);
    h.advance(200);
    h
}

#[test]
fn toggle_sits_beside_action_control() {
    let h = generating_harness();
    let toggle = h.page().toggle().expect("toggle");
    assert_eq!(toggle.rect, Rect::new(714.0, 654.0, 28.0, 28.0));
    assert_eq!(toggle.label, "Queue message");
    assert_eq!(toggle.badge, None);
    assert!(h.page().panel().is_none());
}

#[test]
fn panel_lists_queued_messages() {
    let mut h = generating_harness();
    h.submit("first question");
    h.submit("second   question\nwith a newline");

    let panel = h.page().panel().expect("panel");
    assert_eq!(panel.title, "Queued messages (2)");
    assert_eq!(panel.subtitle, "Waiting for the current response");
    let rows: Vec<(usize, &str)> = panel
        .rows
        .iter()
        .map(|row| (row.index, row.text.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![(0, "first question"), (1, "second question with a newline")]
    );
    assert!(panel.rows.iter().all(|row| row.remove_label == "Remove"));
    assert!(panel.rows.iter().all(|row| row.display_time == "00:00"));
    assert_eq!(h.page().badge().as_deref(), Some("2"));
}

#[test]
fn remove_button_drops_that_row() {
    let mut h = generating_harness();
    h.submit("keep me");
    h.submit("drop me");

    h.engine.handle_overlay_event(OverlayEvent::RemoveClicked(1));
    assert_eq!(h.queued(), vec!["keep me"]);
    assert_eq!(h.page().panel().map(|p| p.rows.len()), Some(1));

    h.engine.handle_overlay_event(OverlayEvent::RemoveClicked(7));
    assert_eq!(h.queued(), vec!["keep me"]);

    h.engine.handle_overlay_event(OverlayEvent::RemoveClicked(0));
    h.advance(100);
    assert!(h.queued().is_empty());
    assert!(h.page().panel().is_none());
    assert_eq!(h.page().badge(), None);
}

#[test]
fn toggle_click_queues_the_draft() {
    let mut h = generating_harness();
    h.page_mut().type_text("from the toggle");

    h.engine.handle_overlay_event(OverlayEvent::ToggleClicked);
    assert_eq!(h.queued(), vec!["from the toggle"]);
    assert_eq!(h.page().composer_text(), "");

    h.engine.handle_overlay_event(OverlayEvent::ToggleClicked);
    assert_eq!(h.queued().len(), 1);
}

#[test]
fn toggle_click_during_replay_does_not_duplicate() {
    let mut page = SimPage::new(TEXTAREA_FIXTURE, CHAT).with_behaviour(SimBehaviour {
        swallow_sends: true,
        ..SimBehaviour::default()
    });
    page.set_generating(true);
    let mut h = Harness::new(page);
    h.submit("q");

    h.page_mut().set_generating(false);
    assert!(h.advance_until(1_000, |engine| engine.state().pending().is_some()));
    assert_eq!(h.page().composer_text(), "q");

    h.engine.handle_overlay_event(OverlayEvent::ToggleClicked);
    assert_eq!(h.queued(), vec!["q"]);
    assert_eq!(h.page().composer_text(), "q");

    h.page_mut().behaviour_mut().swallow_sends = false;
    h.advance(8_000);
    assert_eq!(h.page().sent_texts(), vec!["q"]);
    assert!(h.queued().is_empty());
}

#[test]
fn unchanged_state_pushes_no_frames() {
    let mut h = generating_harness();
    h.submit("waiting");
    let frames = h.page().overlay_frames();

    h.advance(2_000);
    assert!(h.engine.has_work());
    assert_eq!(h.page().overlay_frames(), frames);
}

#[test]
fn panel_follows_the_composer() {
    let mut h = generating_harness();
    h.submit("anchored");
    let composer = h.page().composer_node().expect("composer");

    h.page_mut().set_rect(composer, Rect::new(40.0, 400.0, 500.0, 56.0));
    h.advance(300);

    let rect = h.page().panel().expect("panel").rect;
    assert_eq!(rect, Rect::new(40.0, 400.0 - 8.0 - 76.0, 500.0, 76.0));
}

#[test]
fn switching_off_clears_everything_and_back_on_restores_toggle() {
    let mut h = generating_harness();
    h.submit("doomed");

    h.settings.set_queue_enabled(false);
    h.engine.on_settings_changed();
    assert!(h.queued().is_empty());
    assert!(h.page().toggle().is_none());
    assert!(h.page().panel().is_none());

    h.advance(1_000);
    assert!(h.page().toggle().is_none());

    h.settings.set_queue_enabled(true);
    h.engine.on_settings_changed();
    h.advance(300);
    assert!(h.page().toggle().is_some());
    assert!(h.page().panel().is_none());
}

#[test]
fn extension_switch_is_noticed_by_the_next_pulse() {
    let mut h = generating_harness();
    h.submit("doomed");

    h.settings.set_extension_enabled(false);
    h.advance(1_000);
    assert!(!h.engine.has_work());
    assert!(h.page().toggle().is_none());
}
