mod common;

use common::{Harness, CHAT, OTHER_CHAT};
use followup_engine::KeyDisposition;
use followup_host_sim::{SimBehaviour, SimPage, RICH_FIXTURE, TEXTAREA_FIXTURE};
use pretty_assertions::assert_eq;

fn generating_page(html: &str) -> SimPage {
    let mut page = SimPage::new(html, CHAT);
    page.set_generating(true);
    page
}

#[test]
fn submit_while_generating_is_queued() {
    let mut h = Harness::new(generating_page(TEXTAREA_FIXTURE));
    h.advance(200);

    assert_eq!(h.submit("hi"), KeyDisposition::Intercepted);
    assert_eq!(h.queued(), vec!["hi"]);
    assert_eq!(h.page().composer_text(), "");
    assert_eq!(h.page().badge().as_deref(), Some("1"));
    assert!(h.page().sent().is_empty());
}

#[test]
fn queued_message_is_sent_once_generation_ends() {
    let mut h = Harness::new(generating_page(TEXTAREA_FIXTURE));
    h.submit("hi");
    h.advance(500);
    assert!(h.page().sent().is_empty());

    h.page_mut().set_generating(false);
    let drained = h.advance_until(2_600, |engine| !engine.has_work());

    assert!(drained);
    assert_eq!(h.page().sent_texts(), vec!["hi"]);
    assert_eq!(h.page().sent()[0].origin, CHAT);
    assert!(h.page().is_generating());
    assert_eq!(h.page().badge(), None);
    assert_eq!(h.page().composer_text(), "");
}

#[test]
fn replay_is_fifo_one_per_generation() {
    let mut h = Harness::new(generating_page(TEXTAREA_FIXTURE));
    h.submit("a");
    h.submit("b");
    h.submit("c");
    assert_eq!(h.queued(), vec!["a", "b", "c"]);

    h.page_mut().set_generating(false);
    h.advance(1_000);
    assert_eq!(h.page().sent_texts(), vec!["a"]);
    assert_eq!(h.queued(), vec!["b", "c"]);

    h.page_mut().set_generating(false);
    h.advance(1_000);
    h.page_mut().set_generating(false);
    h.advance(1_000);
    assert_eq!(h.page().sent_texts(), vec!["a", "b", "c"]);
    assert!(h.queued().is_empty());
}

#[test]
fn navigation_drops_queue_before_it_sends() {
    let mut h = Harness::new(generating_page(TEXTAREA_FIXTURE));
    h.submit("x");
    h.advance(200);

    h.page_mut().navigate(OTHER_CHAT);
    h.advance(500);
    assert!(h.queued().is_empty());
    assert_eq!(h.page().badge(), None);

    h.page_mut().set_generating(false);
    h.advance(3_000);
    assert!(h.page().sent().is_empty());
}

#[test]
fn navigation_drops_unconfirmed_send() {
    let page = generating_page(TEXTAREA_FIXTURE).with_behaviour(SimBehaviour {
        swallow_sends: true,
        ..SimBehaviour::default()
    });
    let mut h = Harness::new(page);
    h.submit("x");
    h.submit("y");
    h.page_mut().set_generating(false);
    assert!(h.advance_until(1_000, |engine| engine.state().pending().is_some()));

    h.page_mut().navigate(OTHER_CHAT);
    h.advance(500);
    assert!(h.engine.state().pending().is_none());
    assert!(h.queued().is_empty());
}

#[test]
fn draft_is_restored_after_confirmation() {
    let mut h = Harness::new(generating_page(TEXTAREA_FIXTURE));
    h.submit("queued question");
    h.page_mut().type_text("half-written draft");

    h.page_mut().set_generating(false);
    assert!(h.advance_until(2_600, |engine| !engine.has_work()));

    assert_eq!(h.page().sent_texts(), vec!["queued question"]);
    assert_eq!(h.page().composer_text(), "half-written draft");
}

#[test]
fn newer_typing_is_not_overwritten() {
    let mut h = Harness::new(generating_page(TEXTAREA_FIXTURE));
    h.submit("queued question");
    h.page_mut().type_text("old draft");

    h.page_mut().set_generating(false);
    assert!(h.advance_until(1_000, |engine| engine.state().pending().is_some()));
    h.page_mut().type_text("typed while sending");
    h.advance(1_000);

    assert!(!h.engine.has_work());
    assert_eq!(h.page().composer_text(), "typed while sending");
}

#[test]
fn failed_send_restores_draft_and_retries_later() {
    let mut h = Harness::new(generating_page(TEXTAREA_FIXTURE));
    h.submit("queued question");
    h.page_mut().type_text("my draft");
    let send = h.page().send_node().expect("send control");
    h.page_mut().set_disabled(send, true);

    h.page_mut().set_generating(false);
    assert!(h.advance_until(1_000, |engine| engine.state().staged().is_some()));
    assert_eq!(h.page().composer_text(), "queued question");
    assert!(h.advance_until(1_000, |engine| engine.state().staged().is_none()));

    assert_eq!(h.page().composer_text(), "my draft");
    assert!(h.page().sent().is_empty());
    assert_eq!(h.queued(), vec!["queued question"]);

    h.page_mut().set_disabled(send, false);
    assert!(h.advance_until(3_000, |engine| !engine.has_work()));
    assert_eq!(h.page().sent_texts(), vec!["queued question"]);
    assert_eq!(h.page().composer_text(), "my draft");
}

#[test]
fn unconfirmed_send_times_out_and_restores_draft() {
    let page = generating_page(TEXTAREA_FIXTURE).with_behaviour(SimBehaviour {
        swallow_sends: true,
        ..SimBehaviour::default()
    });
    let mut h = Harness::new(page);
    h.submit("queued question");
    h.page_mut().type_text("my draft");

    h.page_mut().set_generating(false);
    assert!(h.advance_until(1_000, |engine| engine.state().pending().is_some()));
    assert!(h.advance_until(4_000, |engine| engine.state().pending().is_none()));

    assert_eq!(h.page().composer_text(), "my draft");
    assert_eq!(h.queued(), vec!["queued question"]);
    assert!(h.page().sent().is_empty());
}

#[test]
fn rich_composer_round_trip() {
    let mut h = Harness::new(generating_page(RICH_FIXTURE));
    assert_eq!(h.submit("question suivante"), KeyDisposition::Intercepted);
    assert_eq!(h.page().composer_text(), "");

    h.page_mut().set_generating(false);
    assert!(h.advance_until(2_600, |engine| !engine.has_work()));
    assert_eq!(h.page().sent_texts(), vec!["question suivante"]);
}

#[test]
fn missing_composer_keeps_message_queued() {
    let mut h = Harness::new(generating_page(TEXTAREA_FIXTURE));
    h.submit("later");
    let composer = h.page().composer_node().expect("composer");
    h.page_mut().set_detached(composer, true);

    h.page_mut().set_generating(false);
    h.advance(2_000);
    assert_eq!(h.queued(), vec!["later"]);
    assert!(h.page().sent().is_empty());

    h.page_mut().set_detached(composer, false);
    assert!(h.advance_until(2_000, |engine| !engine.has_work()));
    assert_eq!(h.page().sent_texts(), vec!["later"]);
}
