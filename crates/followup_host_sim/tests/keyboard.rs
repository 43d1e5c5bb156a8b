mod common;

use common::{Harness, CHAT};
use followup_engine::{KeyDisposition, KeyInput};
use followup_host_sim::{SimPage, RICH_FIXTURE, TEXTAREA_FIXTURE};

fn harness(generating: bool) -> Harness {
    let mut page = SimPage::new(TEXTAREA_FIXTURE, CHAT);
    page.set_generating(generating);
    Harness::new(page)
}

#[test]
fn enter_while_idle_goes_to_host() {
    let mut h = harness(false);
    assert_eq!(h.submit("hello"), KeyDisposition::PassThrough);
    assert!(h.queued().is_empty());
    assert_eq!(h.page().composer_text(), "hello");
}

#[test]
fn modified_enter_goes_to_host() {
    let mut h = harness(true);
    h.page_mut().type_text("line one");
    let composer = h.page().composer_node().expect("composer");

    let variants = [
        KeyInput {
            shift: true,
            ..KeyInput::enter(composer)
        },
        KeyInput {
            ctrl: true,
            ..KeyInput::enter(composer)
        },
        KeyInput {
            alt: true,
            ..KeyInput::enter(composer)
        },
        KeyInput {
            meta: true,
            ..KeyInput::enter(composer)
        },
        KeyInput {
            composing: true,
            ..KeyInput::enter(composer)
        },
        KeyInput::new("a", composer),
    ];
    for input in variants {
        assert_eq!(h.engine.handle_key(&input), KeyDisposition::PassThrough, "{input:?}");
    }
    assert!(h.queued().is_empty());
}

#[test]
fn enter_outside_composer_goes_to_host() {
    let mut h = harness(true);
    h.page_mut().type_text("not for the queue");
    let attach = h
        .page()
        .find("button[aria-label='Attach files']")
        .expect("attach button");

    assert_eq!(
        h.engine.handle_key(&KeyInput::enter(attach)),
        KeyDisposition::PassThrough
    );
    assert!(h.queued().is_empty());
}

#[test]
fn blank_enter_while_generating_is_swallowed() {
    let mut h = harness(true);
    assert_eq!(h.submit("   \n "), KeyDisposition::Intercepted);
    assert!(h.queued().is_empty());
}

#[test]
fn enter_inside_rich_composer_is_queued() {
    let mut page = SimPage::new(RICH_FIXTURE, CHAT);
    page.set_generating(true);
    let mut h = Harness::new(page);
    h.page_mut().type_text("et ensuite ?");
    let paragraph = h
        .page()
        .find("[data-sim-role='paragraph']")
        .expect("paragraph");

    assert_eq!(
        h.engine.handle_key(&KeyInput::enter(paragraph)),
        KeyDisposition::Intercepted
    );
    assert_eq!(h.queued(), vec!["et ensuite ?"]);
}

#[test]
fn disabled_queue_never_intercepts() {
    let mut h = harness(true);
    h.settings.set_queue_enabled(false);
    h.engine.on_settings_changed();

    assert_eq!(h.submit("hello"), KeyDisposition::PassThrough);
    assert!(h.queued().is_empty());
}
