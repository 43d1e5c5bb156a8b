//! Composer lookup and text access.
//!
//! Hosts use one of two widget shapes for the composer: a value-bearing
//! control (`<textarea>`, `<input>`) or a rich editable region
//! (`contenteditable`). Both sit behind [`ComposerAdapter`]; the shape is
//! picked once per lookup.

use engine_logging::{engine_debug, engine_trace};

use crate::{HostPage, QueueError};

/// Structural hints, most specific first.
const COMPOSER_HINTS: &[&str] = &[
    "#prompt-textarea",
    "[data-testid='prompt-textarea']",
    "form .ProseMirror[contenteditable='true']",
    "form [contenteditable='true']",
    "form textarea",
    "main textarea",
];

/// Text access to the active composer widget.
pub trait ComposerAdapter<H: HostPage> {
    fn node(&self) -> &H::Node;
    fn get_text(&self, host: &H) -> String;
    /// Replaces the whole content and notifies the host.
    ///
    /// Falls back to a direct content write when the first attempt has no
    /// effect; `WriteFailure` means even the fallback did not stick.
    fn set_text(&self, host: &mut H, text: &str) -> Result<(), QueueError>;
    /// Gives the widget input focus. Writes focus first.
    fn focus(&self, host: &mut H);
}

pub type Composer<H> = Box<dyn ComposerAdapter<H>>;

/// `<textarea>` or `<input>`.
pub struct PlainField<H: HostPage> {
    node: H::Node,
}

impl<H: HostPage> ComposerAdapter<H> for PlainField<H> {
    fn node(&self) -> &H::Node {
        &self.node
    }

    fn get_text(&self, host: &H) -> String {
        host.value(&self.node).unwrap_or_default()
    }

    fn set_text(&self, host: &mut H, text: &str) -> Result<(), QueueError> {
        self.focus(host);
        if !host.set_value_native(&self.node, text) {
            engine_debug!("native value setter refused; assigning directly");
            host.replace_content(&self.node, text);
        }
        host.dispatch_input(&self.node);
        if self.get_text(host) == text {
            Ok(())
        } else {
            Err(QueueError::WriteFailure)
        }
    }

    fn focus(&self, host: &mut H) {
        host.focus(&self.node);
    }
}

/// `contenteditable` region.
pub struct RichRegion<H: HostPage> {
    node: H::Node,
}

impl<H: HostPage> ComposerAdapter<H> for RichRegion<H> {
    fn node(&self) -> &H::Node {
        &self.node
    }

    fn get_text(&self, host: &H) -> String {
        host.text_content(&self.node)
    }

    fn set_text(&self, host: &mut H, text: &str) -> Result<(), QueueError> {
        self.focus(host);
        // An empty insert can leave an empty paragraph behind; exact
        // comparison catches that as well as a refused edit.
        let inserted = host.select_all_and_insert(&self.node, text);
        if !inserted || self.get_text(host) != text {
            engine_debug!("rich insert left {:?}; replacing content", self.get_text(host));
            host.replace_content(&self.node, text);
        }
        host.dispatch_input(&self.node);
        if self.get_text(host) == text {
            Ok(())
        } else {
            Err(QueueError::WriteFailure)
        }
    }

    fn focus(&self, host: &mut H) {
        host.focus(&self.node);
    }
}

/// Best visible, enabled composer candidate, or `None`.
pub fn find_active<H: HostPage>(host: &H) -> Option<Composer<H>> {
    for hint in COMPOSER_HINTS {
        for node in host.query(None, hint) {
            if host.is_disabled(&node) || host.bounds(&node).is_empty() {
                engine_trace!("composer hint {hint} matched an unusable node");
                continue;
            }
            if let Some(composer) = adapt(host, node) {
                return Some(composer);
            }
        }
    }
    None
}

/// The active composer, if `target` is it or lies inside it.
pub fn find_from_event_target<H: HostPage>(host: &H, target: &H::Node) -> Option<Composer<H>> {
    find_active(host).filter(|composer| host.contains(composer.node(), target))
}

/// Submission form enclosing `node`.
pub fn get_form<H: HostPage>(host: &H, node: &H::Node) -> Option<H::Node> {
    host.closest(node, "form")
}

fn adapt<H: HostPage>(host: &H, node: H::Node) -> Option<Composer<H>> {
    let tag = host.tag_name(&node);
    if tag == "textarea" || tag == "input" {
        Some(Box::new(PlainField::<H> { node }))
    } else if host.is_content_editable(&node) {
        Some(Box::new(RichRegion::<H> { node }))
    } else {
        None
    }
}
