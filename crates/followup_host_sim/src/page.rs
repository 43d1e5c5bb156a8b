use std::collections::{HashMap, HashSet};

use ego_tree::{NodeId, NodeRef};
use engine_logging::{engine_debug, engine_trace};
use followup_engine::{HostPage, OverlayCommand, PanelFrame, Rect};
use scraper::{ElementRef, Html, Node, Selector};

const DEFAULT_RECT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 120.0,
    height: 32.0,
};

/// How the simulated host reacts to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimBehaviour {
    /// Accepting a send starts a generation (stop control appears).
    pub start_generating_on_send: bool,
    /// Clicks and submits are accepted but nothing is sent.
    pub swallow_sends: bool,
    pub native_setter_works: bool,
    pub rich_insert_works: bool,
    pub submit_works: bool,
}

impl Default for SimBehaviour {
    fn default() -> Self {
        Self {
            start_generating_on_send: true,
            swallow_sends: false,
            native_setter_works: true,
            rich_insert_works: true,
            submit_works: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Input(NodeId),
    Focus(NodeId),
    Click(NodeId),
    Submit(NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub origin: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleView {
    pub rect: Rect,
    pub label: String,
    pub badge: Option<String>,
    pub active: bool,
}

/// A parsed HTML page plus the mutable widget state a browser would keep.
///
/// The tree itself never changes. Removal is modelled by detaching nodes,
/// and text, disabled flags and bounds live in overlays keyed by node id.
pub struct SimPage {
    document: Html,
    origin: String,
    behaviour: SimBehaviour,
    text: HashMap<NodeId, String>,
    disabled: HashMap<NodeId, bool>,
    rects: HashMap<NodeId, Rect>,
    detached: HashSet<NodeId>,
    composer: Option<NodeId>,
    send: Option<NodeId>,
    stop: Option<NodeId>,
    generating: bool,
    mutated: bool,
    events: Vec<SimEvent>,
    sent: Vec<SentMessage>,
    toggle: Option<ToggleView>,
    panel: Option<PanelFrame>,
    overlay_frames: usize,
}

impl SimPage {
    pub fn new(html: &str, origin: impl Into<String>) -> Self {
        let document = Html::parse_document(html);
        let role = |name: &str| {
            Selector::parse(&format!("[data-sim-role='{name}']"))
                .ok()
                .and_then(|sel| document.select(&sel).next().map(|el| el.id()))
        };
        let composer = role("composer");
        let send = role("send");
        let stop = role("stop");

        let mut page = Self {
            document,
            origin: origin.into(),
            behaviour: SimBehaviour::default(),
            text: HashMap::new(),
            disabled: HashMap::new(),
            rects: HashMap::new(),
            detached: HashSet::new(),
            composer,
            send,
            stop,
            generating: false,
            mutated: false,
            events: Vec::new(),
            sent: Vec::new(),
            toggle: None,
            panel: None,
            overlay_frames: 0,
        };
        page.apply_generating(false);
        page.mutated = false;
        page
    }

    pub fn with_behaviour(mut self, behaviour: SimBehaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    pub fn behaviour_mut(&mut self) -> &mut SimBehaviour {
        &mut self.behaviour
    }

    /// Shows the stop control and hides send, or the reverse.
    pub fn set_generating(&mut self, generating: bool) {
        if self.generating != generating {
            engine_trace!("sim host generating={generating}");
            self.apply_generating(generating);
        }
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Switches to another conversation.
    pub fn navigate(&mut self, origin: impl Into<String>) {
        self.origin = origin.into();
        self.mutated = true;
    }

    /// User typing: replaces the composer content.
    pub fn type_text(&mut self, text: &str) {
        if let Some(composer) = self.composer {
            self.text.insert(composer, text.to_string());
            self.events.push(SimEvent::Input(composer));
            self.mutated = true;
        }
    }

    pub fn composer_text(&self) -> String {
        self.composer
            .map(|id| self.current_text(id))
            .unwrap_or_default()
    }

    pub fn composer_node(&self) -> Option<NodeId> {
        self.composer
    }

    pub fn send_node(&self) -> Option<NodeId> {
        self.send
    }

    pub fn stop_node(&self) -> Option<NodeId> {
        self.stop
    }

    /// First element matching `selector`, attached or not.
    pub fn find(&self, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector).ok()?;
        self.document.select(&selector).next().map(|el| el.id())
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        self.disabled.insert(node, disabled);
        self.mutated = true;
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.rects.insert(node, rect);
        self.mutated = true;
    }

    pub fn set_detached(&mut self, node: NodeId, detached: bool) {
        if detached {
            self.detached.insert(node);
        } else {
            self.detached.remove(&node);
        }
        self.mutated = true;
    }

    /// Whether the tree changed since the last call.
    pub fn take_mutated(&mut self) -> bool {
        std::mem::take(&mut self.mutated)
    }

    pub fn sent(&self) -> &[SentMessage] {
        &self.sent
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent.iter().map(|m| m.text.clone()).collect()
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn toggle(&self) -> Option<&ToggleView> {
        self.toggle.as_ref()
    }

    pub fn badge(&self) -> Option<String> {
        self.toggle.as_ref().and_then(|t| t.badge.clone())
    }

    pub fn panel(&self) -> Option<&PanelFrame> {
        self.panel.as_ref()
    }

    /// Number of overlay frames the engine pushed.
    pub fn overlay_frames(&self) -> usize {
        self.overlay_frames
    }

    fn apply_generating(&mut self, generating: bool) {
        self.generating = generating;
        if let Some(stop) = self.stop {
            self.set_detached(stop, !generating);
        }
        if let Some(send) = self.send {
            self.set_detached(send, generating);
        }
    }

    fn node(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.document.tree.get(id)
    }

    fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.node(id).and_then(ElementRef::wrap)
    }

    fn is_attached(&self, id: NodeId) -> bool {
        match self.node(id) {
            Some(node) => {
                !self.detached.contains(&id)
                    && !node.ancestors().any(|a| self.detached.contains(&a.id()))
            }
            None => false,
        }
    }

    fn is_value_bearing(&self, id: NodeId) -> bool {
        self.element(id)
            .is_some_and(|el| matches!(el.value().name(), "textarea" | "input"))
    }

    fn current_text(&self, id: NodeId) -> String {
        if let Some(text) = self.text.get(&id) {
            return text.clone();
        }
        match self.element(id) {
            Some(el) if el.value().name() == "input" => {
                el.value().attr("value").unwrap_or_default().to_string()
            }
            Some(el) => el.text().collect(),
            None => String::new(),
        }
    }

    /// What the host does when its send control fires.
    fn host_send(&mut self) {
        if self.behaviour.swallow_sends {
            engine_debug!("sim host swallowed a send");
            return;
        }
        let Some(composer) = self.composer else {
            return;
        };
        let text = self.current_text(composer);
        if text.trim().is_empty() {
            return;
        }
        self.sent.push(SentMessage {
            origin: self.origin.clone(),
            text,
        });
        self.text.insert(composer, String::new());
        self.mutated = true;
        if self.behaviour.start_generating_on_send {
            self.set_generating(true);
        }
    }
}

impl HostPage for SimPage {
    type Node = NodeId;

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn query(&self, scope: Option<&NodeId>, selector: &str) -> Vec<NodeId> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        let found: Vec<NodeId> = match scope {
            Some(scope) if self.is_attached(*scope) => match self.element(*scope) {
                Some(el) => el.select(&selector).map(|e| e.id()).collect(),
                None => Vec::new(),
            },
            Some(_) => Vec::new(),
            None => self.document.select(&selector).map(|e| e.id()).collect(),
        };
        found
            .into_iter()
            .filter(|id| self.is_attached(*id))
            .collect()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node)?
            .ancestors()
            .find(|a| ElementRef::wrap(*a).is_some())
            .map(|a| a.id())
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector).ok()?;
        let start = self.node(*node)?;
        std::iter::once(start)
            .chain(start.ancestors())
            .filter_map(ElementRef::wrap)
            .find(|el| selector.matches(el))
            .map(|el| el.id())
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        ancestor == node
            || self
                .node(*node)
                .is_some_and(|n| n.ancestors().any(|a| a.id() == *ancestor))
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.element(*node)
            .map(|el| el.value().name().to_ascii_lowercase())
            .unwrap_or_default()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(*node)?.value().attr(name).map(str::to_string)
    }

    fn text_content(&self, node: &NodeId) -> String {
        self.current_text(*node)
    }

    fn bounds(&self, node: &NodeId) -> Rect {
        if let Some(rect) = self.rects.get(node) {
            return *rect;
        }
        self.attribute(node, "data-rect")
            .and_then(|raw| {
                let parts: Vec<f64> = raw
                    .split_whitespace()
                    .filter_map(|p| p.parse().ok())
                    .collect();
                match parts.as_slice() {
                    [x, y, w, h] => Some(Rect::new(*x, *y, *w, *h)),
                    _ => None,
                }
            })
            .unwrap_or(DEFAULT_RECT)
    }

    fn is_disabled(&self, node: &NodeId) -> bool {
        if let Some(disabled) = self.disabled.get(node) {
            return *disabled;
        }
        self.attribute(node, "disabled").is_some()
            || self.attribute(node, "aria-disabled").as_deref() == Some("true")
    }

    fn is_content_editable(&self, node: &NodeId) -> bool {
        matches!(
            self.attribute(node, "contenteditable").as_deref(),
            Some("true") | Some("")
        )
    }

    fn value(&self, node: &NodeId) -> Option<String> {
        self.is_value_bearing(*node)
            .then(|| self.current_text(*node))
    }

    fn set_value_native(&mut self, node: &NodeId, text: &str) -> bool {
        if !self.behaviour.native_setter_works || !self.is_value_bearing(*node) {
            return false;
        }
        self.text.insert(*node, text.to_string());
        true
    }

    fn select_all_and_insert(&mut self, node: &NodeId, text: &str) -> bool {
        if !self.behaviour.rich_insert_works || !self.is_content_editable(node) {
            return false;
        }
        // Deleting everything leaves an empty paragraph behind.
        let content = if text.is_empty() { "\n" } else { text };
        self.text.insert(*node, content.to_string());
        self.mutated = true;
        true
    }

    fn replace_content(&mut self, node: &NodeId, text: &str) {
        self.text.insert(*node, text.to_string());
        self.mutated = true;
    }

    fn dispatch_input(&mut self, node: &NodeId) {
        self.events.push(SimEvent::Input(*node));
    }

    fn focus(&mut self, node: &NodeId) {
        self.events.push(SimEvent::Focus(*node));
    }

    fn click(&mut self, node: &NodeId) -> bool {
        if !self.is_attached(*node) || self.is_disabled(node) {
            return false;
        }
        self.events.push(SimEvent::Click(*node));
        if Some(*node) == self.send {
            self.host_send();
        } else if Some(*node) == self.stop {
            self.set_generating(false);
        }
        true
    }

    fn request_submit(&mut self, form: &NodeId) -> bool {
        if !self.behaviour.submit_works || !self.is_attached(*form) {
            return false;
        }
        self.events.push(SimEvent::Submit(*form));
        self.host_send();
        true
    }

    fn apply_overlay(&mut self, commands: Vec<OverlayCommand>) {
        self.overlay_frames += 1;
        for command in commands {
            match command {
                OverlayCommand::PlaceToggle {
                    rect,
                    label,
                    badge,
                    active,
                } => {
                    self.toggle = Some(ToggleView {
                        rect,
                        label,
                        badge,
                        active,
                    })
                }
                OverlayCommand::HideToggle => self.toggle = None,
                OverlayCommand::ShowPanel(frame) => self.panel = Some(frame),
                OverlayCommand::HidePanel => self.panel = None,
            }
        }
    }
}
