use std::fmt;

use crate::surface::OverlayCommand;

/// On-screen bounds of a host node, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-size nodes are not rendered and never count as candidates.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// The hosted chat page, as seen through its UI tree.
///
/// Queries take CSS selectors. Lookups never fail: a bad selector or a
/// missing node yields an empty result. Mutations report whether the host
/// accepted them.
pub trait HostPage: 'static {
    /// Handle to a node. Handles may go stale when the host re-renders.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// Identifier of the current conversation.
    fn origin(&self) -> String;

    /// Elements matching `selector` under `scope`, or page-wide, in document order.
    fn query(&self, scope: Option<&Self::Node>, selector: &str) -> Vec<Self::Node>;
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    /// Nearest inclusive ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// `node` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
    /// Lowercase tag name.
    fn tag_name(&self, node: &Self::Node) -> String;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn text_content(&self, node: &Self::Node) -> String;
    fn bounds(&self, node: &Self::Node) -> Rect;
    fn is_disabled(&self, node: &Self::Node) -> bool;
    fn is_content_editable(&self, node: &Self::Node) -> bool;

    /// Current value of a value-bearing control.
    fn value(&self, node: &Self::Node) -> Option<String>;
    /// Writes through the platform's native value setter so host bindings see it.
    fn set_value_native(&mut self, node: &Self::Node, text: &str) -> bool;
    /// Select-all followed by an insert-text edit on a rich editable region.
    fn select_all_and_insert(&mut self, node: &Self::Node, text: &str) -> bool;
    /// Direct content assignment, bypassing the editing pipeline.
    fn replace_content(&mut self, node: &Self::Node, text: &str);
    /// Fires an input notification on `node`.
    fn dispatch_input(&mut self, node: &Self::Node);
    fn focus(&mut self, node: &Self::Node);
    fn click(&mut self, node: &Self::Node) -> bool;
    fn request_submit(&mut self, form: &Self::Node) -> bool;

    /// Applies a frame of overlay changes (toggle and status panel).
    fn apply_overlay(&mut self, commands: Vec<OverlayCommand>);
}
