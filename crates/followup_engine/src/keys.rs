/// A keyboard event observed on the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput<N> {
    pub key: String,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    /// An input-method composition is in progress.
    pub composing: bool,
    /// Node the event was dispatched to.
    pub target: N,
}

impl<N> KeyInput<N> {
    pub fn new(key: impl Into<String>, target: N) -> Self {
        Self {
            key: key.into(),
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
            composing: false,
            target,
        }
    }

    pub fn enter(target: N) -> Self {
        Self::new("Enter", target)
    }

    /// Enter with no modifiers outside of a composition.
    pub fn is_plain_submit(&self) -> bool {
        self.key == "Enter" && !(self.shift || self.ctrl || self.alt || self.meta || self.composing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Let the host handle the keystroke.
    PassThrough,
    /// The default action must be suppressed.
    Intercepted,
}
