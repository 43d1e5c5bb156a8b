use std::cell::Cell;
use std::rc::Rc;

/// Read-only view of the user's settings.
pub trait SettingsProvider {
    /// The follow-up queue feature is switched on.
    fn queue_enabled(&self) -> bool;
    /// The extension as a whole is switched on.
    fn extension_enabled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSettings {
    pub queue_enabled: bool,
    pub extension_enabled: bool,
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self {
            queue_enabled: true,
            extension_enabled: true,
        }
    }
}

impl SettingsProvider for StaticSettings {
    fn queue_enabled(&self) -> bool {
        self.queue_enabled
    }

    fn extension_enabled(&self) -> bool {
        self.extension_enabled
    }
}

/// Settings that the embedding layer can flip at runtime.
///
/// Clones share the same flags.
#[derive(Debug, Clone)]
pub struct SharedSettings {
    queue_enabled: Rc<Cell<bool>>,
    extension_enabled: Rc<Cell<bool>>,
}

impl SharedSettings {
    pub fn new(queue_enabled: bool, extension_enabled: bool) -> Self {
        Self {
            queue_enabled: Rc::new(Cell::new(queue_enabled)),
            extension_enabled: Rc::new(Cell::new(extension_enabled)),
        }
    }

    pub fn set_queue_enabled(&self, enabled: bool) {
        self.queue_enabled.set(enabled);
    }

    pub fn set_extension_enabled(&self, enabled: bool) {
        self.extension_enabled.set(enabled);
    }
}

impl SettingsProvider for SharedSettings {
    fn queue_enabled(&self) -> bool {
        self.queue_enabled.get()
    }

    fn extension_enabled(&self) -> bool {
        self.extension_enabled.get()
    }
}
