/// Host state sampled at the start of a pulse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Identifier of the current conversation.
    pub origin: String,
    /// A stop control is present.
    pub generating: bool,
    /// Current composer text, or `None` when no composer was found.
    pub composer: Option<String>,
    pub now_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// One reconciliation pass over freshly observed host state.
    Pulse(Observation),
    /// The deferred send continuation fired.
    SendDue { origin: String },
    /// Outcome of invoking the send control for the staged text.
    SendDispatched { ok: bool, at_ms: u64 },
    /// User submitted composer text for later replay.
    Enqueue {
        text: String,
        origin: String,
        at_ms: u64,
        display_time: String,
    },
    /// User removed the queued message at this position.
    RemoveAt(usize),
    /// Drop all queued and in-flight work.
    Reset,
}
