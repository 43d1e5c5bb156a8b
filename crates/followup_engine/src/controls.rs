use engine_logging::engine_trace;

use crate::HostPage;

struct ControlSpec {
    name: &'static str,
    hints: &'static [&'static str],
    keywords: &'static [&'static str],
    /// Labels that disqualify a candidate.
    rejects: &'static [&'static str],
}

const STOP_KEYWORDS: &[&str] = &[
    "stop",
    "arrêter",
    "detener",
    "parar",
    "stopp",
    "interrompi",
    "停止",
    "중지",
    "остановить",
];

const SEND_KEYWORDS: &[&str] = &[
    "send",
    "envoyer",
    "enviar",
    "senden",
    "invia",
    "发送",
    "送信",
    "보내기",
    "отправить",
];

const STOP: ControlSpec = ControlSpec {
    name: "stop",
    hints: &[
        "[data-testid='stop-button']",
        "button[data-testid*='stop']",
        "button[aria-label='Stop generating']",
        "button[aria-label='Stop streaming']",
    ],
    keywords: STOP_KEYWORDS,
    rejects: &[],
};

const SEND: ControlSpec = ControlSpec {
    name: "send",
    hints: &[
        "[data-testid='send-button']",
        "button[data-testid*='send']",
        "button[type='submit']",
    ],
    keywords: SEND_KEYWORDS,
    rejects: STOP_KEYWORDS,
};

/// The control that stops the current generation, if any.
pub fn find_stop_button<H: HostPage>(host: &H, form: Option<&H::Node>) -> Option<H::Node> {
    find_control(host, form, &STOP)
}

/// The control that submits the composer, if any.
pub fn find_send_button<H: HostPage>(host: &H, form: Option<&H::Node>) -> Option<H::Node> {
    find_control(host, form, &SEND)
}

/// Form, then its parent, then the whole page.
fn find_control<H: HostPage>(
    host: &H,
    form: Option<&H::Node>,
    spec: &ControlSpec,
) -> Option<H::Node> {
    let mut scopes: Vec<Option<H::Node>> = Vec::with_capacity(3);
    if let Some(form) = form {
        scopes.push(Some(form.clone()));
        if let Some(parent) = host.parent(form) {
            scopes.push(Some(parent));
        }
    }
    scopes.push(None);

    let found = scopes
        .iter()
        .find_map(|scope| find_in_scope(host, scope.as_ref(), spec));
    if found.is_none() {
        engine_trace!("no {} control found", spec.name);
    }
    found
}

fn find_in_scope<H: HostPage>(
    host: &H,
    scope: Option<&H::Node>,
    spec: &ControlSpec,
) -> Option<H::Node> {
    let acceptable = |node: &H::Node| !matches_any(&label_of(host, node), spec.rejects);

    for hint in spec.hints {
        if let Some(node) = host.query(scope, hint).into_iter().find(|n| acceptable(n)) {
            return Some(node);
        }
    }

    host.query(scope, "button").into_iter().find(|node| {
        let label = label_of(host, node);
        matches_any(&label, spec.keywords) && !matches_any(&label, spec.rejects)
    })
}

fn label_of<H: HostPage>(host: &H, node: &H::Node) -> String {
    let mut label = String::new();
    for name in ["aria-label", "title"] {
        if let Some(value) = host.attribute(node, name) {
            label.push_str(&value);
            label.push(' ');
        }
    }
    label.push_str(&host.text_content(node));
    label.to_lowercase()
}

fn matches_any(label: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| label.contains(keyword))
}
