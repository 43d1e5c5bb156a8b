/// Localized string lookup supplied by the embedding layer.
pub trait Localizer {
    /// Returns the message for `key` with `$1`..`$9` replaced by `substitutions`.
    /// Unknown keys yield an empty string.
    fn get_message(&self, key: &str, substitutions: &[&str]) -> String;
}

/// Built-in English catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl Localizer for EnglishMessages {
    fn get_message(&self, key: &str, substitutions: &[&str]) -> String {
        let template = match key {
            "queueToggleLabel" => "Queue message",
            "queuePanelTitle" => "Queued messages ($1)",
            "queueStatusGenerating" => "Waiting for the current response",
            "queueStatusIdle" => "Sending when ready",
            "queueStatusSending" => "Sending…",
            "queueRemoveItem" => "Remove",
            _ => return String::new(),
        };
        substitute(template, substitutions)
    }
}

pub(crate) fn substitute(template: &str, substitutions: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '$' {
            if let Some(index) = chars.peek().and_then(|c| c.to_digit(10)) {
                chars.next();
                let value = (index as usize)
                    .checked_sub(1)
                    .and_then(|i| substitutions.get(i));
                out.push_str(value.copied().unwrap_or_default());
                continue;
            }
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positional_placeholders() {
        assert_eq!(substitute("$1 of $2", &["3", "4"]), "3 of 4");
        assert_eq!(substitute("cost $ 5", &[]), "cost $ 5");
        assert_eq!(substitute("missing $3", &["a"]), "missing ");
    }

    #[test]
    fn unknown_key_is_empty() {
        assert_eq!(EnglishMessages.get_message("nope", &[]), "");
        assert_eq!(
            EnglishMessages.get_message("queuePanelTitle", &["2"]),
            "Queued messages (2)"
        );
    }
}
