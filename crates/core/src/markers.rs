//! The `[ACTION:<COMMAND>|<argument>]` wire format embedded in assistant
//! text, and the arbitration rule deciding whether parsed markers run.

use deskmate_intent::{Action, ActionKind};

const MARKER_PREFIX: &str = "[ACTION:";

/// Remove every action marker from the text shown to the user.
pub fn strip_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(MARKER_PREFIX) {
        out.push_str(&rest[..start]);
        match rest[start..].find(']') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                // Unterminated marker: keep it visible rather than eat the
                // tail of the message.
                out.push_str(&rest[start..]);
                return out.trim().to_string();
            }
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Extract the actions declared by markers, in order of appearance.
/// Unknown command names are dropped; the argument is everything after the
/// first `|` and may itself contain `|`.
pub fn parse_markers(text: &str) -> Vec<Action> {
    let mut actions = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(MARKER_PREFIX) {
        let inner_start = start + MARKER_PREFIX.len();
        let Some(end) = rest[inner_start..].find(']') else {
            break;
        };
        let inner = &rest[inner_start..inner_start + end];
        rest = &rest[inner_start + end + 1..];

        let (command, argument) = match inner.split_once('|') {
            Some((cmd, arg)) => (cmd.trim(), arg.trim()),
            None => (inner.trim(), ""),
        };
        match ActionKind::from_tag(&command.to_uppercase()) {
            Some(kind) => actions.push(Action::new(kind, argument)),
            None => tracing::warn!(command, "ignoring unknown action marker"),
        }
    }
    actions
}

/// The arbitration rule: markers are always stripped from the display
/// text, but they are parsed and returned for execution only when no
/// locally detected action already fired this turn.
pub fn arbitrate(assistant_text: &str, local_actions_fired: bool) -> (String, Vec<Action>) {
    let display = strip_markers(assistant_text);
    let actions = if local_actions_fired {
        Vec::new()
    } else {
        parse_markers(assistant_text)
    };
    (display, actions)
}
