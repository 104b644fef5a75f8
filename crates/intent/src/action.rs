use serde::{Deserialize, Serialize};

/// The commands the executor knows how to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    OpenUrl,
    OpenApp,
    SearchWeb,
    OpenFolder,
    FindFile,
    SystemCmd,
    CloseApp,
    Screenshot,
    TypeText,
}

impl ActionKind {
    /// Wire name used inside `[ACTION:...]` tags.
    pub fn tag(&self) -> &'static str {
        match self {
            ActionKind::OpenUrl => "OPEN_URL",
            ActionKind::OpenApp => "OPEN_APP",
            ActionKind::SearchWeb => "SEARCH_WEB",
            ActionKind::OpenFolder => "OPEN_FOLDER",
            ActionKind::FindFile => "FIND_FILE",
            ActionKind::SystemCmd => "SYSTEM_CMD",
            ActionKind::CloseApp => "CLOSE_APP",
            ActionKind::Screenshot => "SCREENSHOT",
            ActionKind::TypeText => "TYPE_TEXT",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "OPEN_URL" => Some(ActionKind::OpenUrl),
            "OPEN_APP" => Some(ActionKind::OpenApp),
            "SEARCH_WEB" => Some(ActionKind::SearchWeb),
            "OPEN_FOLDER" => Some(ActionKind::OpenFolder),
            "FIND_FILE" => Some(ActionKind::FindFile),
            "SYSTEM_CMD" => Some(ActionKind::SystemCmd),
            "CLOSE_APP" => Some(ActionKind::CloseApp),
            "SCREENSHOT" => Some(ActionKind::Screenshot),
            "TYPE_TEXT" => Some(ActionKind::TypeText),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One concrete side effect to perform. The argument is opaque text; only
/// the executor handler for the matching kind interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub argument: String,
}

impl Action {
    pub fn new(kind: ActionKind, argument: impl Into<String>) -> Self {
        Self {
            kind,
            argument: argument.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for kind in [
            ActionKind::OpenUrl,
            ActionKind::OpenApp,
            ActionKind::SearchWeb,
            ActionKind::OpenFolder,
            ActionKind::FindFile,
            ActionKind::SystemCmd,
            ActionKind::CloseApp,
            ActionKind::Screenshot,
            ActionKind::TypeText,
        ] {
            assert_eq!(ActionKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn unknown_tag_is_none() {
        assert_eq!(ActionKind::from_tag("REBOOT"), None);
        assert_eq!(ActionKind::from_tag("open_url"), None);
    }
}
