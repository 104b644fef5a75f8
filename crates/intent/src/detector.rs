//! Ordered pattern rules over raw user text, first match wins.
//!
//! The detector is deterministic: identical input always produces the same
//! action list, and no state is carried between calls.

use crate::action::{Action, ActionKind};
use crate::tables::{self, APPS, FILE_EXT_KEYWORDS, SITES};
use regex::Regex;
use std::path::PathBuf;

type Rule = fn(&IntentDetector, &str) -> Option<Action>;

/// Rules in precedence order. Later rules are never consulted once one
/// matches.
const RULES: &[(&str, Rule)] = &[
    ("close_app", IntentDetector::rule_close_app),
    ("screenshot", IntentDetector::rule_screenshot),
    ("search_web", IntentDetector::rule_search_web),
    ("find_file", IntentDetector::rule_find_file),
    ("open", IntentDetector::rule_open),
];

pub struct IntentDetector {
    close_re: Regex,
    screenshot_re: Regex,
    screenshot_bare_re: Regex,
    search_re: Regex,
    find_re: Regex,
    file_ext_re: Regex,
    open_verb_re: Regex,
    open_re: Regex,
    url_re: Regex,
    folders: Vec<(&'static str, PathBuf)>,
}

impl IntentDetector {
    pub fn new() -> Self {
        let folders = {
            let map = tables::folder_map();
            // Fixed probe order so substring hits are stable.
            let order = [
                "desktop",
                "documents",
                "downloads",
                "pictures",
                "music",
                "videos",
                "home",
            ];
            order
                .iter()
                .filter_map(|name| map.get(name).map(|p| (*name, p.clone())))
                .collect()
        };

        Self {
            close_re: Regex::new(
                r"^(?:close|kill|exit|quit|stop|terminate|end|cierra|cerrar)\s+(?:the\s+)?(?:my\s+)?(.+)$",
            )
            .unwrap(),
            screenshot_re: Regex::new(
                r"\b(?:take|capture|grab|do)\b.*\b(?:screenshot|screen\s*shot|screen\s*cap|captura)\b",
            )
            .unwrap(),
            screenshot_bare_re: Regex::new(r"\bscreenshot\b").unwrap(),
            search_re: Regex::new(
                r"^(?:search\s+for|look\s+up|google|search|buscar|busca)\s+(.+)$",
            )
            .unwrap(),
            find_re: Regex::new(
                r"^(?:find|search|look\s+for|busca)\s+(?:my\s+)?(?:files?\s+)?(?:called\s+|named\s+)?(.+?)(?:\s+files?)?(?:\s+on\s+.+)?$",
            )
            .unwrap(),
            file_ext_re: Regex::new(&format!(r"\b(?:{FILE_EXT_KEYWORDS})\b")).unwrap(),
            open_verb_re: Regex::new(r"\b(?:open|launch|go|navigate)\b").unwrap(),
            open_re: Regex::new(
                r"^(?:open|launch|start|run|go\s+to|navigate\s+to|abre|abrir)\s+(?:the\s+)?(?:my\s+)?(.+)$",
            )
            .unwrap(),
            url_re: Regex::new(r"^(?:https?://|www\.)").unwrap(),
            folders,
        }
    }

    /// Classify raw user text into zero or one actions. The return type is a
    /// list so multi-action rules can be added without changing callers.
    pub fn detect(&self, text: &str) -> Vec<Action> {
        let lower = text.trim().to_lowercase();
        if lower.is_empty() {
            return Vec::new();
        }

        for (name, rule) in RULES {
            if let Some(action) = rule(self, &lower) {
                tracing::debug!(rule = name, kind = %action.kind, "intent matched");
                return vec![action];
            }
        }
        Vec::new()
    }

    fn rule_close_app(&self, lower: &str) -> Option<Action> {
        let caps = self.close_re.captures(lower)?;
        let target = caps[1].trim().trim_end_matches('.').to_string();

        for app in APPS {
            if target.contains(app) || app.contains(target.as_str()) {
                return Some(Action::new(ActionKind::CloseApp, *app));
            }
        }
        // Unknown target: let the executor attempt a generic process kill.
        Some(Action::new(ActionKind::CloseApp, target))
    }

    fn rule_screenshot(&self, lower: &str) -> Option<Action> {
        if self.screenshot_re.is_match(lower) || self.screenshot_bare_re.is_match(lower) {
            return Some(Action::new(ActionKind::Screenshot, ""));
        }
        None
    }

    fn rule_search_web(&self, lower: &str) -> Option<Action> {
        let caps = self.search_re.captures(lower)?;
        Some(Action::new(ActionKind::SearchWeb, caps[1].trim()))
    }

    fn rule_find_file(&self, lower: &str) -> Option<Action> {
        // "open downloads" and friends belong to the open rule.
        if self.open_verb_re.is_match(lower) {
            return None;
        }
        let caps = self.find_re.captures(lower)?;
        let pattern = caps[1].trim().to_string();

        let looks_like_files = pattern.chars().any(|c| matches!(c, '*' | '.' | '?'))
            || self.file_ext_re.is_match(&pattern);
        if !looks_like_files {
            return None;
        }

        // "find pdf" -> "*.pdf"
        let pattern = if !pattern.contains('*') && !pattern.contains('.') {
            format!("*.{pattern}")
        } else {
            pattern
        };
        Some(Action::new(ActionKind::FindFile, pattern))
    }

    fn rule_open(&self, lower: &str) -> Option<Action> {
        let caps = self.open_re.captures(lower)?;
        let target = caps[1].trim().trim_end_matches('.').to_string();

        // (a) literal URL
        if self.url_re.is_match(&target) {
            return Some(Action::new(ActionKind::OpenUrl, target));
        }

        // (b) known site keyword
        for (site, url) in SITES {
            if target.contains(site) {
                return Some(Action::new(ActionKind::OpenUrl, *url));
            }
        }

        // (c) known folder keyword
        for (folder, path) in &self.folders {
            if target.contains(folder) {
                return Some(Action::new(
                    ActionKind::OpenFolder,
                    path.to_string_lossy().to_string(),
                ));
            }
        }

        // (d) path-like target
        if target.chars().any(|c| matches!(c, '/' | '\\' | ':')) {
            let expanded = tables::expand_home(&target);
            if expanded.exists() {
                return Some(Action::new(
                    ActionKind::OpenFolder,
                    expanded.to_string_lossy().to_string(),
                ));
            }
            return Some(Action::new(ActionKind::OpenApp, target));
        }

        // (e) known app
        for app in APPS {
            if target.contains(app) || app.contains(target.as_str()) {
                return Some(Action::new(ActionKind::OpenApp, *app));
            }
        }

        // (f) fallback: try it as an app name anyway
        Some(Action::new(ActionKind::OpenApp, target))
    }
}

impl Default for IntentDetector {
    fn default() -> Self {
        Self::new()
    }
}
