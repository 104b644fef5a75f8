//! Friendly-name alias tables for launching and closing applications.

use std::collections::HashMap;

/// Friendly name -> executable on Linux.
const LAUNCH_ALIASES: &[(&str, &str)] = &[
    ("chrome", "google-chrome"),
    ("google chrome", "google-chrome"),
    ("chromium", "chromium"),
    ("firefox", "firefox"),
    ("brave", "brave-browser"),
    ("gedit", "gedit"),
    ("calculator", "gnome-calculator"),
    ("calc", "gnome-calculator"),
    ("files", "nautilus"),
    ("file manager", "nautilus"),
    ("nautilus", "nautilus"),
    ("terminal", "gnome-terminal"),
    ("konsole", "konsole"),
    ("alacritty", "alacritty"),
    ("kitty", "kitty"),
    ("spotify", "spotify"),
    ("code", "code"),
    ("vscode", "code"),
    ("vs code", "code"),
    ("visual studio code", "code"),
    ("gimp", "gimp"),
    ("libreoffice", "libreoffice"),
    ("writer", "libreoffice"),
    ("discord", "discord"),
    ("slack", "slack"),
    ("teams", "teams-for-linux"),
    ("obs", "obs"),
    ("vlc", "vlc"),
    ("steam", "steam"),
    ("thunderbird", "thunderbird"),
    ("telegram", "telegram-desktop"),
    ("system monitor", "gnome-system-monitor"),
    ("settings", "gnome-control-center"),
];

/// Friendly name -> candidate process names for a terminate-by-name.
const KILL_ALIASES: &[(&str, &[&str])] = &[
    ("chrome", &["chrome", "google-chrome"]),
    ("google chrome", &["chrome", "google-chrome"]),
    ("chromium", &["chromium"]),
    ("firefox", &["firefox", "firefox-bin"]),
    ("brave", &["brave", "brave-browser"]),
    ("gedit", &["gedit"]),
    ("calculator", &["gnome-calculator"]),
    ("calc", &["gnome-calculator"]),
    ("files", &["nautilus"]),
    ("nautilus", &["nautilus"]),
    ("terminal", &["gnome-terminal-", "gnome-terminal"]),
    ("konsole", &["konsole"]),
    ("alacritty", &["alacritty"]),
    ("kitty", &["kitty"]),
    ("spotify", &["spotify"]),
    ("code", &["code"]),
    ("vscode", &["code"]),
    ("vs code", &["code"]),
    ("visual studio code", &["code"]),
    ("gimp", &["gimp"]),
    ("libreoffice", &["soffice.bin", "soffice"]),
    ("writer", &["soffice.bin", "soffice"]),
    ("discord", &["Discord", "discord"]),
    ("slack", &["slack"]),
    ("teams", &["teams-for-linux"]),
    ("obs", &["obs"]),
    ("vlc", &["vlc"]),
    ("steam", &["steam"]),
    ("thunderbird", &["thunderbird"]),
    ("telegram", &["telegram-desktop"]),
    ("system monitor", &["gnome-system-monitor"]),
];

pub fn launch_alias_map() -> HashMap<&'static str, &'static str> {
    LAUNCH_ALIASES.iter().copied().collect()
}

pub fn kill_alias_map() -> HashMap<&'static str, &'static [&'static str]> {
    KILL_ALIASES.iter().copied().collect()
}

/// Resolve a friendly close target to the process names worth trying.
/// Unknown names fall back to the raw target plus its lowercase form.
pub fn kill_candidates(
    map: &HashMap<&'static str, &'static [&'static str]>,
    name: &str,
) -> Vec<String> {
    let key = name.trim().to_lowercase();
    if let Some(candidates) = map.get(key.as_str()) {
        return candidates.iter().map(|c| c.to_string()).collect();
    }
    let mut fallback = vec![name.trim().to_string()];
    if key != name.trim() {
        fallback.push(key);
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_alias_resolves_to_executable() {
        let map = launch_alias_map();
        assert_eq!(map.get("vs code"), Some(&"code"));
        assert_eq!(map.get("chrome"), Some(&"google-chrome"));
    }

    #[test]
    fn kill_candidates_for_known_app() {
        let map = kill_alias_map();
        let candidates = kill_candidates(&map, "LibreOffice");
        assert_eq!(candidates, vec!["soffice.bin", "soffice"]);
    }

    #[test]
    fn kill_candidates_fallback_keeps_raw_name() {
        let map = kill_alias_map();
        let candidates = kill_candidates(&map, "SomeDaemon");
        assert!(candidates.contains(&"SomeDaemon".to_string()));
        assert!(candidates.contains(&"somedaemon".to_string()));
    }
}
