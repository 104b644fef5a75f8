//! Static lookup data shared by the intent rules.

use std::collections::HashMap;
use std::path::PathBuf;

/// Site keyword -> canonical URL.
pub const SITES: &[(&str, &str)] = &[
    ("youtube", "https://www.youtube.com"),
    ("yt", "https://www.youtube.com"),
    ("google", "https://www.google.com"),
    ("gmail", "https://mail.google.com"),
    ("github", "https://github.com"),
    ("reddit", "https://www.reddit.com"),
    ("twitter", "https://twitter.com"),
    ("x", "https://twitter.com"),
    ("facebook", "https://www.facebook.com"),
    ("instagram", "https://www.instagram.com"),
    ("linkedin", "https://www.linkedin.com"),
    ("twitch", "https://www.twitch.tv"),
    ("netflix", "https://www.netflix.com"),
    ("amazon", "https://www.amazon.com"),
    ("wikipedia", "https://www.wikipedia.org"),
    ("stackoverflow", "https://stackoverflow.com"),
    ("stack overflow", "https://stackoverflow.com"),
    ("whatsapp web", "https://web.whatsapp.com"),
    ("chatgpt", "https://chat.openai.com"),
    ("spotify", "https://open.spotify.com"),
];

/// App names the detector recognises as launch/close targets.
pub const APPS: &[&str] = &[
    "chrome",
    "google chrome",
    "chromium",
    "firefox",
    "brave",
    "gedit",
    "calculator",
    "calc",
    "files",
    "nautilus",
    "file manager",
    "terminal",
    "konsole",
    "alacritty",
    "kitty",
    "spotify",
    "code",
    "vscode",
    "vs code",
    "visual studio code",
    "gimp",
    "libreoffice",
    "writer",
    "discord",
    "slack",
    "teams",
    "obs",
    "vlc",
    "steam",
    "thunderbird",
    "telegram",
    "system monitor",
    "settings",
];

/// Folder keywords resolvable to well-known user directories.
pub fn folder_map() -> HashMap<&'static str, PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
    let mut map = HashMap::new();
    map.insert("desktop", home.join("Desktop"));
    map.insert("documents", home.join("Documents"));
    map.insert("downloads", home.join("Downloads"));
    map.insert("pictures", home.join("Pictures"));
    map.insert("music", home.join("Music"));
    map.insert("videos", home.join("Videos"));
    map.insert("home", home);
    map
}

/// Extension keywords that mark a phrase as a file search.
pub const FILE_EXT_KEYWORDS: &str = "pdf|txt|doc|xls|ppt|jpg|png|mp3|mp4|zip|exe";

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            let rest = rest.trim_start_matches('/');
            return if rest.is_empty() {
                home
            } else {
                home.join(rest)
            };
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_map_covers_well_known_dirs() {
        let map = folder_map();
        for key in ["desktop", "documents", "downloads", "home"] {
            assert!(map.contains_key(key), "missing folder keyword {key}");
        }
    }

    #[test]
    fn expand_home_handles_tilde() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("~/Desktop"), home.join("Desktop"));
        assert_eq!(expand_home("/tmp/x"), PathBuf::from("/tmp/x"));
    }
}
