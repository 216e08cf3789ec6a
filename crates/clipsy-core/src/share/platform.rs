//! Supported content platforms and their URL path markers.

use serde::{Deserialize, Serialize};

/// A social media platform whose shared links can be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "tiktok")]
    TikTok,
    Twitter,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::YouTube,
        Platform::TikTok,
        Platform::Twitter,
    ];

    /// Substrings that mark a URL as belonging to this platform's content.
    ///
    /// Matching is a case-sensitive substring test.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            Platform::Instagram => &["instagram.com/reel", "instagram.com/p/", "instagram.com/tv/"],
            Platform::YouTube => &["youtube.com/shorts", "youtu.be/", "youtube.com/watch"],
            Platform::TikTok => &["tiktok.com/", "vm.tiktok.com/"],
            Platform::Twitter => &["twitter.com/", "x.com/"],
        }
    }

    pub fn matches(self, candidate: &str) -> bool {
        self.markers().iter().any(|marker| candidate.contains(marker))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Platform::Instagram => "instagram",
            Platform::YouTube => "youtube",
            Platform::TikTok => "tiktok",
            Platform::Twitter => "twitter",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_match_own_platform() {
        assert!(Platform::Instagram.matches("https://www.instagram.com/reel/abc/"));
        assert!(Platform::YouTube.matches("https://youtu.be/xyz"));
        assert!(Platform::TikTok.matches("https://vm.tiktok.com/ZM123/"));
        assert!(Platform::Twitter.matches("https://x.com/someone/status/1"));
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert!(!Platform::Instagram.matches("https://INSTAGRAM.COM/reel/abc"));
    }

    #[test]
    fn test_serde_names() {
        let parsed: Vec<Platform> =
            serde_json::from_str(r#"["instagram","youtube","tiktok","twitter"]"#).unwrap();
        assert_eq!(parsed, Platform::ALL.to_vec());
    }
}
