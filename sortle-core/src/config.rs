use serde::{Deserialize, Serialize};

/// Public AtCoder Problems dump used when no catalog location is given.
pub const DEFAULT_CATALOG_URL: &str = "https://kenkoooo.com/atcoder/resources/problems.json";
pub const DEFAULT_GROUP_PREFIX: &str = "abc";
/// Older contests used a different problem set layout.
pub const DEFAULT_MIN_GROUP_NUMBER: u32 = 126;
/// Japan Standard Time; the daily puzzle rolls over at local midnight.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Game-wide settings. Every field has a default so partial JSON files work.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub group_prefix: String,
    pub min_group_number: u32,
    pub utc_offset_hours: i32,
    pub catalog_url: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            group_prefix: DEFAULT_GROUP_PREFIX.to_string(),
            min_group_number: DEFAULT_MIN_GROUP_NUMBER,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Upper-cased prefix used in result and share texts, e.g. `ABC`.
    pub fn display_prefix(&self) -> String {
        self.group_prefix.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{"min_group_number": 200}"#).unwrap();
        assert_eq!(cfg.min_group_number, 200);
        assert_eq!(cfg.group_prefix, "abc");
        assert_eq!(cfg.utc_offset_hours, 9);
        assert_eq!(cfg.catalog_url, DEFAULT_CATALOG_URL);
    }

    #[test]
    fn display_prefix_is_upper_case() {
        assert_eq!(GameConfig::default().display_prefix(), "ABC");
    }
}
