use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration.
///
/// Loaded from an optional `subfeed.toml` in the working directory; any
/// field left out of the file keeps its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the category store file.
    pub store_path: PathBuf,
    /// Name or path of the yt-dlp binary.
    pub ytdlp_path: String,
    /// Per-target cap passed to the extractor as `--playlist-end`.
    pub playlist_limit: usize,
    /// Maximum number of channel fetches in flight at once.
    pub concurrent_fetches: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("subscriptions.json"),
            ytdlp_path: String::from("yt-dlp"),
            playlist_limit: 20,
            concurrent_fetches: 8,
        }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "subfeed.toml";

    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("subfeed.toml")).unwrap();
        assert_eq!(config.playlist_limit, 20);
        assert_eq!(config.ytdlp_path, "yt-dlp");
    }

    #[test]
    fn partial_file_keeps_defaults_for_absent_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subfeed.toml");
        std::fs::write(&path, "concurrent_fetches = 2\nstore_path = \"subs.json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.concurrent_fetches, 2);
        assert_eq!(config.store_path, PathBuf::from("subs.json"));
        assert_eq!(config.playlist_limit, 20);
    }
}
