use crate::core::{FeedSource, Video};
use crate::error::FetchError;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;
use url::Url;

/// Base path used to canonicalize bare channel identifiers.
pub const CHANNEL_BASE_URL: &str = "https://www.youtube.com/channel/";

const DEFAULT_BINARY: &str = "yt-dlp";

/// Metadata source backed by the yt-dlp binary.
///
/// One subprocess per fetch: `yt-dlp <url> --skip-download --dump-json
/// --playlist-end <n>`. yt-dlp emits one JSON object per line on stdout;
/// lines that fail to deserialize are skipped rather than failing the fetch,
/// since the tool interleaves partial or corrupt records on some feeds.
/// Authenticated feeds assume yt-dlp has cookies configured on its side.
pub struct YtDlpSource {
    binary: String,
    playlist_end: usize,
}

impl YtDlpSource {
    pub fn new(binary: impl Into<String>, playlist_end: usize) -> Self {
        Self {
            binary: binary.into(),
            playlist_end,
        }
    }

    /// Probes the binary with `--version` so callers can fail early with a
    /// clear message instead of a spawn error mid-aggregation.
    pub async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Bare channel identifiers become canonical channel URLs; anything that
    /// already parses as an absolute URL passes through untouched.
    fn canonical_target(target: &str) -> String {
        if Url::parse(target).is_ok() {
            target.to_string()
        } else {
            format!("{CHANNEL_BASE_URL}{target}")
        }
    }
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY, crate::core::FEED_LIMIT)
    }
}

fn parse_video_line(line: &str) -> Option<Video> {
    serde_json::from_str(line).ok()
}

#[async_trait]
impl FeedSource for YtDlpSource {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn fetch(&self, target: &str) -> Result<Vec<Video>, FetchError> {
        let url = Self::canonical_target(target);
        debug!(%url, binary = %self.binary, "spawning metadata extraction");

        let mut child = Command::new(&self.binary)
            .arg(&url)
            .args(["--skip-download", "--dump-json", "--playlist-end"])
            .arg(self.playlist_end.to_string())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| FetchError::Spawn {
                command: self.binary.clone(),
                source,
            })?;

        let stdout = child.stdout.take().ok_or_else(|| FetchError::MissingStdout {
            command: self.binary.clone(),
        })?;

        // Parse records as they stream rather than buffering the whole dump.
        let mut lines = BufReader::new(stdout).lines();
        let mut videos = Vec::new();
        while let Some(line) = lines.next_line().await.map_err(FetchError::Read)? {
            match parse_video_line(&line) {
                Some(video) => videos.push(video),
                None => debug!(%url, "skipping malformed metadata line"),
            }
        }

        let status = child.wait().await.map_err(FetchError::Read)?;
        if !status.success() {
            return Err(FetchError::Exit {
                command: self.binary.clone(),
                status,
            });
        }

        Ok(videos)
    }
}
