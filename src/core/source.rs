use crate::core::Video;
use crate::error::FetchError;
use async_trait::async_trait;

/// A source of video metadata for one fetch target.
///
/// The target is either a bare channel identifier or a fully-qualified
/// channel/feed URL; implementations resolve bare identifiers themselves.
/// The production implementation shells out to yt-dlp; tests substitute
/// in-memory sources.
#[async_trait]
pub trait FeedSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetches the most recent videos for `target`, capped by the source.
    /// One invocation, no retries.
    async fn fetch(&self, target: &str) -> Result<Vec<Video>, FetchError>;
}
