use crate::core::{sort_newest_first, FeedSource, Video};
use crate::error::{Error, Result};
use crate::store::CategoryStore;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info};

/// Feed URL behind the reserved `home` pseudo-category.
pub const HOME_FEED_URL: &str = "https://www.youtube.com/feed/recommended";

/// Feed URL behind the reserved `subscriptions` pseudo-category.
pub const SUBSCRIPTIONS_FEED_URL: &str = "https://www.youtube.com/feed/subscriptions";

/// Maximum number of videos in an aggregated feed.
pub const FEED_LIMIT: usize = 20;

/// Merges per-channel fetches into one recency-sorted feed.
///
/// Fan-out runs at most `concurrency` fetches at a time and always joins
/// every fetch before reporting. A single failed channel invalidates the
/// whole request; no partial feeds.
pub struct FeedAggregator {
    source: Arc<dyn FeedSource>,
    concurrency: usize,
}

impl FeedAggregator {
    pub fn new(source: Arc<dyn FeedSource>, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolves `category` and returns its merged feed, capped at
    /// [`FEED_LIMIT`] entries.
    ///
    /// The reserved names `home` and `subscriptions` (any casing) bypass the
    /// store and delegate to the source with a fixed feed URL, returning its
    /// result unmodified — no re-sort, the tool already orders and caps it.
    pub async fn feed(&self, store: &CategoryStore, category: &str) -> Result<Vec<Video>> {
        if category.eq_ignore_ascii_case("home") {
            return self.fetch_one(HOME_FEED_URL).await;
        }
        if category.eq_ignore_ascii_case("subscriptions") {
            return self.fetch_one(SUBSCRIPTIONS_FEED_URL).await;
        }

        let channels = store.channels(category)?;
        if channels.is_empty() {
            return Err(Error::EmptyCategory(category.to_string()));
        }

        info!(
            category,
            channels = channels.len(),
            "aggregating category feed"
        );

        // One fetch per channel, at most `concurrency` in flight. Collecting
        // the unordered stream joins every task, so sibling fetches run to
        // completion even when one of them has already failed.
        let results: Vec<(String, std::result::Result<Vec<Video>, _>)> = stream::iter(channels)
            .map(|channel| {
                let source = Arc::clone(&self.source);
                async move {
                    let result = source.fetch(&channel).await;
                    (channel, result)
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut videos = Vec::new();
        for (target, result) in results {
            match result {
                Ok(fetched) => {
                    debug!(channel = %target, count = fetched.len(), "channel fetch complete");
                    videos.extend(fetched);
                }
                Err(source) => return Err(Error::Fetch { target, source }),
            }
        }

        sort_newest_first(&mut videos);
        videos.truncate(FEED_LIMIT);
        Ok(videos)
    }

    async fn fetch_one(&self, url: &str) -> Result<Vec<Video>> {
        debug!(url, source = self.source.name(), "fetching reserved feed");
        self.source.fetch(url).await.map_err(|source| Error::Fetch {
            target: url.to_string(),
            source,
        })
    }
}
