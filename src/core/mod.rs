pub mod feed;
pub mod source;
pub mod video;

pub use feed::{FeedAggregator, FEED_LIMIT, HOME_FEED_URL, SUBSCRIPTIONS_FEED_URL};
pub use source::FeedSource;
pub use video::{sort_newest_first, Video};
