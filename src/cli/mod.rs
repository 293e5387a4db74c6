use crate::config::Config;
use crate::core::{FeedAggregator, Video};
use crate::extractors::YtDlpSource;
use crate::store::CategoryStore;
use crate::utils::{format_duration, format_upload_date, truncate_description};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

const RULE: &str = "------------------------------------------------------------";

#[derive(Parser)]
#[command(name = "subfeed")]
#[command(about = "Organize YouTube subscriptions into categories with merged feeds")]
#[command(version)]
pub struct Cli {
    /// Path to the subscriptions store file (overrides configuration)
    #[arg(long, value_name = "FILE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage channels within a category
    Channel {
        #[command(subcommand)]
        action: ChannelAction,
    },
    /// Print the combined feed (last 20 videos) for a category
    Feed {
        /// Category name, or one of the reserved feeds "home" / "subscriptions"
        category: String,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create a new category
    Create { name: String },
    /// Delete an existing category
    Delete { name: String },
    /// List all categories
    List,
}

#[derive(Subcommand)]
pub enum ChannelAction {
    /// Add a YouTube channel (ID or URL) to a category
    Add { category: String, channel: String },
    /// Remove a YouTube channel from a category
    Remove { category: String, channel: String },
    /// List the channels in a category
    List { category: String },
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let config = Config::load()?;
        let store_path = self
            .store
            .clone()
            .unwrap_or_else(|| config.store_path.clone());
        let store = CategoryStore::new(store_path);

        match &self.command {
            Command::Category { action } => match action {
                CategoryAction::Create { name } => {
                    store.create_category(name)?;
                    println!("Category '{name}' created successfully.");
                }
                CategoryAction::Delete { name } => {
                    store.delete_category(name)?;
                    println!("Category '{name}' deleted successfully.");
                }
                CategoryAction::List => {
                    let mut categories = store.categories()?;
                    categories.sort();
                    for category in categories {
                        println!("{category}");
                    }
                }
            },
            Command::Channel { action } => match action {
                ChannelAction::Add { category, channel } => {
                    store.add_channel(category, channel)?;
                    println!("Channel '{channel}' added to category '{category}'.");
                }
                ChannelAction::Remove { category, channel } => {
                    store.remove_channel(category, channel)?;
                    println!("Channel '{channel}' removed from category '{category}'.");
                }
                ChannelAction::List { category } => {
                    for channel in store.channels(category)? {
                        println!("{channel}");
                    }
                }
            },
            Command::Feed { category } => {
                let source = YtDlpSource::new(config.ytdlp_path.clone(), config.playlist_limit);
                if !source.is_available().await {
                    anyhow::bail!(
                        "yt-dlp is not installed or not found at '{}'",
                        config.ytdlp_path
                    );
                }

                let aggregator =
                    FeedAggregator::new(Arc::new(source), config.concurrent_fetches);
                let feed = aggregator.feed(&store, category).await?;

                if feed.is_empty() {
                    println!("No videos found in the channels for this category.");
                    return Ok(());
                }

                println!("Feed for category '{category}' (last {} videos):", feed.len());
                println!("{RULE}");
                for video in &feed {
                    print_video(video);
                }
            }
        }

        Ok(())
    }
}

fn print_video(video: &Video) {
    println!("Title       : {}", video.title);
    println!("URL         : {}", video.webpage_url);
    println!("Thumbnail   : {}", video.thumbnail);
    println!("Published   : {}", format_upload_date(&video.upload_date));
    println!("Channel     : {}", video.uploader);
    if let Some(views) = video.view_count.filter(|v| *v > 0) {
        println!("View Count  : {views}");
    }
    if let Some(duration) = video.duration.filter(|d| *d > 0) {
        println!("Duration    : {}", format_duration(duration));
    }
    println!(
        "Description : {}",
        truncate_description(&video.description, 200)
    );
    println!("{RULE}");
}
