use anyhow::Result;
use std::sync::Arc;
use subfeed::core::FeedSource;
use subfeed::{CategoryStore, Error, FeedAggregator, FetchError, YtDlpSource};

#[cfg(unix)]
fn write_fake_ytdlp(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-yt-dlp");
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn store_round_trips_between_handles() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("subscriptions.json");

    let store = CategoryStore::new(&path);
    store.create_category("tech")?;
    store.add_channel("tech", "UCabc")?;
    store.add_channel("tech", "UCdef")?;
    store.remove_channel("tech", "UCabc")?;

    // A fresh handle reads exactly what the first one persisted.
    let reloaded = CategoryStore::new(&path);
    assert_eq!(reloaded.categories()?, vec!["tech".to_string()]);
    assert_eq!(reloaded.channels("tech")?, vec!["UCdef".to_string()]);

    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn fetch_skips_malformed_lines_without_failing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let script = write_fake_ytdlp(
        dir.path(),
        concat!(
            "echo '{\"title\":\"First\",\"upload_date\":\"20240201\"}'\n",
            "echo 'WARNING: not a json line'\n",
            "echo '{\"title\":\"Second\",\"upload_date\":\"20240101\"}'\n",
        ),
    );

    let source = YtDlpSource::new(script.to_str().unwrap(), 20);
    let videos = source.fetch("UCabc").await?;

    let titles: Vec<&str> = videos.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);

    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn nonzero_exit_fails_the_fetch() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let script = write_fake_ytdlp(
        dir.path(),
        "echo '{\"title\":\"Partial\"}'\nexit 3\n",
    );

    let source = YtDlpSource::new(script.to_str().unwrap(), 20);
    let err = source.fetch("UCabc").await.unwrap_err();
    assert!(matches!(err, FetchError::Exit { .. }));

    Ok(())
}

#[tokio::test]
async fn missing_binary_fails_to_spawn() {
    let source = YtDlpSource::new("/nonexistent/bin/yt-dlp", 20);
    assert!(!source.is_available().await);

    let err = source.fetch("UCabc").await.unwrap_err();
    assert!(matches!(err, FetchError::Spawn { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn category_feed_end_to_end_with_fake_extractor() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let script = write_fake_ytdlp(
        dir.path(),
        concat!(
            "echo '{\"title\":\"Newer\",\"upload_date\":\"20240201\",\"uploader\":\"Chan\"}'\n",
            "echo '{\"title\":\"Older\",\"upload_date\":\"20240101\",\"uploader\":\"Chan\"}'\n",
        ),
    );

    let store = CategoryStore::new(dir.path().join("subscriptions.json"));
    store.create_category("tech")?;
    store.add_channel("tech", "UCabc")?;
    store.add_channel("tech", "https://www.youtube.com/@other")?;

    let source = YtDlpSource::new(script.to_str().unwrap(), 20);
    let aggregator = FeedAggregator::new(Arc::new(source), 4);
    let feed = aggregator.feed(&store, "tech").await?;

    // Two channels, two videos each, merged newest first.
    assert_eq!(feed.len(), 4);
    let dates: Vec<&str> = feed.iter().map(|v| v.upload_date.as_str()).collect();
    assert_eq!(dates, vec!["20240201", "20240201", "20240101", "20240101"]);

    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn one_bad_channel_discards_the_whole_feed() -> Result<()> {
    let dir = tempfile::tempdir()?;
    // The fake tool fails only for the second channel's URL.
    let script = write_fake_ytdlp(
        dir.path(),
        concat!(
            "case \"$1\" in\n",
            "  *bad*) exit 1 ;;\n",
            "esac\n",
            "echo '{\"title\":\"Ok\",\"upload_date\":\"20240101\"}'\n",
        ),
    );

    let store = CategoryStore::new(dir.path().join("subscriptions.json"));
    store.create_category("mixed")?;
    store.add_channel("mixed", "UCgood")?;
    store.add_channel("mixed", "https://www.youtube.com/@bad")?;

    let source = YtDlpSource::new(script.to_str().unwrap(), 20);
    let aggregator = FeedAggregator::new(Arc::new(source), 4);

    let err = aggregator.feed(&store, "mixed").await.unwrap_err();
    match err {
        Error::Fetch { target, .. } => assert_eq!(target, "https://www.youtube.com/@bad"),
        other => panic!("expected Fetch error, got {other:?}"),
    }

    Ok(())
}
