use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// On-disk shape of the store: one top-level object holding the
/// category-to-channels mapping.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Subscriptions {
    #[serde(default)]
    categories: HashMap<String, Vec<String>>,
}

/// File-backed mapping from category name to an ordered channel list.
///
/// Every mutation is a full load-mutate-save cycle; a failed operation
/// leaves the file untouched. Saves overwrite the whole file through a
/// same-directory temp file and rename. There is no file locking —
/// concurrent processes race and the last writer wins.
pub struct CategoryStore {
    path: PathBuf,
}

impl CategoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// A missing file is an empty store, not an error.
    fn load(&self) -> Result<Subscriptions> {
        if !self.path.exists() {
            return Ok(Subscriptions::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, subs: &Subscriptions) -> Result<()> {
        let encoded = serde_json::to_string_pretty(subs)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "store saved");
        Ok(())
    }

    pub fn create_category(&self, name: &str) -> Result<()> {
        let mut subs = self.load()?;
        if subs.categories.contains_key(name) {
            return Err(Error::CategoryExists(name.to_string()));
        }
        subs.categories.insert(name.to_string(), Vec::new());
        self.save(&subs)
    }

    pub fn delete_category(&self, name: &str) -> Result<()> {
        let mut subs = self.load()?;
        if subs.categories.remove(name).is_none() {
            return Err(Error::CategoryNotFound(name.to_string()));
        }
        self.save(&subs)
    }

    /// Appends `channel` to `category`. Membership is an exact string
    /// match, so the same channel written as an ID and as a URL counts as
    /// two entries.
    pub fn add_channel(&self, category: &str, channel: &str) -> Result<()> {
        let mut subs = self.load()?;
        let channels = subs
            .categories
            .get_mut(category)
            .ok_or_else(|| Error::CategoryNotFound(category.to_string()))?;
        if channels.iter().any(|c| c == channel) {
            return Err(Error::DuplicateChannel {
                category: category.to_string(),
                channel: channel.to_string(),
            });
        }
        channels.push(channel.to_string());
        self.save(&subs)
    }

    /// Removes `channel` from `category`, preserving the relative order of
    /// the remaining entries.
    pub fn remove_channel(&self, category: &str, channel: &str) -> Result<()> {
        let mut subs = self.load()?;
        let channels = subs
            .categories
            .get_mut(category)
            .ok_or_else(|| Error::CategoryNotFound(category.to_string()))?;
        let before = channels.len();
        channels.retain(|c| c != channel);
        if channels.len() == before {
            return Err(Error::ChannelNotFound {
                category: category.to_string(),
                channel: channel.to_string(),
            });
        }
        self.save(&subs)
    }

    /// Category names, in no particular order.
    pub fn categories(&self) -> Result<Vec<String>> {
        let subs = self.load()?;
        Ok(subs.categories.into_keys().collect())
    }

    pub fn channels(&self, category: &str) -> Result<Vec<String>> {
        let mut subs = self.load()?;
        subs.categories
            .remove(category)
            .ok_or_else(|| Error::CategoryNotFound(category.to_string()))
    }
}
