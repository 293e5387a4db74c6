use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors surfaced by store and feed operations.
///
/// The library never retries and never exits the process; every variant
/// propagates to the caller, which decides how to report it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("category '{0}' already exists")]
    CategoryExists(String),

    #[error("category '{0}' does not exist")]
    CategoryNotFound(String),

    #[error("channel '{channel}' is already in category '{category}'")]
    DuplicateChannel { category: String, channel: String },

    #[error("channel '{channel}' not found in category '{category}'")]
    ChannelNotFound { category: String, channel: String },

    #[error("no channels in category '{0}'")]
    EmptyCategory(String),

    #[error("error fetching '{target}': {source}")]
    Fetch {
        target: String,
        #[source]
        source: FetchError,
    },

    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("store encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure modes of a single metadata extraction subprocess.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("could not start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' produced no output stream")]
    MissingStdout { command: String },

    #[error("failed to read extractor output: {0}")]
    Read(#[source] io::Error),

    #[error("'{command}' exited with {status}")]
    Exit { command: String, status: ExitStatus },
}

pub type Result<T> = std::result::Result<T, Error>;
