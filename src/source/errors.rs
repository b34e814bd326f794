use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Ledger [{0}] is missing and no download URL is configured")]
    MissingUrl(PathBuf),
    #[error("Ledger download failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error("Ledger file error at [{path}]: {source}")]
    Io {
        path: PathBuf,
        source: io::Error
    },
    #[error("Ledger archive is not readable: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("Ledger archive has no entry named [{0}]")]
    EntryNotFound(String),
    #[error("Ledger extraction task failed: {0}")]
    ExtractTask(#[from] tokio::task::JoinError)
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
