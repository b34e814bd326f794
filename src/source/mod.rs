//! Makes sure the ledger CSV is on disk before the scan starts.
//!
//! When the CSV is absent it is fetched as a zip archive and the matching
//! entry is extracted next to it.

mod errors;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tokio::task::spawn_blocking;
use tracing::info;
use zip::result::ZipError;
use zip::ZipArchive;

pub use errors::SourceError;

/// Where the ledger lives and where to fetch it from when it is missing.
#[derive(Debug, Clone)]
pub struct LedgerSource {
    pub csv_path: PathBuf,
    pub zip_path: PathBuf,
    pub url: Option<String>
}

impl LedgerSource {
    /// Returns the CSV path, downloading and extracting the archive first if needed.
    ///
    /// # Errors
    /// Returns `SourceError` if the CSV is missing and the archive cannot be
    /// fetched, saved, or does not contain the CSV.
    pub async fn ensure(&self) -> Result<PathBuf, SourceError> {
        if self.csv_path.exists() {
            info!("Using existing ledger {}", self.csv_path.display());
            return Ok(self.csv_path.clone())
        }

        let url = self.url.as_deref().ok_or_else(|| SourceError::MissingUrl(self.csv_path.clone()))?;

        info!("Downloading file from {url}");
        download(url, &self.zip_path).await?;

        info!("Unzipping file {}", self.zip_path.display());
        let zip_path = self.zip_path.clone();
        let csv_path = self.csv_path.clone();
        spawn_blocking(move || extract_entry(&zip_path, &csv_path)).await??;

        Ok(self.csv_path.clone())
    }
}

async fn download(url: &str, destination: &Path) -> Result<(), SourceError> {
    let body = reqwest::get(url)
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    tokio::fs::write(destination, &body)
        .await
        .map_err(|error| SourceError::io(destination, error))
}

/// Copies the archive entry named like `csv_path`'s file name to `csv_path`.
fn extract_entry(zip_path: &Path, csv_path: &Path) -> Result<(), SourceError> {
    let entry_name = csv_path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let archive = File::open(zip_path).map_err(|error| SourceError::io(zip_path, error))?;
    let mut archive = ZipArchive::new(archive)?;

    let mut entry = match archive.by_name(&entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Err(SourceError::EntryNotFound(entry_name)),
        Err(error) => return Err(error.into())
    };

    let mut output = File::create(csv_path).map_err(|error| SourceError::io(csv_path, error))?;
    io::copy(&mut entry, &mut output).map_err(|error| SourceError::io(csv_path, error))?;

    Ok(())
}
