use thiserror::Error;
use tokio::task::JoinError;

use crate::conversion::ConversionError;
use crate::models::RecordError;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Ledger could not be read: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("Ledger reader task failed: {0}")]
    ReaderTask(#[from] JoinError)
}
