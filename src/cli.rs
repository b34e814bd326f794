use std::path::PathBuf;

use clap::Parser;

use crate::conversion::DEFAULT_ENDPOINT;
use crate::source::LedgerSource;

/// Latest ledger transaction, optionally filtered by token and day, valued in USD.
#[derive(Debug, Parser)]
#[command(name = "ledger-snapshot", version)]
pub struct Cli {
    /// Only consider transactions of this token symbol
    #[arg(long)]
    pub token: Option<String>,

    /// Only consider transactions on this calendar day (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Ledger CSV to scan
    #[arg(long, env = "CSV_FILE_NAME", default_value = "transactions.csv")]
    pub csv_file: PathBuf,

    /// Zip archive to download when the ledger CSV is missing
    #[arg(long, env = "TRANSACTION_FILE_URL")]
    pub file_url: Option<String>,

    /// Where the downloaded archive is stored
    #[arg(long, env = "ZIP_FILE_NAME", default_value = "transactions.zip")]
    pub zip_file: PathBuf,

    /// Price endpoint queried for the USD rate
    #[arg(long, env = "CONVERSION_API", default_value = DEFAULT_ENDPOINT)]
    pub conversion_api: String,

    /// Offline `token,usd` rate table used instead of the price endpoint
    #[arg(long)]
    pub rates: Option<PathBuf>,

    /// error, warn, info, debug or trace
    #[arg(long, default_value = "error")]
    pub log_level: String
}

impl Cli {
    pub fn ledger_source(&self) -> LedgerSource {
        LedgerSource {
            csv_path: self.csv_file.clone(),
            zip_path: self.zip_file.clone(),
            url: self.file_url.clone()
        }
    }
}
