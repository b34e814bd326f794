use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use csv::{ByteRecord, ReaderBuilder};
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, info, trace, warn};

use crate::conversion::{convert, RateSource};
use crate::engine::accumulator::Accumulator;
use crate::engine::errors::ScanError;
use crate::engine::outcome::{FinalRecord, Outcome};
use crate::models::{ColumnIndex, RecordError, TransactionRecord, DELIMITER};
use crate::policy::SelectionPolicy;
use crate::types::Amount;

type Row = Result<ByteRecord, csv::Error>;

/// Single-pass scan of a ledger file down to one selected record.
pub struct ScanEngine<R> {
    rates: Arc<R>,
    backpressure: usize
}

impl<R: RateSource> ScanEngine<R> {
    /// Creates a new engine converting amounts through `rates`.
    pub fn new(rates: Arc<R>) -> Self {
        Self {
            rates,
            backpressure: 256
        }
    }

    #[cfg(test)]
    pub(crate) fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    /// Streams the ledger at `path` through `policy` and converts the surviving record.
    ///
    /// The first line is the header. The rate lookup happens once, after the
    /// whole file has been read.
    ///
    /// # Errors
    /// Returns `ScanError` if:
    /// - The file cannot be opened or a line cannot be read.
    /// - A timestamp the policy needs is not a whole number of seconds.
    /// - The selected amount is not a number, or the rate lookup fails.
    pub async fn run(&self, path: impl AsRef<Path>, policy: &SelectionPolicy) -> Result<Outcome, ScanError> {
        info!("Processing file {}", path.as_ref().display());

        let path = path.as_ref().to_path_buf();
        self.run_source(move || File::open(path), policy).await
    }

    /// Same as `run`, reading from whatever `open` returns on the reader thread.
    pub(crate) async fn run_source<S, F>(&self, open: F, policy: &SelectionPolicy) -> Result<Outcome, ScanError>
    where
        S: Read + 'static,
        F: FnOnce() -> io::Result<S> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel::<Row>(self.backpressure);
        let reader_handle = self.spawn_csv_reader(open, sender);
        let scan_result = self.scan(receiver, policy).await;

        reader_handle.await?;

        self.finish(scan_result?, policy).await
    }

    fn spawn_csv_reader<S, F>(&self, open: F, sender: mpsc::Sender<Row>) -> JoinHandle<()>
    where
        S: Read + 'static,
        F: FnOnce() -> io::Result<S> + Send + 'static,
    {
        spawn_blocking(move || {
            let source = match open() {
                Ok(source) => source,
                Err(error) => {
                    let _ = sender.blocking_send(Err(error.into()));
                    return;
                }
            };

            //NOTE: Rows stay as bytes; only the recognized columns are decoded, lossily.
            let mut reader = ReaderBuilder::new()
                .has_headers(false)
                .quoting(false)
                .flexible(true)
                .delimiter(DELIMITER as u8)
                .from_reader(source);

            for row in reader.byte_records() {
                let failed = row.is_err();

                if sender.blocking_send(row).is_err() || failed {
                    break;
                }
            }
        })
    }

    async fn scan(&self, mut receiver: mpsc::Receiver<Row>, policy: &SelectionPolicy) -> Result<Accumulator, ScanError> {
        let mut accumulator = Accumulator::new();

        let Some(header) = receiver.recv().await else {
            info!("Processed 0 lines");
            return Ok(accumulator)
        };

        let index = ColumnIndex::from_header(header?.iter());
        debug!("Resolved ledger columns: {index:?}");

        let missing = index.missing();
        if !missing.is_empty() {
            warn!("Ledger header has no column for {missing:?}");
        }

        let mut lines: u64 = 1;

        while let Some(row) = receiver.recv().await {
            let row = row?;
            lines += 1;

            let line = row.position().map(|position| position.line()).unwrap_or(lines);
            let record = TransactionRecord::decode(row.iter(), &index);

            if accumulator.offer(policy, record, line)? {
                trace!("Line [{line}] selected, watermark now [{}]", accumulator.watermark());
            }
        }

        info!("Processed {lines} lines");

        Ok(accumulator)
    }

    async fn finish(&self, accumulator: Accumulator, policy: &SelectionPolicy) -> Result<Outcome, ScanError> {
        let Some(record) = accumulator.into_payload() else {
            if policy.is_date_filtered() {
                return Ok(Outcome::NotFoundByDate)
            }

            return Ok(Outcome::Empty)
        };

        let amount = match record.amount.as_deref() {
            Some(raw) => Some(self.convert_amount(raw, record.token.as_deref()).await?),
            None => None
        };

        Ok(Outcome::Found(FinalRecord {
            timestamp: record.timestamp,
            transaction_type: record.transaction_type,
            token: record.token,
            amount
        }))
    }

    async fn convert_amount(&self, raw: &str, token: Option<&str>) -> Result<Amount, ScanError> {
        let trimmed = raw.trim();
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| RecordError::invalid_amount(token, raw))?;

        let Some(token) = token else {
            warn!("Selected record has no token, keeping amount unchanged");
            return Ok(amount)
        };

        Ok(convert(self.rates.as_ref(), amount, token).await?)
    }
}
