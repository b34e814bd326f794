use crate::models::{RecordError, TransactionRecord};
use crate::policy::SelectionPolicy;
use crate::types::Timestamp;

/// Best match seen so far during a scan.
///
/// `watermark` is the timestamp of the held record, or 0 before anything matched.
#[derive(Debug, Default)]
pub struct Accumulator {
    payload: Option<TransactionRecord>,
    watermark: Timestamp
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a decoded record to the policy, keeping it if selected.
    ///
    /// Returns whether the record replaced the held one.
    pub fn offer(&mut self, policy: &SelectionPolicy, candidate: TransactionRecord, line: u64) -> Result<bool, RecordError> {
        let Some(watermark) = policy.select(self.watermark, &candidate, line)? else {
            return Ok(false)
        };

        self.payload = Some(candidate);
        self.watermark = watermark;

        Ok(true)
    }

    pub fn watermark(&self) -> Timestamp {
        self.watermark
    }

    pub fn into_payload(self) -> Option<TransactionRecord> {
        self.payload
    }
}
