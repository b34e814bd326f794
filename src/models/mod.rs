mod column_index;
mod errors;
mod record;

pub use column_index::ColumnIndex;
pub use errors::RecordError;
pub use record::TransactionRecord;

/// Field separator shared by the header and data lines.
pub const DELIMITER: char = ',';

/// The logical columns the ledger must expose.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Field {
    Timestamp,
    TransactionType,
    Token,
    Amount
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Timestamp, Field::TransactionType, Field::Token, Field::Amount];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Timestamp => "timestamp",
            Field::TransactionType => "transaction_type",
            Field::Token => "token",
            Field::Amount => "amount"
        }
    }

    pub fn from_column_name(column: &str) -> Option<Self> {
        let column = column.trim().to_lowercase();
        Self::ALL.into_iter().find(|field| field.name() == column)
    }
}
