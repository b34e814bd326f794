use std::io::{self, Write};

use crate::models::Field;
use crate::types::Amount;

pub const NOT_FOUND_BY_DATE: &str = "No transaction found by this date";

/// The selected record with its amount converted to USD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalRecord {
    pub timestamp: Option<String>,
    pub transaction_type: Option<String>,
    pub token: Option<String>,
    pub amount: Option<Amount>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(FinalRecord),
    /// Nothing matched and no date filter was given.
    Empty,
    /// Nothing matched the requested date.
    NotFoundByDate
}

impl Outcome {
    pub fn write_to<W: Write>(&self, output: &mut W) -> io::Result<()> {
        match self {
            Outcome::Found(record) => {
                let header: Vec<&str> = Field::ALL.iter().map(Field::name).collect();
                writeln!(output, "{}", header.join(","))?;

                writeln!(
                    output,
                    "{},{},{},{}",
                    record.timestamp.as_deref().unwrap_or_default(),
                    record.transaction_type.as_deref().unwrap_or_default(),
                    record.token.as_deref().unwrap_or_default(),
                    record.amount.map(|amount| amount.normalize().to_string()).unwrap_or_default()
                )
            }
            Outcome::Empty => Ok(()),
            Outcome::NotFoundByDate => writeln!(output, "{NOT_FOUND_BY_DATE}")
        }
    }
}
