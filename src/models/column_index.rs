use crate::models::Field;

/// Positions of the recognized columns within a ledger line.
///
/// Computed once from the header line. A column the header did not declare
/// stays `None`, which later decodes as an absent field rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    pub timestamp: Option<usize>,
    pub transaction_type: Option<usize>,
    pub token: Option<usize>,
    pub amount: Option<usize>
}

impl ColumnIndex {
    /// Builds the mapping from already-split header fields.
    ///
    /// Names are compared trimmed and case-insensitively. Unknown columns are
    /// ignored and a repeated name keeps its last position. Invalid UTF-8 is
    /// decoded lossily.
    pub fn from_header<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut index = Self::default();

        for (position, column) in columns.into_iter().enumerate() {
            let Some(field) = Field::from_column_name(&String::from_utf8_lossy(column.as_ref())) else {
                continue
            };

            *index.slot_mut(field) = Some(position);
        }

        index
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        match field {
            Field::Timestamp => self.timestamp,
            Field::TransactionType => self.transaction_type,
            Field::Token => self.token,
            Field::Amount => self.amount
        }
    }

    /// Reverse lookup: which field, if any, owns the given position.
    pub fn field_at(&self, position: usize) -> Option<Field> {
        Field::ALL.into_iter().find(|field| self.position(*field) == Some(position))
    }

    pub fn missing(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|field| self.position(*field).is_none()).collect()
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<usize> {
        match field {
            Field::Timestamp => &mut self.timestamp,
            Field::TransactionType => &mut self.transaction_type,
            Field::Token => &mut self.token,
            Field::Amount => &mut self.amount
        }
    }
}
