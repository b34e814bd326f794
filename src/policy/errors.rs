use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid date format [{0}]")]
    InvalidDate(String)
}
