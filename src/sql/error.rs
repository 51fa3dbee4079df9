use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClauseError {
    #[error("No data")]
    NoData,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid column name: {0}")]
    InvalidColumn(String),

    #[error("Min employees cannot be greater than max employees ({min} > {max})")]
    InvalidEmployeeRange { min: i32, max: i32 },
}
