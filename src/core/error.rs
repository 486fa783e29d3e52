/// Error taxonomy for meter computations

use thiserror::Error;

use crate::database::DatabaseError;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Insufficient Data. Token points: {count}")]
    InsufficientRawData { count: usize },

    #[error("Insufficient aligned data after resampling.")]
    InsufficientAlignedData,

    #[error("Cannot scale empty column: {0}")]
    EmptyColumn(&'static str),

    #[error("Observation source error: {0}")]
    Source(#[from] DatabaseError),
}

impl SignalError {
    /// Data-shortage outcomes, as opposed to collaborator failures
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            SignalError::InsufficientRawData { .. } | SignalError::InsufficientAlignedData
        )
    }
}
