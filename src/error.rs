use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error taxonomy for a solve request.
///
/// `NoSolution` is deliberately absent: an exhausted search is a normal
/// outcome (`solvable: false`), not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("malformed card code '{0}'")]
    MalformedCode(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("deadline elapsed before the search completed")]
    Timeout,

    #[error("step reconstruction failed: {0}")]
    ReconstructionFailure(String),
}

impl SolveError {
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SolveError::MalformedCode(_) => ErrorKind::MalformedCode,
            SolveError::InvalidInput(_) => ErrorKind::InvalidInput,
            SolveError::Timeout => ErrorKind::Timeout,
            SolveError::ReconstructionFailure(_) => ErrorKind::ReconstructionFailure,
        }
    }
}

/// Wire form of the error taxonomy. Serialized as the bare kind name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    MalformedCode,
    InvalidInput,
    Timeout,
    ReconstructionFailure,
}
