use std::io;
use thiserror::Error;

pub mod clock;
pub mod dataset;
pub mod mondai;
pub mod session;
pub mod timer;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read dataset: {0}")]
    DatasetLoad(#[from] io::Error),
    #[error("malformed dataset: {0}")]
    DatasetParse(#[from] serde_json::Error),
    #[error("dataset has only {0} distinct entries, need at least 4")]
    DatasetTooSmall(usize),
    #[error("no questions to start with!")]
    EmptyQuiz,
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(&'static str),
}
