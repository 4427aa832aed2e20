use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Rejected before any record is looked at.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("error processing student data: {0:#}")]
    ProcessingFailure(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
