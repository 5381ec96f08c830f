//! Error kinds for the load → parse → report pipeline.

use thiserror::Error;

/// The one message shown to a user when the pipeline fails, whatever the cause.
pub const ERROR_NOTICE: &str = "Error loading data. Please check if the CSV file exists.";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch {source_name}: {reason}")]
    FetchFailed { source_name: String, reason: String },

    #[error("failed to parse passenger data: {reason}")]
    ParseFailed { reason: String },

    #[error("failed to write report output: {0}")]
    Output(String),
}

impl PipelineError {
    pub fn fetch(source_name: &str, reason: impl ToString) -> Self {
        PipelineError::FetchFailed {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(reason: impl Into<String>) -> Self {
        PipelineError::ParseFailed {
            reason: reason.into(),
        }
    }
}
