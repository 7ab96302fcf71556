use thiserror::Error;

use crate::core::topic::TopicError;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum KafkaErrorCode {
    UnknownServerError = -1,
    None = 0,
    UnknownTopicOrPartition = 3,
    InconsistentGroupProtocol = 23,
}

impl From<KafkaErrorCode> for i16 {
    fn from(error: KafkaErrorCode) -> i16 {
        error as i16
    }
}

#[derive(Debug, Error)]
pub enum AssignorError {
    /// No strategy is registered under the negotiated name
    #[error("Unknown assignment strategy: {0}")]
    UnknownStrategy(String),

    /// Members share no registered strategy
    #[error("No assignment strategy is supported by every group member")]
    NoCommonStrategy,

    #[error(transparent)]
    Topic(#[from] TopicError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid assignment plan: {0}")]
    Plan(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AssignorError {
    /// Error code a coordinator puts on the wire when the rebalance fails.
    pub fn error_code(&self) -> KafkaErrorCode {
        match self {
            AssignorError::UnknownStrategy(_) | AssignorError::NoCommonStrategy => {
                KafkaErrorCode::InconsistentGroupProtocol
            }
            AssignorError::Topic(_) => KafkaErrorCode::UnknownTopicOrPartition,
            AssignorError::Io(_) | AssignorError::Plan(_) | AssignorError::Config(_) => {
                KafkaErrorCode::UnknownServerError
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AssignorError>;
