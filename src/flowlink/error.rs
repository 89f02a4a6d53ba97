use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A group must carry a non-blank label before the session can be saved.
    #[error("Group {group_id} has no label; name it before saving")]
    EmptyGroupLabel { group_id: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, LinkerError>;
