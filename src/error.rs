use std::path::PathBuf;

/// Failures of the position-record read/write collaborator.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("position record I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("position record format: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// The document has no recognizable chapter structure.
    #[error("no chapters found in the document")]
    NoChaptersFound,

    /// A 1-based chapter number outside `[1, count]`.
    #[error("chapter number {index} is out of range (1-{count})")]
    InvalidChapterReference { index: usize, count: usize },

    #[error("failed to read {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to persist reading position: {0}")]
    Persistence(#[from] PersistenceError),
}
