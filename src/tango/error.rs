use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TangoError {
    #[error("Entry not found: {0}")]
    NotFound(Uuid),

    /// `index` is the 0-based position; the message shows the 1-based entry number.
    #[error("Entry {} is out of range (collection has {len} entries)", .index + 1)]
    OutOfRange { index: usize, len: usize },

    /// The in-memory change was applied but could not be written to durable storage.
    #[error("Changes kept in memory but not saved: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Transliteration error: {0}")]
    Transliteration(String),
}

pub type Result<T> = std::result::Result<T, TangoError>;
