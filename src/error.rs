use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Encoding errors
    #[error("Stored block too large: {len} bytes exceeds maximum {max}")]
    StoredBlockTooLarge { len: usize, max: usize },

    #[error("Invalid back-reference: length {length}, distance {distance}")]
    InvalidMatch { length: u16, distance: u16 },

    // Fixture errors
    #[error("Duplicate fixture name: {0}")]
    DuplicateFixture(String),

    #[error("Verification of {name} failed: {reason}")]
    VerificationFailed { name: String, reason: String },

    #[error("Failed to persist {name}: {source}")]
    Persist {
        name: String,
        #[source]
        source: std::io::Error,
    },

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error came from the sink rather than from encoding
    pub fn is_persist(&self) -> bool {
        matches!(self, Error::Persist { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
