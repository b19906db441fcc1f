use thiserror::Error;

/// Why a blob could not be turned back into plaintext.
///
/// Returned as a value by [`crate::crypto::DiaCipher::decrypt`]; the store turns it into
/// a skipped file when listing and into [`DiaError::Decrypt`] for direct loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecryptFailure {
    #[error("blob is truncated")]
    Truncated,

    #[error("blob does not carry the .dia magic")]
    BadMagic,

    #[error("unsupported blob version {0}")]
    BadVersion(u8),

    #[error("authentication failed (wrong key or tampered blob)")]
    Authentication,

    #[error("plaintext is not valid UTF-8")]
    NotUtf8,
}

#[derive(Debug, Error)]
pub enum DiaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Decryption error: {0}")]
    Decrypt(#[from] DecryptFailure),

    #[error("Encryption error: {0}")]
    Encrypt(String),

    #[error("Invalid project name: {0:?}")]
    InvalidName(String),

    #[error("Project not found: {0}")]
    NoSuchProject(String),

    #[error("Project already exists: {0}")]
    ProjectAlreadyExists(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Data point index {index} out of range (series has {len} points)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl DiaError {
    /// True for failures that mean "this file is not a readable project" rather than an
    /// environment problem.
    #[must_use]
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::Decrypt(_) | Self::Parse { .. })
    }
}
