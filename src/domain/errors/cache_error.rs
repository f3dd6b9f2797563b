//! Cache error types.

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur during cache operations.
///
/// Most of these are recovered inside the cache as a miss or a skipped
/// cleanup step; they reach callers only where an operation reports
/// success or failure.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// Cache root or blob directory cannot be created or resolved.
    #[error("cache directory unavailable: {0}")]
    DirectoryUnavailable(String),
    /// Blob missing or undecodable.
    #[error("blob not found: {0}")]
    BlobNotFound(String),
    /// Blob could not be written.
    #[error("failed to write blob: {0}")]
    BlobWriteFailed(String),
    /// Blob could not be removed.
    #[error("failed to delete blob: {0}")]
    BlobDeleteFailed(String),
    /// Ledger document exists but could not be parsed.
    #[error("failed to deserialize ledger: {0}")]
    LedgerDeserializeFailed(String),
    /// Ledger document could not be written.
    #[error("failed to write ledger: {0}")]
    LedgerWriteFailed(String),
    /// Bytes are not a displayable image.
    #[error("decode error: {0}")]
    DecodeFailed(String),
    /// Image could not be re-encoded for storage.
    #[error("encode error: {0}")]
    EncodeFailed(String),
    /// Network error during download.
    #[error("network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CacheError::BlobWriteFailed("permission denied".to_string());
        assert_eq!(err.to_string(), "failed to write blob: permission denied");

        let err = CacheError::Network("HTTP 404 Not Found".to_string());
        assert_eq!(err.to_string(), "network error: HTTP 404 Not Found");
    }
}
