//! Error type shared by every stage of an extraction run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort an extraction run.
///
/// Nothing here is retried. Once one of these is returned the run is over and
/// whatever was already flushed to the destination stays there.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("missing file argument(s)")]
    NoInputs,

    #[error("missing parameter argument")]
    NoPatterns,

    #[error("unable to compile parameter regex: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: read failed: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("output write failed: {0}")]
    Write(#[source] io::Error),

    #[error("token of {len} bytes too large for {capacity}-byte output buffer")]
    FieldTooLarge { len: usize, capacity: usize },

    #[error("output buffer capacity must be greater than zero")]
    InvalidBufferCapacity,
}

impl ExtractError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// True for errors detected before any input was touched.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ExtractError::NoInputs
                | ExtractError::NoPatterns
                | ExtractError::Pattern(_)
                | ExtractError::InvalidBufferCapacity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_names_path() {
        let err = ExtractError::Open {
            path: PathBuf::from("chain_1.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "chain_1.csv: No such file or directory");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_field_too_large_message() {
        let err = ExtractError::FieldTooLarge {
            len: 10,
            capacity: 4,
        };
        assert!(err.to_string().contains("too large"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_configuration_errors() {
        assert!(ExtractError::NoInputs.is_configuration());
        assert!(ExtractError::NoPatterns.is_configuration());
        assert!(ExtractError::InvalidBufferCapacity.is_configuration());
        assert!(!ExtractError::Write(io::Error::other("closed")).is_configuration());
    }
}
