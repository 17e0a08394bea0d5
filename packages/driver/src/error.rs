use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Unable to find file or directory named {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("An I/O error occurred at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("An error occurred while serializing a record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("An error occurred while deserializing a record from {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Builds a `map_err` adapter that attaches `path` to an I/O failure.
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
        move |source| Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn not_found_display_names_path() {
        let e = Error::NotFound {
            path: PathBuf::from("db/users/alice"),
        };
        assert!(format!("{}", e).contains("db/users/alice"));
        assert!(e.is_not_found());
        assert!(!e.is_invalid_argument());
    }

    #[test]
    fn io_error_keeps_source() {
        let e = Error::io(Path::new("db/users"))(io::Error::other("disk full"));
        let display = format!("{}", e);
        assert!(display.contains("db/users"));
        assert!(display.contains("disk full"));
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn decode_error_keeps_source() {
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let e = Error::Decode {
            path: PathBuf::from("db/users/alice.json"),
            source,
        };
        assert!(format!("{}", e).contains("deserializing"));
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn invalid_argument_has_no_source() {
        let e = Error::invalid_argument("missing collection");
        assert_eq!(format!("{}", e), "Invalid argument: missing collection");
        assert!(StdError::source(&e).is_none());
    }
}
