//! From trait implementations for EaselError conversions

use super::types::EaselError;
use easel_session::StorageError;

impl From<std::io::Error> for EaselError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<reqwest::Error> for EaselError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        Self::Http {
            message: error.to_string(),
            status_code,
        }
    }
}

impl From<StorageError> for EaselError {
    fn from(error: StorageError) -> Self {
        Self::storage(error.to_string())
    }
}
