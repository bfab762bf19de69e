use finance_tracker_core::Error as CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid stored JSON under '{key}': {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    pub fn invalid_json(key: &str, source: serde_json::Error) -> Self {
        Self::Json {
            key: key.to_string(),
            source,
        }
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        CoreError::local_storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_into_core_local_storage_error() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let core: CoreError = StorageError::invalid_json("finance-tracker-categories", source).into();
        assert!(matches!(core, CoreError::LocalStorage(_)));
        assert!(core
            .to_string()
            .starts_with("Local storage error: Invalid stored JSON under 'finance-tracker-categories'"));
    }
}
