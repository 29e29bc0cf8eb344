//! Table configuration supplied by the caller.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Name of the index every table must configure.
pub const DEFAULT_INDEX: &str = "default";

/// Key attribute names of one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIndex {
    /// The partition key attribute name.
    pub partition_key_name: String,
    /// The sort key attribute name, absent for hash-only indexes.
    pub sort_key_name: Option<String>,
}

impl TableIndex {
    /// An index with partition and sort key attributes.
    #[must_use]
    pub fn new(partition_key_name: impl Into<String>, sort_key_name: impl Into<String>) -> Self {
        Self {
            partition_key_name: partition_key_name.into(),
            sort_key_name: Some(sort_key_name.into()),
        }
    }

    /// An index with only a partition key.
    #[must_use]
    pub fn hash_only(partition_key_name: impl Into<String>) -> Self {
        Self {
            partition_key_name: partition_key_name.into(),
            sort_key_name: None,
        }
    }
}

/// A table plus its queryable indexes.
///
/// Without a `default` index no request can be compiled, so construction
/// requires one up front; further named indexes are added with
/// [`TableConfig::with_index`]. The `cursor_secret` is only needed by the
/// cursor-based query operations.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// The table name.
    pub name: String,
    /// Index name to its key attribute names. Always contains `default`.
    pub indexes: HashMap<String, TableIndex>,
    /// Secret used to seal pagination cursors.
    pub cursor_secret: Option<String>,
}

impl TableConfig {
    /// A configuration with the required default index and no secret.
    #[must_use]
    pub fn new(name: impl Into<String>, default_index: TableIndex) -> Self {
        let mut indexes = HashMap::new();
        indexes.insert(DEFAULT_INDEX.to_owned(), default_index);
        Self {
            name: name.into(),
            indexes,
            cursor_secret: None,
        }
    }

    /// Adds a named secondary index.
    #[must_use]
    pub fn with_index(mut self, name: impl Into<String>, index: TableIndex) -> Self {
        self.indexes.insert(name.into(), index);
        self
    }

    /// Sets the cursor sealing secret.
    #[must_use]
    pub fn with_cursor_secret(mut self, secret: impl Into<String>) -> Self {
        self.cursor_secret = Some(secret.into());
        self
    }

    /// Looks up an index by name; `None` means the default index.
    pub fn index(&self, name: Option<&str>) -> Result<&TableIndex> {
        let name = name.unwrap_or(DEFAULT_INDEX);
        self.indexes.get(name).ok_or_else(|| Error::UnknownIndex {
            name: name.to_owned(),
        })
    }

    /// The cursor secret, or the dedicated error when none is configured.
    pub fn require_cursor_secret(&self) -> Result<&str> {
        self.cursor_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(Error::CursorSecretRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_resolve_default_index() {
        let config = TableConfig::new("orders", TableIndex::new("pk", "sk"));
        let index = config.index(None).unwrap();
        assert_eq!(index.partition_key_name, "pk");
        assert_eq!(index.sort_key_name.as_deref(), Some("sk"));
    }

    #[test]
    fn test_should_reject_unknown_index() {
        let config = TableConfig::new("orders", TableIndex::new("pk", "sk"));
        let err = config.index(Some("reverse")).unwrap_err();
        assert!(matches!(err, Error::UnknownIndex { name } if name == "reverse"));
    }

    #[test]
    fn test_should_require_non_empty_cursor_secret() {
        let config = TableConfig::new("orders", TableIndex::new("pk", "sk"));
        assert!(matches!(
            config.require_cursor_secret(),
            Err(Error::CursorSecretRequired)
        ));

        let config = config.with_cursor_secret("s3cret");
        assert_eq!(config.require_cursor_secret().unwrap(), "s3cret");
    }
}
