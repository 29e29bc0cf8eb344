//! Error type for the client layer.
//!
//! Two families: validation errors raised synchronously before any remote
//! call, and remote failures passed through unmodified. Validation messages
//! state what was expected against what was received; remote errors keep the
//! service's own shape via the transparent variant.

use dynaquery_model::ServiceError;

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All failure modes of the client layer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The filter lacks the target index's partition key.
    #[error("Partition key condition is required for query operation")]
    PartitionKeyRequired,

    /// The partition key was given as a predicate or list; only equality on a
    /// scalar is legal there.
    #[error("Partition key condition can only be a scalar value, received {received}")]
    PartitionKeyNotScalar {
        /// Description of the rejected condition shape.
        received: &'static str,
    },

    /// A sort-key condition used an operator the key condition grammar does
    /// not allow.
    #[error("Operator `{operator}` is not allowed on a sort key")]
    SortKeyOperator {
        /// The rejected operator name.
        operator: &'static str,
    },

    /// A filter-clause condition used an operator with no filter rendering.
    #[error("Operator `{operator}` is not allowed in a filter condition")]
    FilterOperator {
        /// The rejected operator name.
        operator: &'static str,
    },

    /// A sort-key range must be exactly a low and a high bound.
    #[error("Expected a range of exactly 2 values for sort key, received {received}")]
    InvalidRange {
        /// Number of values received.
        received: usize,
    },

    /// `limit` must be a positive count.
    #[error("Limit should be a number greater than 0")]
    InvalidLimit,

    /// An expression-building argument had the wrong shape.
    #[error("Expected {expected}, received {received}")]
    InvalidArgument {
        /// What the operation expected.
        expected: &'static str,
        /// What it received.
        received: String,
    },

    /// The named index is not configured for this table.
    #[error("Index `{name}` is not configured for table")]
    UnknownIndex {
        /// The requested index name.
        name: String,
    },

    /// Cursor pagination requires the target index to carry a sort key.
    #[error("Expected sortKey to query")]
    SortKeyRequired,

    /// Cursor pagination requires a configured secret.
    #[error("Expected `cursorSecret` which is used to encrypt the `LastEvaluatedKey`")]
    CursorSecretRequired,

    /// A supplied cursor failed authentication, decoding, or version check.
    #[error("Invalid cursor: {reason}")]
    InvalidCursor {
        /// Why the cursor was rejected.
        reason: String,
    },

    /// A mutation key map was empty or missing the partition key.
    #[error("Invalid key: expected key to contain at least partition key")]
    InvalidKey,

    /// An update would carry no assignments after key attributes were
    /// stripped.
    #[error("Expected at least one non-key attribute to update")]
    EmptyUpdate,

    /// A batch-read chunk still reported unprocessed keys after the retry
    /// ceiling.
    #[error("Batch read gave up after {attempts} attempts with {remaining} unprocessed keys")]
    UnprocessedKeys {
        /// Attempts made, including the initial request.
        attempts: usize,
        /// Keys still unprocessed when the ceiling was hit.
        remaining: usize,
    },

    /// The remote service rejected a call; its error is passed through
    /// unmodified.
    #[error(transparent)]
    Service(#[from] ServiceError),
}
