//! Wire-protocol model types for dynaquery.
//!
//! This crate defines the request/response shapes of the DynamoDB-compatible
//! operations the client layer consumes: item CRUD, `Query`, the batch
//! operations, and `TransactWriteItems`. The JSON protocol (`awsJson1_0`)
//! makes serde derives trivial, so everything here is plain data with
//! `PascalCase` field renaming; only [`AttributeValue`] needs care, and even
//! that is an externally-tagged enum the derive handles.
// "DynamoDB" appears in virtually every doc comment in this crate.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod attribute_value;
pub mod error;
pub mod input;
pub mod output;
pub mod types;

pub use attribute_value::AttributeValue;
pub use error::{ServiceError, ServiceErrorCode};
pub use types::{Item, Key};
