//! Output types for the operations the client layer issues.
//!
//! Unknown response fields (consumed-capacity details, collection metrics)
//! are ignored on deserialization; this client never reads them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Item, Key, KeysAndAttributes, WriteRequest};

/// Output of the `GetItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemOutput {
    /// The retrieved item, absent when no item matched the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

/// Output of the `PutItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemOutput {
    /// Prior attribute values, present only when return-values was requested.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: Item,
}

/// Output of the `UpdateItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemOutput {
    /// Attribute values before or after the update, per return-values setting.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: Item,
}

/// Output of the `DeleteItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemOutput {
    /// Prior attribute values, present only when return-values was requested.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: Item,
}

/// Output of the `Query` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryOutput {
    /// The matching items, in index order for the requested direction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,

    /// The number of items in this response.
    #[serde(default)]
    pub count: u32,

    /// The number of items evaluated before the filter expression applied.
    #[serde(default)]
    pub scanned_count: u32,

    /// Where the scan stopped; resume by passing this as the next call's
    /// `ExclusiveStartKey`. Absent when the scan is exhausted.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub last_evaluated_key: Key,
}

impl QueryOutput {
    /// The continuation key, `None` when the scan is exhausted.
    #[must_use]
    pub fn continuation_key(&self) -> Option<&Key> {
        if self.last_evaluated_key.is_empty() {
            None
        } else {
            Some(&self.last_evaluated_key)
        }
    }
}

/// Output of the `BatchGetItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetItemOutput {
    /// Table name to the items fetched from it.
    #[serde(default)]
    pub responses: HashMap<String, Vec<Item>>,

    /// Keys the service did not process this call; reissue them.
    #[serde(default)]
    pub unprocessed_keys: HashMap<String, KeysAndAttributes>,
}

/// Output of the `BatchWriteItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteItemOutput {
    /// Write requests the service did not process this call.
    #[serde(default)]
    pub unprocessed_items: HashMap<String, Vec<WriteRequest>>,
}

/// Output of the `TransactWriteItems` operation. Carries nothing the client
/// reads; success is the signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactWriteItemsOutput {}
