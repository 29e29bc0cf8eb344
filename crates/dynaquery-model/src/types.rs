//! Shared request building blocks and service limits.
//!
//! Everything follows the JSON wire format: `PascalCase` field names, `None`
//! and empty collections omitted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;

/// An item: a map of attribute names to values.
pub type Item = HashMap<String, AttributeValue>;

/// A primary key: partition key attribute plus optional sort key attribute.
pub type Key = HashMap<String, AttributeValue>;

/// Expression attribute names mapping (`#name` placeholders to attribute names).
pub type ExpressionAttributeNames = HashMap<String, String>;

/// Expression attribute values mapping (`:value` placeholders to values).
pub type ExpressionAttributeValues = HashMap<String, AttributeValue>;

/// Maximum number of keys in a single `BatchGetItem` request.
pub const MAX_BATCH_GET_ITEMS: usize = 100;

/// Maximum number of write requests in a single `BatchWriteItem` request.
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

/// Maximum number of records in a single `TransactWriteItems` request.
pub const MAX_TRANSACT_WRITE_ITEMS: usize = 100;

// ---------------------------------------------------------------------------
// Batch operations
// ---------------------------------------------------------------------------

/// The keys and optional projection to fetch from one table in `BatchGetItem`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeysAndAttributes {
    /// The primary keys of the items to retrieve.
    pub keys: Vec<Key>,
    /// The attributes to retrieve. All attributes when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
}

/// A single put-or-delete request within `BatchWriteItem`.
///
/// Exactly one of the two fields is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WriteRequest {
    /// A request to put an item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put_request: Option<PutRequest>,
    /// A request to delete an item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_request: Option<DeleteRequest>,
}

impl WriteRequest {
    /// A write request that puts `item`.
    #[must_use]
    pub fn put(item: Item) -> Self {
        Self {
            put_request: Some(PutRequest { item }),
            delete_request: None,
        }
    }

    /// A write request that deletes the item with primary key `key`.
    #[must_use]
    pub fn delete(key: Key) -> Self {
        Self {
            put_request: None,
            delete_request: Some(DeleteRequest { key }),
        }
    }
}

/// The put half of a [`WriteRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutRequest {
    /// The item attributes to put.
    pub item: Item,
}

/// The delete half of a [`WriteRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRequest {
    /// The primary key of the item to delete.
    pub key: Key,
}

// ---------------------------------------------------------------------------
// Transactional writes
// ---------------------------------------------------------------------------

/// One record in a `TransactWriteItems` request.
///
/// Exactly one of the four fields is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactWriteItem {
    /// Put an item, optionally guarded by a condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<TransactPut>,
    /// Delete an item, optionally guarded by a condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<TransactDelete>,
    /// Update an item, optionally guarded by a condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<TransactUpdate>,
    /// Assert a condition on an item without writing it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_check: Option<TransactConditionCheck>,
}

/// Put record inside a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactPut {
    /// The table to write to.
    pub table_name: String,
    /// The item attributes to put.
    pub item: Item,
    /// A condition that must hold for the put to succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
    /// Substitution tokens for attribute names in the condition.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: ExpressionAttributeNames,
    /// Substitution tokens for attribute values in the condition.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_values: ExpressionAttributeValues,
}

/// Delete record inside a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactDelete {
    /// The table to delete from.
    pub table_name: String,
    /// The primary key of the item to delete.
    pub key: Key,
    /// A condition that must hold for the delete to succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
    /// Substitution tokens for attribute names in the condition.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: ExpressionAttributeNames,
    /// Substitution tokens for attribute values in the condition.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_values: ExpressionAttributeValues,
}

/// Update record inside a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactUpdate {
    /// The table containing the item.
    pub table_name: String,
    /// The primary key of the item to update.
    pub key: Key,
    /// The attributes to update, e.g. `SET #key_a = :val_a`.
    pub update_expression: String,
    /// A condition that must hold for the update to succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
    /// Substitution tokens for attribute names in the expressions.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: ExpressionAttributeNames,
    /// Substitution tokens for attribute values in the expressions.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_values: ExpressionAttributeValues,
}

/// Condition-check record inside a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactConditionCheck {
    /// The table containing the item.
    pub table_name: String,
    /// The primary key of the item to check.
    pub key: Key,
    /// The condition that must hold for the transaction to proceed.
    pub condition_expression: String,
    /// Substitution tokens for attribute names in the condition.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: ExpressionAttributeNames,
    /// Substitution tokens for attribute values in the condition.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_values: ExpressionAttributeValues,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_serialize_put_write_request() {
        let mut item = Item::new();
        item.insert("pk".to_owned(), AttributeValue::from("a"));
        let req = WriteRequest::put(item);
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"PutRequest":{"Item":{"pk":{"S":"a"}}}}"#);
    }

    #[test]
    fn test_should_serialize_delete_write_request() {
        let mut key = Key::new();
        key.insert("pk".to_owned(), AttributeValue::from("a"));
        let req = WriteRequest::delete(key);
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"DeleteRequest":{"Key":{"pk":{"S":"a"}}}}"#);
    }

    #[test]
    fn test_should_omit_absent_transact_fields() {
        let record = TransactWriteItem {
            put: Some(TransactPut {
                table_name: "orders".to_owned(),
                item: Item::new(),
                ..TransactPut::default()
            }),
            ..TransactWriteItem::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Put":{"TableName":"orders","Item":{}}}"#);
    }
}
