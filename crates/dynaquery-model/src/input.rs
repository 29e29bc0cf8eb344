//! Input types for the operations the client layer issues.
//!
//! All input structs use `PascalCase` JSON field naming to match the wire
//! protocol. Optional fields are omitted when `None`; empty maps and vectors
//! are omitted to produce minimal payloads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{
    ExpressionAttributeNames, ExpressionAttributeValues, Item, Key, KeysAndAttributes,
    TransactWriteItem, WriteRequest,
};

/// Input for the `GetItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemInput {
    /// The table containing the item.
    pub table_name: String,

    /// The primary key of the item to retrieve.
    pub key: Key,

    /// The attributes to retrieve. All attributes when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,

    /// If `true`, a strongly consistent read is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
}

/// Input for the `PutItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemInput {
    /// The table to put the item into.
    pub table_name: String,

    /// The item attributes. Replaces any existing item with the same key.
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

/// Input for the `UpdateItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemInput {
    /// The table containing the item.
    pub table_name: String,

    /// The primary key of the item to update.
    pub key: Key,

    /// The attributes to update, e.g. `SET #key_a = :val_a`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_expression: Option<String>,

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

/// Input for the `DeleteItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemInput {
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

/// Input for the `Query` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryInput {
    /// The table to query.
    pub table_name: String,

    /// The secondary index to query, when not querying the base table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,

    /// The key values selecting items, e.g. `#PK = :pk`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_condition_expression: Option<String>,

    /// Conditions applied after key pruning. Consumes read capacity for
    /// non-matching items too.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,

    /// The attributes to retrieve. All attributes when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,

    /// Substitution tokens for attribute names in the expressions.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: ExpressionAttributeNames,

    /// Substitution tokens for attribute values in the expressions.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_values: ExpressionAttributeValues,

    /// Index traversal order: `true` (default) ascending, `false` descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_index_forward: Option<bool>,

    /// The maximum number of items to evaluate this call (not necessarily the
    /// number of matching items).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// The key to resume from, taken from a prior response's
    /// `LastEvaluatedKey`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub exclusive_start_key: Key,

    /// If `true`, a strongly consistent read is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
}

/// Input for the `BatchGetItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetItemInput {
    /// Table name to the keys and projection to fetch from it.
    pub request_items: HashMap<String, KeysAndAttributes>,
}

/// Input for the `BatchWriteItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteItemInput {
    /// Table name to the put/delete requests against it.
    pub request_items: HashMap<String, Vec<WriteRequest>>,
}

/// Input for the `TransactWriteItems` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactWriteItemsInput {
    /// The records to apply atomically.
    pub transact_items: Vec<TransactWriteItem>,

    /// Idempotency token for safe retries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_request_token: Option<String>,
}
