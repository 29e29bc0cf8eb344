//! Single-item mutations.

use dynaquery_model::input::{DeleteItemInput, PutItemInput, UpdateItemInput};
use dynaquery_model::output::{DeleteItemOutput, PutItemOutput, UpdateItemOutput};
use dynaquery_model::{Item, Key};

use crate::client::TableClient;
use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::mutation::expression::{
    ConditionExpr, build_condition_expressions, build_update_expressions,
};

/// Puts `item`, replacing any existing item under the same key.
pub async fn put_item(
    client: &dyn TableClient,
    table: &TableConfig,
    item: Item,
) -> Result<PutItemOutput> {
    let input = PutItemInput {
        table_name: table.name.clone(),
        item,
        ..PutItemInput::default()
    };
    Ok(client.put_item(input).await?)
}

/// Deletes the item under `key`.
///
/// The key must be non-empty and contain at least the default index's
/// partition key.
pub async fn delete_item(
    client: &dyn TableClient,
    table: &TableConfig,
    key: Key,
) -> Result<DeleteItemOutput> {
    let index = table.index(None)?;
    if key.is_empty() || !key.contains_key(&index.partition_key_name) {
        return Err(Error::InvalidKey);
    }

    let input = DeleteItemInput {
        table_name: table.name.clone(),
        key,
        ..DeleteItemInput::default()
    };
    Ok(client.delete_item(input).await?)
}

/// Conditionally updates the item under `key` with `item`'s attributes.
///
/// The default index's key attributes are stripped from the update map (they
/// cannot be rewritten); what remains must be non-empty, otherwise the call
/// would be a no-op `SET` and is rejected. Condition and update expressions
/// share one merged set of placeholder maps.
pub async fn update_item(
    client: &dyn TableClient,
    table: &TableConfig,
    key: Key,
    conditions: &[ConditionExpr],
    item: &Item,
) -> Result<UpdateItemOutput> {
    let index = table.index(None)?;
    if key.is_empty() || !key.contains_key(&index.partition_key_name) {
        return Err(Error::InvalidKey);
    }

    let mut updates = item.clone();
    updates.remove(&index.partition_key_name);
    if let Some(sort_key_name) = &index.sort_key_name {
        updates.remove(sort_key_name);
    }
    if updates.is_empty() {
        return Err(Error::EmptyUpdate);
    }

    let condition_parts = build_condition_expressions(conditions);
    let update_parts = build_update_expressions(&updates);

    let condition_expression =
        (!condition_parts.is_empty()).then(|| condition_parts.expression.clone());
    let update_expression = update_parts.expression.clone();
    let merged = condition_parts.merged_with(update_parts);

    let input = UpdateItemInput {
        table_name: table.name.clone(),
        key,
        update_expression: Some(update_expression),
        condition_expression,
        expression_attribute_names: merged.attr_names,
        expression_attribute_values: merged.attr_values,
    };
    Ok(client.update_item(input).await?)
}
