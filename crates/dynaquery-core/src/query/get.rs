//! Single-item reads.

use dynaquery_model::input::GetItemInput;
use dynaquery_model::{AttributeValue, Item, Key};

use crate::client::TableClient;
use crate::config::TableConfig;
use crate::error::{Error, Result};

/// Fetches the item stored under `(pk, sk)` on the default index.
///
/// Both key parts are required; `fields` optionally narrows the projection.
/// Returns `None` when no item matches.
pub async fn get_item(
    client: &dyn TableClient,
    table: &TableConfig,
    pk: &str,
    sk: &str,
    fields: Option<&[String]>,
) -> Result<Option<Item>> {
    if pk.is_empty() || sk.is_empty() {
        return Err(Error::InvalidArgument {
            expected: "both arguments to have length greater than 0",
            received: format!("{pk:?}, {sk:?}"),
        });
    }

    let index = table.index(None)?;
    let sort_key_name = index.sort_key_name.as_deref().ok_or(Error::SortKeyRequired)?;

    let mut key = Key::new();
    key.insert(index.partition_key_name.clone(), AttributeValue::from(pk));
    key.insert(sort_key_name.to_owned(), AttributeValue::from(sk));

    let input = GetItemInput {
        table_name: table.name.clone(),
        key,
        projection_expression: fields.filter(|f| !f.is_empty()).map(|f| f.join(",")),
        consistent_read: None,
    };

    let output = client.get_item(input).await?;
    Ok(output.item)
}

/// `true` when an item is stored under `(pk, sk)`.
///
/// Projects only the partition key attribute, so existence never fetches the
/// full item.
pub async fn exists(
    client: &dyn TableClient,
    table: &TableConfig,
    pk: &str,
    sk: &str,
) -> Result<bool> {
    let fields = vec![table.index(None)?.partition_key_name.clone()];
    let item = get_item(client, table, pk, sk, Some(&fields)).await?;
    Ok(item.is_some())
}
