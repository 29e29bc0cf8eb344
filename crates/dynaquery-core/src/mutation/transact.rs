//! Transactional writes.
//!
//! Every record in one `TransactWriteItems` call succeeds or none do; that
//! guarantee comes from the service itself. Chunked variants trade it away
//! across chunks: each chunk is its own transaction.

use dynaquery_model::input::TransactWriteItemsInput;
use dynaquery_model::output::TransactWriteItemsOutput;
use dynaquery_model::types::{
    MAX_TRANSACT_WRITE_ITEMS, TransactDelete, TransactPut, TransactWriteItem,
};
use dynaquery_model::{Item, Key};
use futures::future::join_all;

use crate::client::TableClient;
use crate::config::TableConfig;
use crate::error::Result;

/// Puts `items` in one all-or-nothing transaction.
pub async fn transact_put_items(
    client: &dyn TableClient,
    table: &TableConfig,
    items: Vec<Item>,
) -> Result<TransactWriteItemsOutput> {
    let records = items
        .into_iter()
        .map(|item| TransactWriteItem {
            put: Some(TransactPut {
                table_name: table.name.clone(),
                item,
                ..TransactPut::default()
            }),
            ..TransactWriteItem::default()
        })
        .collect();
    Ok(client
        .transact_write_items(TransactWriteItemsInput {
            transact_items: records,
            client_request_token: None,
        })
        .await?)
}

/// Deletes the items under `keys` transactionally, in chunks of at most
/// [`MAX_TRANSACT_WRITE_ITEMS`] records issued concurrently.
pub async fn transact_delete_items(
    client: &dyn TableClient,
    table: &TableConfig,
    keys: Vec<Key>,
) -> Result<Vec<TransactWriteItemsOutput>> {
    let results = join_all(keys.chunks(MAX_TRANSACT_WRITE_ITEMS).map(|chunk| {
        let records: Vec<TransactWriteItem> = chunk
            .iter()
            .map(|key| TransactWriteItem {
                delete: Some(TransactDelete {
                    table_name: table.name.clone(),
                    key: key.clone(),
                    ..TransactDelete::default()
                }),
                ..TransactWriteItem::default()
            })
            .collect();
        async move {
            client
                .transact_write_items(TransactWriteItemsInput {
                    transact_items: records,
                    client_request_token: None,
                })
                .await
        }
    }))
    .await;

    let mut outputs = Vec::with_capacity(results.len());
    for result in results {
        outputs.push(result?);
    }
    Ok(outputs)
}

/// Applies mixed put/delete/update/condition-check records in one
/// all-or-nothing transaction, stamping the configured table name onto every
/// record.
pub async fn transact_write_items(
    client: &dyn TableClient,
    table: &TableConfig,
    mut records: Vec<TransactWriteItem>,
) -> Result<TransactWriteItemsOutput> {
    for record in &mut records {
        if let Some(put) = record.put.as_mut() {
            put.table_name = table.name.clone();
        }
        if let Some(delete) = record.delete.as_mut() {
            delete.table_name = table.name.clone();
        }
        if let Some(update) = record.update.as_mut() {
            update.table_name = table.name.clone();
        }
        if let Some(check) = record.condition_check.as_mut() {
            check.table_name = table.name.clone();
        }
    }
    Ok(client
        .transact_write_items(TransactWriteItemsInput {
            transact_items: records,
            client_request_token: None,
        })
        .await?)
}

#[cfg(test)]
mod tests {
    use dynaquery_model::ServiceError;
    use dynaquery_model::types::TransactUpdate;

    use crate::config::TableIndex;
    use crate::test_util::{MockClient, item, key_of};

    use super::*;

    fn table() -> TableConfig {
        TableConfig::new("tillpos-development", TableIndex::new("pk", "sk"))
    }

    #[tokio::test]
    async fn test_should_put_all_items_in_one_transaction() {
        let client = MockClient::new();
        let items = vec![
            item(&[("pk", "a"), ("sk", "1")]),
            item(&[("pk", "a"), ("sk", "2")]),
        ];
        transact_put_items(&client, &table(), items).await.unwrap();

        let calls = client.transact_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].transact_items.len(), 2);
        assert!(calls[0].transact_items.iter().all(|record| {
            record
                .put
                .as_ref()
                .is_some_and(|put| put.table_name == "tillpos-development")
        }));
    }

    #[tokio::test]
    async fn test_should_chunk_transactional_deletes() {
        let client = MockClient::new();
        let keys: Vec<Key> = (0..150)
            .map(|i| {
                let sk = format!("{i:03}");
                key_of(&[("pk", "product"), ("sk", sk.as_str())])
            })
            .collect();
        transact_delete_items(&client, &table(), keys).await.unwrap();

        let calls = client.transact_calls();
        assert_eq!(calls.len(), 2);
        let mut sizes: Vec<usize> = calls.iter().map(|c| c.transact_items.len()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, [50, 100]);
    }

    #[tokio::test]
    async fn test_should_stamp_table_name_onto_mixed_records() {
        let client = MockClient::new();
        let records = vec![
            TransactWriteItem {
                put: Some(TransactPut {
                    item: item(&[("pk", "a"), ("sk", "1")]),
                    ..TransactPut::default()
                }),
                ..TransactWriteItem::default()
            },
            TransactWriteItem {
                update: Some(TransactUpdate {
                    key: key_of(&[("pk", "a"), ("sk", "2")]),
                    update_expression: "SET #key_name = :val_name".to_owned(),
                    ..TransactUpdate::default()
                }),
                ..TransactWriteItem::default()
            },
        ];
        transact_write_items(&client, &table(), records).await.unwrap();

        let calls = client.transact_calls();
        let put = calls[0].transact_items[0].put.as_ref().unwrap();
        let update = calls[0].transact_items[1].update.as_ref().unwrap();
        assert_eq!(put.table_name, "tillpos-development");
        assert_eq!(update.table_name, "tillpos-development");
    }

    #[tokio::test]
    async fn test_should_pass_transaction_cancellation_through() {
        let client = MockClient::new().on_transact(|_| {
            Err(ServiceError::new(
                "ns#TransactionCanceledException",
                "Transaction cancelled",
            ))
        });
        let err = transact_put_items(&client, &table(), vec![item(&[("pk", "a")])])
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Service(e)
            if e.code == dynaquery_model::ServiceErrorCode::TransactionCanceled));
    }
}
