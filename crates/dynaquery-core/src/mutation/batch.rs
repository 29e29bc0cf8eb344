//! Batched writes with chunking.
//!
//! Chunks are issued concurrently. One chunk's rejection fails the whole
//! operation, but in-flight sibling chunks always run to completion first;
//! their effects stand, only their outputs are discarded.

use std::collections::HashMap;

use dynaquery_model::input::BatchWriteItemInput;
use dynaquery_model::output::BatchWriteItemOutput;
use dynaquery_model::types::{MAX_BATCH_WRITE_ITEMS, WriteRequest};
use dynaquery_model::{Item, Key};
use futures::future::join_all;
use tracing::debug;

use crate::client::TableClient;
use crate::config::TableConfig;
use crate::error::Result;

/// Puts `items` in chunks of at most [`MAX_BATCH_WRITE_ITEMS`].
pub async fn batch_put_items(
    client: &dyn TableClient,
    table: &TableConfig,
    items: Vec<Item>,
) -> Result<Vec<BatchWriteItemOutput>> {
    let requests = items.into_iter().map(WriteRequest::put).collect();
    batch_write(client, table, requests).await
}

/// Deletes the items under `keys` in chunks of at most
/// [`MAX_BATCH_WRITE_ITEMS`].
pub async fn batch_delete_items(
    client: &dyn TableClient,
    table: &TableConfig,
    keys: Vec<Key>,
) -> Result<Vec<BatchWriteItemOutput>> {
    let requests = keys.into_iter().map(WriteRequest::delete).collect();
    batch_write(client, table, requests).await
}

async fn batch_write(
    client: &dyn TableClient,
    table: &TableConfig,
    requests: Vec<WriteRequest>,
) -> Result<Vec<BatchWriteItemOutput>> {
    if requests.is_empty() {
        return Ok(Vec::new());
    }

    debug!(
        table = %table.name,
        total = requests.len(),
        chunks = requests.len().div_ceil(MAX_BATCH_WRITE_ITEMS),
        "dispatching batch write"
    );

    let results = join_all(requests.chunks(MAX_BATCH_WRITE_ITEMS).map(|chunk| {
        let mut request_items = HashMap::new();
        request_items.insert(table.name.clone(), chunk.to_vec());
        async move {
            client
                .batch_write_item(BatchWriteItemInput { request_items })
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

#[cfg(test)]
mod tests {
    use dynaquery_model::ServiceError;

    use crate::config::TableIndex;
    use crate::test_util::{MockClient, item, key_of};

    use super::*;

    fn table() -> TableConfig {
        TableConfig::new("tillpos-development", TableIndex::new("pk", "sk"))
    }

    fn many_keys(n: usize) -> Vec<Key> {
        (0..n)
            .map(|i| {
                let sk = format!("{i:03}");
                key_of(&[("pk", "product"), ("sk", sk.as_str())])
            })
            .collect()
    }

    #[tokio::test]
    async fn test_should_issue_ceil_n_over_25_delete_calls() {
        let client = MockClient::new();
        batch_delete_items(&client, &table(), many_keys(60))
            .await
            .unwrap();

        let calls = client.batch_write_calls();
        assert_eq!(calls.len(), 3);
        let mut sizes: Vec<usize> = calls
            .iter()
            .map(|c| c.request_items["tillpos-development"].len())
            .collect();
        sizes.sort_unstable();
        assert_eq!(sizes, [10, 25, 25]);
        assert!(
            calls[0].request_items["tillpos-development"]
                .iter()
                .all(|req| req.delete_request.is_some())
        );
    }

    #[tokio::test]
    async fn test_should_wrap_puts_as_put_requests() {
        let client = MockClient::new();
        let items = vec![
            item(&[("pk", "a"), ("sk", "1")]),
            item(&[("pk", "a"), ("sk", "2")]),
        ];
        let outputs = batch_put_items(&client, &table(), items).await.unwrap();

        assert_eq!(outputs.len(), 1);
        let calls = client.batch_write_calls();
        assert_eq!(calls.len(), 1);
        assert!(
            calls[0].request_items["tillpos-development"]
                .iter()
                .all(|req| req.put_request.is_some())
        );
    }

    #[tokio::test]
    async fn test_should_issue_nothing_for_empty_input() {
        let client = MockClient::new();
        let outputs = batch_put_items(&client, &table(), Vec::new()).await.unwrap();
        assert!(outputs.is_empty());
        assert!(client.batch_write_calls().is_empty());
    }

    #[tokio::test]
    async fn test_should_fail_whole_operation_when_a_chunk_fails() {
        let client = MockClient::new().on_batch_write(|input| {
            let chunk = &input.request_items["tillpos-development"];
            if chunk.len() == 25 {
                Ok(BatchWriteItemOutput::default())
            } else {
                Err(ServiceError::new("ns#InternalServerError", "boom"))
            }
        });

        let err = batch_delete_items(&client, &table(), many_keys(30))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Service(_)));
        // both chunks were still issued
        assert_eq!(client.batch_write_calls().len(), 2);
    }
}
