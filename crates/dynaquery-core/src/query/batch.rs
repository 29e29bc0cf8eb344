//! Batched reads with chunking, bounded retry, and order restoration.

use std::collections::HashMap;

use dynaquery_model::input::BatchGetItemInput;
use dynaquery_model::types::{KeysAndAttributes, MAX_BATCH_GET_ITEMS};
use dynaquery_model::{Item, Key};
use futures::future::join_all;
use tracing::debug;

use crate::client::TableClient;
use crate::config::{TableConfig, TableIndex};
use crate::error::{Error, Result};

/// How many times a chunk re-requests keys the service reported unprocessed
/// before the whole read fails. Without a ceiling a persistently throttled
/// chunk would retry forever.
pub const MAX_UNPROCESSED_RETRIES: usize = 5;

/// Fetches the items stored under `keys`, preserving input order.
///
/// Keys are split into chunks of at most [`MAX_BATCH_GET_ITEMS`] and the
/// chunks are issued concurrently; within a chunk, unprocessed keys are
/// re-requested up to [`MAX_UNPROCESSED_RETRIES`] times. The result has one
/// slot per input key: `Some(item)` when found, `None` when the table holds
/// nothing under that key.
///
/// When `fields` is given, the default index's key attributes are added to
/// the projection so results can still be matched back to their keys.
pub async fn batch_get_items(
    client: &dyn TableClient,
    table: &TableConfig,
    keys: &[Key],
    fields: Option<&[String]>,
) -> Result<Vec<Option<Item>>> {
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let index = table.index(None)?;
    let projection = fields
        .filter(|f| !f.is_empty())
        .map(|f| projection_with_keys(f, index));

    let chunk_results = join_all(
        keys.chunks(MAX_BATCH_GET_ITEMS)
            .map(|chunk| fetch_chunk(client, table, chunk, projection.as_deref())),
    )
    .await;

    let mut fetched: Vec<Item> = Vec::with_capacity(keys.len());
    for result in chunk_results {
        fetched.extend(result?);
    }

    // Reassemble in caller order by composite key value.
    let mut by_key: HashMap<String, Item> = fetched
        .into_iter()
        .map(|item| (composite_fingerprint(&item, index), item))
        .collect();
    Ok(keys
        .iter()
        .map(|key| by_key.remove(&composite_fingerprint(key, index)))
        .collect())
}

/// The subset of `keys` with no stored item, compared by composite key value.
pub async fn batch_exists(
    client: &dyn TableClient,
    table: &TableConfig,
    keys: &[Key],
) -> Result<Vec<Key>> {
    let index = table.index(None)?;
    let mut fields = vec![index.partition_key_name.clone()];
    if let Some(sort_key_name) = &index.sort_key_name {
        fields.push(sort_key_name.clone());
    }

    let found = batch_get_items(client, table, keys, Some(&fields)).await?;
    Ok(keys
        .iter()
        .zip(&found)
        .filter_map(|(key, item)| item.is_none().then(|| key.clone()))
        .collect())
}

/// Issues one chunk, looping on unprocessed keys until drained or the retry
/// ceiling is hit.
async fn fetch_chunk(
    client: &dyn TableClient,
    table: &TableConfig,
    chunk: &[Key],
    projection: Option<&str>,
) -> Result<Vec<Item>> {
    let mut pending: Vec<Key> = chunk.to_vec();
    let mut collected: Vec<Item> = Vec::with_capacity(chunk.len());
    let mut attempts = 0usize;

    while !pending.is_empty() {
        attempts += 1;
        if attempts > 1 + MAX_UNPROCESSED_RETRIES {
            return Err(Error::UnprocessedKeys {
                attempts: attempts - 1,
                remaining: pending.len(),
            });
        }
        if attempts > 1 {
            debug!(
                table = %table.name,
                attempt = attempts,
                remaining = pending.len(),
                "retrying unprocessed keys"
            );
        }

        let mut request_items = HashMap::new();
        request_items.insert(
            table.name.clone(),
            KeysAndAttributes {
                keys: std::mem::take(&mut pending),
                projection_expression: projection.map(ToOwned::to_owned),
            },
        );

        let mut output = client
            .batch_get_item(BatchGetItemInput { request_items })
            .await?;

        collected.extend(output.responses.remove(&table.name).unwrap_or_default());
        pending = output
            .unprocessed_keys
            .remove(&table.name)
            .map(|keys_and_attrs| keys_and_attrs.keys)
            .unwrap_or_default();
    }

    Ok(collected)
}

/// `fields` plus the index key attributes, deduplicated, comma-joined.
fn projection_with_keys(fields: &[String], index: &TableIndex) -> String {
    let mut seen: Vec<&str> = Vec::with_capacity(fields.len() + 2);
    for field in fields
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(index.partition_key_name.as_str()))
        .chain(index.sort_key_name.as_deref())
    {
        if !seen.contains(&field) {
            seen.push(field);
        }
    }
    seen.join(",")
}

/// Renders an item's key attribute values into one comparable string.
fn composite_fingerprint(item: &Item, index: &TableIndex) -> String {
    let mut fingerprint = String::new();
    for name in std::iter::once(index.partition_key_name.as_str())
        .chain(index.sort_key_name.as_deref())
    {
        match item.get(name) {
            Some(value) => {
                fingerprint.push_str(&serde_json::to_string(value).unwrap_or_default());
            }
            None => fingerprint.push('-'),
        }
        fingerprint.push('\u{1f}');
    }
    fingerprint
}

#[cfg(test)]
mod tests {
    use dynaquery_model::ServiceError;
    use dynaquery_model::output::BatchGetItemOutput;

    use crate::config::TableIndex;
    use crate::test_util::{MockClient, key_of};

    use super::*;

    fn table() -> TableConfig {
        TableConfig::new("tillpos-development", TableIndex::new("pk", "sk"))
    }

    fn keys(n: usize) -> Vec<Key> {
        (0..n)
            .map(|i| {
                let sk = format!("{i:03}");
                key_of(&[("pk", "product"), ("sk", sk.as_str())])
            })
            .collect()
    }

    /// Answers every requested key with an item carrying an extra attribute.
    fn echo_client() -> MockClient {
        MockClient::new().on_batch_get(|input| {
            let requested = &input.request_items["tillpos-development"];
            let items = requested
                .keys
                .iter()
                .map(|key| {
                    let mut item = key.clone();
                    item.insert("found".to_owned(), true.into());
                    item
                })
                .collect();
            let mut responses = HashMap::new();
            responses.insert("tillpos-development".to_owned(), items);
            Ok(BatchGetItemOutput {
                responses,
                ..BatchGetItemOutput::default()
            })
        })
    }

    #[tokio::test]
    async fn test_should_return_empty_for_no_keys() {
        let client = MockClient::new();
        let found = batch_get_items(&client, &table(), &[], None).await.unwrap();
        assert!(found.is_empty());
        assert!(client.batch_get_calls().is_empty());
    }

    #[tokio::test]
    async fn test_should_chunk_requests_to_the_service_cap() {
        let client = echo_client();
        let found = batch_get_items(&client, &table(), &keys(101), None)
            .await
            .unwrap();

        assert_eq!(found.len(), 101);
        assert!(found.iter().all(Option::is_some));

        let calls = client.batch_get_calls();
        assert_eq!(calls.len(), 2);
        let sizes: Vec<usize> = calls
            .iter()
            .map(|c| c.request_items["tillpos-development"].keys.len())
            .collect();
        assert_eq!(sizes.iter().sum::<usize>(), 101);
        assert!(sizes.contains(&100) && sizes.contains(&1));
    }

    #[tokio::test]
    async fn test_should_restore_caller_order() {
        let client = echo_client();
        let mut shuffled = keys(5);
        shuffled.reverse();
        let found = batch_get_items(&client, &table(), &shuffled, None)
            .await
            .unwrap();

        for (key, item) in shuffled.iter().zip(&found) {
            let item = item.as_ref().unwrap();
            assert_eq!(item["sk"], key["sk"]);
        }
    }

    #[tokio::test]
    async fn test_should_mark_missing_keys_as_none() {
        // Serve only even sort keys.
        let client = MockClient::new().on_batch_get(|input| {
            let requested = &input.request_items["tillpos-development"];
            let items = requested
                .keys
                .iter()
                .filter(|key| {
                    key["sk"]
                        .as_s()
                        .unwrap()
                        .parse::<usize>()
                        .unwrap()
                        .is_multiple_of(2)
                })
                .cloned()
                .collect();
            let mut responses = HashMap::new();
            responses.insert("tillpos-development".to_owned(), items);
            Ok(BatchGetItemOutput {
                responses,
                ..BatchGetItemOutput::default()
            })
        });

        let found = batch_get_items(&client, &table(), &keys(4), None)
            .await
            .unwrap();
        assert_eq!(
            found.iter().map(Option::is_some).collect::<Vec<_>>(),
            [true, false, true, false]
        );
    }

    #[tokio::test]
    async fn test_should_retry_unprocessed_keys() {
        // First call processes one key and reports the rest unprocessed.
        let client = MockClient::new().on_batch_get(|input| {
            let requested = &input.request_items["tillpos-development"];
            let (head, rest) = requested.keys.split_first().unwrap();
            let mut responses = HashMap::new();
            responses.insert("tillpos-development".to_owned(), vec![head.clone()]);
            let mut unprocessed = HashMap::new();
            if !rest.is_empty() {
                unprocessed.insert(
                    "tillpos-development".to_owned(),
                    KeysAndAttributes {
                        keys: rest.to_vec(),
                        projection_expression: None,
                    },
                );
            }
            Ok(BatchGetItemOutput {
                responses,
                unprocessed_keys: unprocessed,
            })
        });

        let found = batch_get_items(&client, &table(), &keys(3), None)
            .await
            .unwrap();
        assert!(found.iter().all(Option::is_some));
        assert_eq!(client.batch_get_calls().len(), 3);
    }

    #[tokio::test]
    async fn test_should_give_up_after_the_retry_ceiling() {
        // Nothing is ever processed.
        let client = MockClient::new().on_batch_get(|input| {
            let requested = input.request_items["tillpos-development"].clone();
            let mut unprocessed = HashMap::new();
            unprocessed.insert("tillpos-development".to_owned(), requested);
            Ok(BatchGetItemOutput {
                responses: HashMap::new(),
                unprocessed_keys: unprocessed,
            })
        });

        let err = batch_get_items(&client, &table(), &keys(2), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnprocessedKeys {
                attempts,
                remaining: 2,
            } if attempts == 1 + MAX_UNPROCESSED_RETRIES
        ));
    }

    #[tokio::test]
    async fn test_should_augment_projection_with_key_attributes() {
        let client = echo_client();
        let fields = vec!["name".to_owned(), "pk".to_owned()];
        batch_get_items(&client, &table(), &keys(1), Some(&fields))
            .await
            .unwrap();
        assert_eq!(
            client.batch_get_calls()[0].request_items["tillpos-development"]
                .projection_expression
                .as_deref(),
            Some("name,pk,sk")
        );
    }

    #[tokio::test]
    async fn test_should_surface_chunk_errors() {
        let client = MockClient::new()
            .on_batch_get(|_| Err(ServiceError::new("ns#InternalServerError", "boom")));
        let err = batch_get_items(&client, &table(), &keys(1), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Service(_)));
    }

    #[tokio::test]
    async fn test_should_report_keys_that_do_not_exist() {
        // Store holds only sk 000.
        let client = MockClient::new().on_batch_get(|input| {
            let requested = &input.request_items["tillpos-development"];
            assert_eq!(requested.projection_expression.as_deref(), Some("pk,sk"));
            let items = requested
                .keys
                .iter()
                .filter(|key| key["sk"].as_s() == Some("000"))
                .cloned()
                .collect();
            let mut responses = HashMap::new();
            responses.insert("tillpos-development".to_owned(), items);
            Ok(BatchGetItemOutput {
                responses,
                ..BatchGetItemOutput::default()
            })
        });

        let missing = batch_exists(&client, &table(), &keys(3)).await.unwrap();
        assert_eq!(missing.len(), 2);
        assert_eq!(missing[0]["sk"].as_s(), Some("001"));
        assert_eq!(missing[1]["sk"].as_s(), Some("002"));
    }

    #[tokio::test]
    async fn test_should_report_nothing_missing_when_all_exist() {
        let client = echo_client();
        let missing = batch_exists(&client, &table(), &keys(3)).await.unwrap();
        assert!(missing.is_empty());
    }
}
