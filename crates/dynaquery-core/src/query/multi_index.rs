//! Multi-index intersection pagination.
//!
//! Emulates a join across independently-indexed attributes without a native
//! join operator: every round issues one query per still-active index
//! concurrently, then keeps only the items whose id shows up in *every*
//! index's result set for that round. The composite cursor carries each
//! index's own continuation key so every stream resumes from its own
//! position.
//!
//! Known limitation: intersection is computed within a round. An item
//! matching on one index in round 1 that only surfaces on another index in
//! round 3 is never counted; partial matches are not carried across rounds.

use std::collections::HashMap;

use dynaquery_model::input::QueryInput;
use dynaquery_model::{AttributeValue, Item, Key};
use futures::future::join_all;
use tracing::debug;

use crate::client::TableClient;
use crate::config::{DEFAULT_INDEX, TableConfig};
use crate::cursor;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::query::builder::build_query_input;
use crate::query::paginate::DEFAULT_QUERY_LIMIT;

/// The attribute whose value identifies one logical item across indexes.
pub const ID_ATTRIBUTE: &str = "id";

/// One stream of a multi-index query.
#[derive(Debug, Clone)]
pub struct MultiIndexQuery {
    /// The filter to run against the index.
    pub filter: Filter,
    /// The index to run it on; `None` means the default index.
    pub index_name: Option<String>,
}

/// The result of a multi-index intersection query.
#[derive(Debug, Clone)]
pub struct MultiIndexPage {
    /// Items present in every index's results, in first-stream order.
    pub items: Vec<Item>,
    /// Composite cursor; absent once every stream is exhausted.
    pub cursor: Option<String>,
    /// Items evaluated across every call of every round.
    pub scanned_count: u32,
}

/// One index's in-flight state across rounds.
#[derive(Debug)]
struct Stream {
    name: String,
    request: QueryInput,
    start_key: Option<Key>,
}

/// Runs `queries` concurrently per round and intersects their results by
/// [`ID_ATTRIBUTE`], up to `limit` intersecting items.
pub async fn query_with_multi_index(
    client: &dyn TableClient,
    table: &TableConfig,
    queries: &[MultiIndexQuery],
    limit: Option<u32>,
    prev_cursor: Option<&str>,
) -> Result<MultiIndexPage> {
    let secret = table.require_cursor_secret()?;
    let mut carried: HashMap<String, Key> =
        cursor::decrypt(prev_cursor, secret)?.unwrap_or_default();

    let mut streams = Vec::with_capacity(queries.len());
    for query in queries {
        let index = table.index(query.index_name.as_deref())?;
        let sort_key_name = index.sort_key_name.as_deref().ok_or(Error::SortKeyRequired)?;

        let mut request = build_query_input(
            &query.filter,
            &index.partition_key_name,
            Some(sort_key_name),
        )?;
        request.table_name = table.name.clone();
        request.index_name = query.index_name.clone();

        let name = query
            .index_name
            .clone()
            .unwrap_or_else(|| DEFAULT_INDEX.to_owned());
        let start_key = carried.remove(&name);
        streams.push(Stream {
            name,
            request,
            start_key,
        });
    }

    let cap = limit.unwrap_or(DEFAULT_QUERY_LIMIT) as usize;
    let mut items: Vec<Item> = Vec::new();
    let mut scanned_count: u32 = 0;
    let mut final_keys: HashMap<String, Key> = HashMap::new();

    while !streams.is_empty() && items.len() < cap {
        let round = join_all(streams.iter_mut().map(|stream| {
            let mut request = stream.request.clone();
            request.exclusive_start_key = stream.start_key.take().unwrap_or_default();
            async move { client.query(request).await }
        }))
        .await;

        let mut outputs = Vec::with_capacity(round.len());
        for result in round {
            outputs.push(result?);
        }

        scanned_count += outputs.iter().map(|o| o.scanned_count).sum::<u32>();
        debug!(
            streams = streams.len(),
            intersecting = items.len(),
            "multi-index round complete"
        );

        // Per-stream id lookup for this round only.
        let lookups: Vec<HashMap<String, &Item>> = outputs
            .iter()
            .map(|output| {
                output
                    .items
                    .iter()
                    .filter_map(|it| Some((id_fingerprint(it.get(ID_ATTRIBUTE)?), it)))
                    .collect()
            })
            .collect();

        if let Some(first_output) = outputs.first() {
            for it in &first_output.items {
                let Some(id) = it.get(ID_ATTRIBUTE).map(id_fingerprint) else {
                    continue;
                };
                if lookups.iter().all(|lookup| lookup.contains_key(&id)) {
                    items.push(it.clone());
                }
            }
        }

        // Carry each stream's own continuation key into the next round; a
        // stream with no key is exhausted and drops out.
        for (stream, output) in streams.iter_mut().zip(&outputs) {
            stream.start_key = output.continuation_key().cloned();
            match &stream.start_key {
                Some(key) => {
                    final_keys.insert(stream.name.clone(), key.clone());
                }
                None => {
                    final_keys.remove(&stream.name);
                }
            }
        }
        streams.retain(|stream| stream.start_key.is_some());
    }

    let cursor = if final_keys.is_empty() {
        None
    } else {
        cursor::encrypt(Some(&final_keys), secret)?
    };

    Ok(MultiIndexPage {
        items,
        cursor,
        scanned_count,
    })
}

/// A stable rendering of an id value usable as a map key.
fn id_fingerprint(value: &AttributeValue) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
