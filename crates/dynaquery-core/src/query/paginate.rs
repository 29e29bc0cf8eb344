//! Single-index pagination.
//!
//! Rounds are strictly sequential: each round's start key is the previous
//! round's continuation key, so there is nothing to parallelize here. Two
//! flavors exist: [`query`] drains matching pages into one result, while
//! [`query_with_cursor`] stops at a logical limit and hands back an opaque
//! resumption cursor.

use dynaquery_model::{Item, Key};
use tracing::debug;

use crate::client::TableClient;
use crate::config::TableConfig;
use crate::cursor;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::query::builder::build_query_input;

/// Effective cap when the caller gives no limit: keep paginating under the
/// hood, but never let a single logical request run away unbounded.
pub const DEFAULT_QUERY_LIMIT: u32 = 99_999;

/// One page of a cursor-based query.
#[derive(Debug, Clone)]
pub struct Page {
    /// The matching items, in index order for the requested direction.
    pub items: Vec<Item>,
    /// Opaque cursor resuming after this page; absent when the scan is done.
    pub cursor: Option<String>,
    /// Items the service evaluated across every round, matching or not.
    pub scanned_count: u32,
}

/// Pagination state threaded through the round loop.
#[derive(Debug, Default)]
struct Accumulator {
    items: Vec<Item>,
    scanned_count: u32,
    start_key: Option<Key>,
}

/// Queries one index and returns every matching item (or up to
/// `filter.limit` items when set), following continuation keys until the
/// index is drained.
pub async fn query(
    client: &dyn TableClient,
    table: &TableConfig,
    filter: &Filter,
    index_name: Option<&str>,
) -> Result<Vec<Item>> {
    let index = table.index(index_name)?;
    let mut request = build_query_input(
        filter,
        &index.partition_key_name,
        index.sort_key_name.as_deref(),
    )?;
    request.table_name = table.name.clone();
    request.index_name = index_name.map(ToOwned::to_owned);

    let limit = filter.limit.map(|l| l as usize);
    let mut items: Vec<Item> = Vec::new();

    loop {
        let output = client.query(request.clone()).await?;
        let continuation = output.continuation_key().cloned();
        items.extend(output.items);

        match continuation.as_ref() {
            Some(key) if limit.is_none_or(|l| items.len() < l) => {
                debug!(table = %table.name, fetched = items.len(), "following continuation key");
                request.exclusive_start_key = key.clone();
            }
            _ => break,
        }
    }

    Ok(items)
}

/// Queries one index up to a logical limit, resuming from
/// `filter.prev_cursor` and sealing the stop position into a fresh cursor.
///
/// Requires the index to carry a sort key and the table to carry a cursor
/// secret; both are checked before any remote call. Each round requests only
/// the still-missing item count, so a filter expression shrinking one round's
/// yield never causes an over-fetch past the limit.
pub async fn query_with_cursor(
    client: &dyn TableClient,
    table: &TableConfig,
    filter: &Filter,
    index_name: Option<&str>,
) -> Result<Page> {
    let index = table.index(index_name)?;
    let sort_key_name = index.sort_key_name.as_deref().ok_or(Error::SortKeyRequired)?;
    let secret = table.require_cursor_secret()?;

    let mut request = build_query_input(filter, &index.partition_key_name, Some(sort_key_name))?;
    request.table_name = table.name.clone();
    request.index_name = index_name.map(ToOwned::to_owned);

    let cap = filter.limit.unwrap_or(DEFAULT_QUERY_LIMIT) as usize;
    let mut acc = Accumulator {
        start_key: cursor::decrypt(filter.prev_cursor.as_deref(), secret)?,
        ..Accumulator::default()
    };

    loop {
        request.exclusive_start_key = acc.start_key.take().unwrap_or_default();
        request.limit = Some((cap - acc.items.len()) as u32);

        let output = client.query(request.clone()).await?;
        debug!(
            table = %table.name,
            returned = output.items.len(),
            scanned = output.scanned_count,
            "cursor query round"
        );

        acc.scanned_count += output.scanned_count;
        acc.start_key = output.continuation_key().cloned();
        acc.items.extend(output.items);

        if acc.start_key.is_none() || acc.items.len() >= cap {
            break;
        }
    }

    Ok(Page {
        cursor: cursor::encrypt(acc.start_key.as_ref(), secret)?,
        items: acc.items,
        scanned_count: acc.scanned_count,
    })
}
