//! One handle bundling a client and a table configuration.

use std::sync::Arc;

use dynaquery_model::output::{
    BatchWriteItemOutput, DeleteItemOutput, PutItemOutput, TransactWriteItemsOutput,
    UpdateItemOutput,
};
use dynaquery_model::types::TransactWriteItem;
use dynaquery_model::{Item, Key};

use crate::client::TableClient;
use crate::config::TableConfig;
use crate::error::Result;
use crate::filter::Filter;
use crate::mutation::{self, ConditionExpr};
use crate::query::{self, MultiIndexPage, MultiIndexQuery, Page};

/// A table handle: every operation of the crate as a method.
///
/// Call sites that talk to one table hold a `Table` instead of threading a
/// client and config pair through every call.
#[derive(Clone)]
pub struct Table {
    client: Arc<dyn TableClient>,
    config: TableConfig,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Binds `client` to `config`.
    #[must_use]
    pub fn new(client: Arc<dyn TableClient>, config: TableConfig) -> Self {
        Self { client, config }
    }

    /// The bound configuration.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// See [`query::query`].
    pub async fn query(&self, filter: &Filter, index_name: Option<&str>) -> Result<Vec<Item>> {
        query::query(self.client.as_ref(), &self.config, filter, index_name).await
    }

    /// See [`query::query_with_cursor`].
    pub async fn query_with_cursor(
        &self,
        filter: &Filter,
        index_name: Option<&str>,
    ) -> Result<Page> {
        query::query_with_cursor(self.client.as_ref(), &self.config, filter, index_name).await
    }

    /// See [`query::query_with_multi_index`].
    pub async fn query_with_multi_index(
        &self,
        queries: &[MultiIndexQuery],
        limit: Option<u32>,
        prev_cursor: Option<&str>,
    ) -> Result<MultiIndexPage> {
        query::query_with_multi_index(
            self.client.as_ref(),
            &self.config,
            queries,
            limit,
            prev_cursor,
        )
        .await
    }

    /// See [`query::get_item`].
    pub async fn get_item(
        &self,
        pk: &str,
        sk: &str,
        fields: Option<&[String]>,
    ) -> Result<Option<Item>> {
        query::get_item(self.client.as_ref(), &self.config, pk, sk, fields).await
    }

    /// See [`query::exists`].
    pub async fn exists(&self, pk: &str, sk: &str) -> Result<bool> {
        query::exists(self.client.as_ref(), &self.config, pk, sk).await
    }

    /// See [`query::batch_get_items`].
    pub async fn batch_get_items(
        &self,
        keys: &[Key],
        fields: Option<&[String]>,
    ) -> Result<Vec<Option<Item>>> {
        query::batch_get_items(self.client.as_ref(), &self.config, keys, fields).await
    }

    /// See [`query::batch_exists`].
    pub async fn batch_exists(&self, keys: &[Key]) -> Result<Vec<Key>> {
        query::batch_exists(self.client.as_ref(), &self.config, keys).await
    }

    /// See [`mutation::put_item`].
    pub async fn put_item(&self, item: Item) -> Result<PutItemOutput> {
        mutation::put_item(self.client.as_ref(), &self.config, item).await
    }

    /// See [`mutation::delete_item`].
    pub async fn delete_item(&self, key: Key) -> Result<DeleteItemOutput> {
        mutation::delete_item(self.client.as_ref(), &self.config, key).await
    }

    /// See [`mutation::update_item`].
    pub async fn update_item(
        &self,
        key: Key,
        conditions: &[ConditionExpr],
        item: &Item,
    ) -> Result<UpdateItemOutput> {
        mutation::update_item(self.client.as_ref(), &self.config, key, conditions, item).await
    }

    /// See [`mutation::batch_put_items`].
    pub async fn batch_put_items(&self, items: Vec<Item>) -> Result<Vec<BatchWriteItemOutput>> {
        mutation::batch_put_items(self.client.as_ref(), &self.config, items).await
    }

    /// See [`mutation::batch_delete_items`].
    pub async fn batch_delete_items(&self, keys: Vec<Key>) -> Result<Vec<BatchWriteItemOutput>> {
        mutation::batch_delete_items(self.client.as_ref(), &self.config, keys).await
    }

    /// See [`mutation::transact_put_items`].
    pub async fn transact_put_items(&self, items: Vec<Item>) -> Result<TransactWriteItemsOutput> {
        mutation::transact_put_items(self.client.as_ref(), &self.config, items).await
    }

    /// See [`mutation::transact_delete_items`].
    pub async fn transact_delete_items(
        &self,
        keys: Vec<Key>,
    ) -> Result<Vec<TransactWriteItemsOutput>> {
        mutation::transact_delete_items(self.client.as_ref(), &self.config, keys).await
    }

    /// See [`mutation::transact_write_items`].
    pub async fn transact_write_items(
        &self,
        records: Vec<TransactWriteItem>,
    ) -> Result<TransactWriteItemsOutput> {
        mutation::transact_write_items(self.client.as_ref(), &self.config, records).await
    }
}
