//! Test support: a scripted [`TableClient`] plus item fixtures.

use async_trait::async_trait;
use parking_lot::Mutex;

use dynaquery_model::input::{
    BatchGetItemInput, BatchWriteItemInput, DeleteItemInput, GetItemInput, PutItemInput,
    QueryInput, TransactWriteItemsInput, UpdateItemInput,
};
use dynaquery_model::output::{
    BatchGetItemOutput, BatchWriteItemOutput, DeleteItemOutput, GetItemOutput, PutItemOutput,
    QueryOutput, TransactWriteItemsOutput, UpdateItemOutput,
};
use dynaquery_model::{AttributeValue, Item, Key};

use crate::client::{ServiceResult, TableClient};

type Handler<I, O> = Box<dyn Fn(I) -> ServiceResult<O> + Send + Sync>;

/// Builds an item of string attributes from `(name, value)` pairs.
pub(crate) fn item(pairs: &[(&str, &str)]) -> Item {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), AttributeValue::from(*v)))
        .collect()
}

/// Builds a key map of string attributes from `(name, value)` pairs.
pub(crate) fn key_of(pairs: &[(&str, &str)]) -> Key {
    item(pairs)
}

/// A [`TableClient`] whose operations run caller-supplied handlers.
///
/// Every call is recorded before the handler runs; an operation without a
/// handler answers with its default (empty) output.
#[derive(Default)]
pub(crate) struct MockClient {
    on_get_item: Option<Handler<GetItemInput, GetItemOutput>>,
    on_put_item: Option<Handler<PutItemInput, PutItemOutput>>,
    on_update_item: Option<Handler<UpdateItemInput, UpdateItemOutput>>,
    on_delete_item: Option<Handler<DeleteItemInput, DeleteItemOutput>>,
    on_query: Option<Handler<QueryInput, QueryOutput>>,
    on_batch_get: Option<Handler<BatchGetItemInput, BatchGetItemOutput>>,
    on_batch_write: Option<Handler<BatchWriteItemInput, BatchWriteItemOutput>>,
    on_transact: Option<Handler<TransactWriteItemsInput, TransactWriteItemsOutput>>,

    get_item_calls: Mutex<Vec<GetItemInput>>,
    put_item_calls: Mutex<Vec<PutItemInput>>,
    update_item_calls: Mutex<Vec<UpdateItemInput>>,
    delete_item_calls: Mutex<Vec<DeleteItemInput>>,
    query_calls: Mutex<Vec<QueryInput>>,
    batch_get_calls: Mutex<Vec<BatchGetItemInput>>,
    batch_write_calls: Mutex<Vec<BatchWriteItemInput>>,
    transact_calls: Mutex<Vec<TransactWriteItemsInput>>,
}

impl std::fmt::Debug for MockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClient").finish_non_exhaustive()
    }
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get_item(
        mut self,
        f: impl Fn(GetItemInput) -> ServiceResult<GetItemOutput> + Send + Sync + 'static,
    ) -> Self {
        self.on_get_item = Some(Box::new(f));
        self
    }

    pub fn on_put_item(
        mut self,
        f: impl Fn(PutItemInput) -> ServiceResult<PutItemOutput> + Send + Sync + 'static,
    ) -> Self {
        self.on_put_item = Some(Box::new(f));
        self
    }

    pub fn on_update_item(
        mut self,
        f: impl Fn(UpdateItemInput) -> ServiceResult<UpdateItemOutput> + Send + Sync + 'static,
    ) -> Self {
        self.on_update_item = Some(Box::new(f));
        self
    }

    pub fn on_query(
        mut self,
        f: impl Fn(QueryInput) -> ServiceResult<QueryOutput> + Send + Sync + 'static,
    ) -> Self {
        self.on_query = Some(Box::new(f));
        self
    }

    pub fn on_batch_get(
        mut self,
        f: impl Fn(BatchGetItemInput) -> ServiceResult<BatchGetItemOutput> + Send + Sync + 'static,
    ) -> Self {
        self.on_batch_get = Some(Box::new(f));
        self
    }

    pub fn on_batch_write(
        mut self,
        f: impl Fn(BatchWriteItemInput) -> ServiceResult<BatchWriteItemOutput>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.on_batch_write = Some(Box::new(f));
        self
    }

    pub fn on_transact(
        mut self,
        f: impl Fn(TransactWriteItemsInput) -> ServiceResult<TransactWriteItemsOutput>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.on_transact = Some(Box::new(f));
        self
    }

    pub fn get_item_calls(&self) -> Vec<GetItemInput> {
        self.get_item_calls.lock().clone()
    }

    pub fn put_item_calls(&self) -> Vec<PutItemInput> {
        self.put_item_calls.lock().clone()
    }

    pub fn update_item_calls(&self) -> Vec<UpdateItemInput> {
        self.update_item_calls.lock().clone()
    }

    pub fn delete_item_calls(&self) -> Vec<DeleteItemInput> {
        self.delete_item_calls.lock().clone()
    }

    pub fn query_calls(&self) -> Vec<QueryInput> {
        self.query_calls.lock().clone()
    }

    pub fn batch_get_calls(&self) -> Vec<BatchGetItemInput> {
        self.batch_get_calls.lock().clone()
    }

    pub fn batch_write_calls(&self) -> Vec<BatchWriteItemInput> {
        self.batch_write_calls.lock().clone()
    }

    pub fn transact_calls(&self) -> Vec<TransactWriteItemsInput> {
        self.transact_calls.lock().clone()
    }
}

#[async_trait]
impl TableClient for MockClient {
    async fn get_item(&self, input: GetItemInput) -> ServiceResult<GetItemOutput> {
        self.get_item_calls.lock().push(input.clone());
        self.on_get_item.as_ref().map_or_else(
            || Ok(GetItemOutput::default()),
            |handler| handler(input),
        )
    }

    async fn put_item(&self, input: PutItemInput) -> ServiceResult<PutItemOutput> {
        self.put_item_calls.lock().push(input.clone());
        self.on_put_item.as_ref().map_or_else(
            || Ok(PutItemOutput::default()),
            |handler| handler(input),
        )
    }

    async fn update_item(&self, input: UpdateItemInput) -> ServiceResult<UpdateItemOutput> {
        self.update_item_calls.lock().push(input.clone());
        self.on_update_item.as_ref().map_or_else(
            || Ok(UpdateItemOutput::default()),
            |handler| handler(input),
        )
    }

    async fn delete_item(&self, input: DeleteItemInput) -> ServiceResult<DeleteItemOutput> {
        self.delete_item_calls.lock().push(input.clone());
        self.on_delete_item.as_ref().map_or_else(
            || Ok(DeleteItemOutput::default()),
            |handler| handler(input),
        )
    }

    async fn query(&self, input: QueryInput) -> ServiceResult<QueryOutput> {
        self.query_calls.lock().push(input.clone());
        self.on_query.as_ref().map_or_else(
            || Ok(QueryOutput::default()),
            |handler| handler(input),
        )
    }

    async fn batch_get_item(&self, input: BatchGetItemInput) -> ServiceResult<BatchGetItemOutput> {
        self.batch_get_calls.lock().push(input.clone());
        self.on_batch_get.as_ref().map_or_else(
            || Ok(BatchGetItemOutput::default()),
            |handler| handler(input),
        )
    }

    async fn batch_write_item(
        &self,
        input: BatchWriteItemInput,
    ) -> ServiceResult<BatchWriteItemOutput> {
        self.batch_write_calls.lock().push(input.clone());
        self.on_batch_write.as_ref().map_or_else(
            || Ok(BatchWriteItemOutput::default()),
            |handler| handler(input),
        )
    }

    async fn transact_write_items(
        &self,
        input: TransactWriteItemsInput,
    ) -> ServiceResult<TransactWriteItemsOutput> {
        self.transact_calls.lock().push(input.clone());
        self.on_transact.as_ref().map_or_else(
            || Ok(TransactWriteItemsOutput::default()),
            |handler| handler(input),
        )
    }
}
