//! The remote-service seam.

use async_trait::async_trait;
use dynaquery_model::ServiceError;
use dynaquery_model::input::{
    BatchGetItemInput, BatchWriteItemInput, DeleteItemInput, GetItemInput, PutItemInput,
    QueryInput, TransactWriteItemsInput, UpdateItemInput,
};
use dynaquery_model::output::{
    BatchGetItemOutput, BatchWriteItemOutput, DeleteItemOutput, GetItemOutput, PutItemOutput,
    QueryOutput, TransactWriteItemsOutput, UpdateItemOutput,
};

/// One remote call's result: the typed output or the service's own error.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// The operations this layer issues against the table service.
///
/// Implementations own transport, signing, and serialization; everything
/// above this trait is pure request construction and response recombination.
/// The trait is object-safe so operations can take `&dyn TableClient`.
#[async_trait]
pub trait TableClient: Send + Sync {
    /// Fetch a single item by primary key.
    async fn get_item(&self, input: GetItemInput) -> ServiceResult<GetItemOutput>;

    /// Put (insert or replace) a single item.
    async fn put_item(&self, input: PutItemInput) -> ServiceResult<PutItemOutput>;

    /// Update a single item.
    async fn update_item(&self, input: UpdateItemInput) -> ServiceResult<UpdateItemOutput>;

    /// Delete a single item by primary key.
    async fn delete_item(&self, input: DeleteItemInput) -> ServiceResult<DeleteItemOutput>;

    /// Query one index by key condition.
    async fn query(&self, input: QueryInput) -> ServiceResult<QueryOutput>;

    /// Batched read, bounded by the service's per-request key cap.
    async fn batch_get_item(&self, input: BatchGetItemInput) -> ServiceResult<BatchGetItemOutput>;

    /// Batched put/delete, bounded by the service's per-request cap.
    async fn batch_write_item(
        &self,
        input: BatchWriteItemInput,
    ) -> ServiceResult<BatchWriteItemOutput>;

    /// All-or-nothing transactional write.
    async fn transact_write_items(
        &self,
        input: TransactWriteItemsInput,
    ) -> ServiceResult<TransactWriteItemsOutput>;
}
