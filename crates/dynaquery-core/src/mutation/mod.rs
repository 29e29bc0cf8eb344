//! Write-side operations: expression building, single-item mutations,
//! batched writes, and transactions.

pub mod batch;
pub mod expression;
pub mod transact;
pub mod write;

pub use batch::{batch_delete_items, batch_put_items};
pub use expression::{
    ConditionExpr, Connective, ExpressionParts, build_condition_expressions,
    build_update_expressions,
};
pub use transact::{transact_delete_items, transact_put_items, transact_write_items};
pub use write::{delete_item, put_item, update_item};
