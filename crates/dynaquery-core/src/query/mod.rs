//! Read-side operations: query compilation, pagination, and batched reads.

pub mod batch;
pub mod builder;
pub mod get;
pub mod multi_index;
pub mod paginate;

pub use batch::{batch_exists, batch_get_items};
pub use builder::build_query_input;
pub use get::{exists, get_item};
pub use multi_index::{MultiIndexPage, MultiIndexQuery, query_with_multi_index};
pub use paginate::{DEFAULT_QUERY_LIMIT, Page, query, query_with_cursor};
