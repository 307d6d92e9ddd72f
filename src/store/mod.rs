//! # Word Store
//!
//! The document-store side of the service: the `word` document model, the
//! predicate AST, the repository contract the API consumes, an in-process
//! implementation of it, and the lazily-connected handle shared by requests.

pub mod document;
pub mod filter;
pub mod handle;
pub mod memory;
pub mod repository;

pub use document::{fields, NewWord, Word, WordPatch};
pub use filter::{FilterExpr, FilterOperator, FilterSet};
pub use handle::{MemoryConnector, StoreConnector, StoreHandle};
pub use memory::MemoryWordStore;
pub use repository::{FindOptions, OrderBy, StoreError, StoreResult, WordRepository};
