pub mod document_store;
pub use document_store::{Collection, DocumentStore, StoreError, StoredDocument};
pub mod memory_store;
pub use memory_store::MemoryStore;
pub mod pg_store;
pub use pg_store::PgDocumentStore;
