mod in_memory_document_repository;
mod pg_document_repository;
mod pg_pool;
mod repository_factory;

pub use in_memory_document_repository::InMemoryDocumentRepository;
pub use pg_document_repository::PgDocumentRepository;
pub use pg_pool::create_pool;
pub use repository_factory::DocumentRepositoryFactory;
