mod export_brief;
mod health;
mod process_document;

pub use export_brief::export_brief_handler;
pub use health::{HealthResponse, health_handler};
pub use process_document::{ProcessDocumentResponse, process_document_handler};
