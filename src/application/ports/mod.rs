mod blob_store;
mod brief_renderer;
mod document_repository;
mod identity_verifier;
mod llm_client;
mod ocr_engine;
mod pdf_text_loader;
mod repository_error;

pub use blob_store::{BlobStore, BlobStoreError};
pub use brief_renderer::{BriefRenderer, RenderError};
pub use document_repository::DocumentRepository;
pub use identity_verifier::{IdentityError, IdentityVerifier};
pub use llm_client::{LlmClient, LlmClientError};
pub use ocr_engine::{OcrEngine, OcrEngineError};
pub use pdf_text_loader::{PdfTextLoader, PdfTextLoaderError};
pub use repository_error::RepositoryError;
