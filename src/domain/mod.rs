mod brief_sections;
mod document;
mod document_id;
mod extraction;
mod ocr_job;
mod storage_path;

pub use brief_sections::{BriefHeading, BriefSections};
pub use document::{Document, DocumentStatus, GeneratedBrief};
pub use document_id::{DocumentId, UserId};
pub use extraction::{ExtractionMethod, ExtractionResult};
pub use ocr_job::{OcrJobHandle, OcrJobStatus, OcrRequest};
pub use storage_path::StoragePath;
