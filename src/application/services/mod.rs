mod brief_exporter;
mod brief_generator;
mod document_pipeline;
mod ocr_bridge;
mod retry_policy;
mod text_extractor;

pub use brief_exporter::{BriefExporter, ExportError, ExportedBrief};
pub use brief_generator::{BriefGenerationError, BriefGenerator, BriefStage};
pub use document_pipeline::{
    DEFAULT_MAX_UPLOAD_BYTES, DocumentPipeline, PipelineError, Upload, ValidationError,
};
pub use ocr_bridge::{
    AnnotationOutput, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT, NO_TEXT_SENTINEL, OCR_FAILED_SENTINEL,
    OcrBridge, OcrError,
};
pub use retry_policy::{RetryError, RetryPolicy};
pub use text_extractor::{DEFAULT_MIN_NATIVE_CHARS, Extraction, ExtractionError, TextExtractor};
