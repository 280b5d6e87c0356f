mod pdf_adapter;
mod vision_ocr_adapter;

pub use pdf_adapter::PdfAdapter;
pub use vision_ocr_adapter::{AsyncBatchAnnotateRequest, Operation, VisionOcrAdapter};
