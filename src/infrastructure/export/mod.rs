mod docx_renderer;

pub use docx_renderer::{DOCX_CONTENT_TYPE, DocxBriefRenderer};
