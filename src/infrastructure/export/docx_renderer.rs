use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Run};

use crate::application::ports::{BriefRenderer, RenderError};
use crate::domain::BriefSections;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// Half-points: 20 = 10pt.
const HEADING_SIZE: usize = 20;

/// One bold heading paragraph and one content paragraph per section.
#[derive(Default)]
pub struct DocxBriefRenderer;

impl DocxBriefRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl BriefRenderer for DocxBriefRenderer {
    fn render(&self, sections: &BriefSections) -> Result<Vec<u8>, RenderError> {
        let mut docx = Docx::new();

        for (heading, content) in sections.iter() {
            docx = docx
                .add_paragraph(
                    Paragraph::new().add_run(
                        Run::new()
                            .add_text(heading.title())
                            .bold()
                            .size(HEADING_SIZE),
                    ),
                )
                .add_paragraph(content_paragraph(content));
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| RenderError::Packaging(e.to_string()))?;

        Ok(buffer.into_inner())
    }

    fn extension(&self) -> &'static str {
        "docx"
    }

    fn content_type(&self) -> &'static str {
        DOCX_CONTENT_TYPE
    }
}

fn content_paragraph(content: &str) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in content.lines().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    Paragraph::new().add_run(run)
}
