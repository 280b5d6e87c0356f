use crate::domain::BriefSections;

/// Renders parsed brief sections into a downloadable document.
pub trait BriefRenderer: Send + Sync {
    fn render(&self, sections: &BriefSections) -> Result<Vec<u8>, RenderError>;

    fn extension(&self) -> &'static str;

    fn content_type(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("document packaging failed: {0}")]
    Packaging(String),
}
