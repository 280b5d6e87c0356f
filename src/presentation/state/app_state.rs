use std::sync::Arc;

use crate::application::ports::IdentityVerifier;
use crate::application::services::{BriefExporter, DocumentPipeline};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<DocumentPipeline>,
    pub exporter: Arc<BriefExporter>,
    pub identity_verifier: Arc<dyn IdentityVerifier>,
    pub allowed_origins: Vec<String>,
}
