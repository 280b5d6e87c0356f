use std::sync::Arc;

use casebrief::application::ports::{BriefRenderer, DocumentRepository, RenderError};
use casebrief::application::services::{BriefExporter, ExportError};
use casebrief::domain::{
    BriefSections, Document, DocumentId, DocumentStatus, GeneratedBrief, UserId,
};
use casebrief::infrastructure::persistence::InMemoryDocumentRepository;

/// Renders `Title|content` lines so assertions can read the output.
struct PlainRenderer;

impl BriefRenderer for PlainRenderer {
    fn render(&self, sections: &BriefSections) -> Result<Vec<u8>, RenderError> {
        let lines: Vec<String> = sections
            .iter()
            .map(|(heading, content)| format!("{}|{}", heading.title(), content))
            .collect();
        Ok(lines.join("\n").into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn content_type(&self) -> &'static str {
        "text/plain"
    }
}

async fn store_with(status: DocumentStatus) -> (Arc<InMemoryDocumentRepository>, UserId, DocumentId) {
    let repository = Arc::new(InMemoryDocumentRepository::new());
    let owner = UserId::new("user-1");
    let document = Document::new(owner.clone(), "case.pdf".to_string());
    let id = document.id;
    repository.create(&document).await.expect("create");
    if status.is_terminal() {
        repository
            .update_status(&owner, id, &status)
            .await
            .expect("update");
    }
    (repository, owner, id)
}

fn completed(brief: &str) -> DocumentStatus {
    DocumentStatus::Completed(GeneratedBrief {
        facts: "facts".to_string(),
        analysis: "analysis".to_string(),
        brief: brief.to_string(),
    })
}

#[tokio::test]
async fn given_unknown_document_when_exporting_then_not_found_is_returned() {
    let repository = Arc::new(InMemoryDocumentRepository::new());
    let exporter = BriefExporter::new(repository, Arc::new(PlainRenderer));

    let result = exporter.export(&UserId::new("user-1"), DocumentId::new()).await;

    assert!(matches!(result, Err(ExportError::NotFound(_))));
}

#[tokio::test]
async fn given_document_of_another_user_when_exporting_then_not_found_is_returned() {
    let (repository, _, id) = store_with(completed("Facts: x")).await;
    let exporter = BriefExporter::new(repository, Arc::new(PlainRenderer));

    let result = exporter.export(&UserId::new("intruder"), id).await;

    assert!(matches!(result, Err(ExportError::NotFound(_))));
}

#[tokio::test]
async fn given_processing_document_when_exporting_then_not_ready_is_returned() {
    let (repository, owner, id) = store_with(DocumentStatus::Processing).await;
    let exporter = BriefExporter::new(repository, Arc::new(PlainRenderer));

    let result = exporter.export(&owner, id).await;

    assert!(matches!(
        result,
        Err(ExportError::NotReady {
            status: "processing",
            ..
        })
    ));
}

#[tokio::test]
async fn given_failed_document_when_exporting_then_not_ready_is_returned() {
    let (repository, owner, id) = store_with(DocumentStatus::Failed {
        error: "model unavailable".to_string(),
    })
    .await;
    let exporter = BriefExporter::new(repository, Arc::new(PlainRenderer));

    let result = exporter.export(&owner, id).await;

    assert!(matches!(
        result,
        Err(ExportError::NotReady {
            status: "failed",
            ..
        })
    ));
}

#[tokio::test]
async fn given_brief_missing_procedural_history_when_exporting_then_all_six_headings_are_rendered() {
    let brief = "Facts: f\nIssues: i\nHolding: h\nReasoning: r\nConclusion: c";
    let (repository, owner, id) = store_with(completed(brief)).await;
    let exporter = BriefExporter::new(repository, Arc::new(PlainRenderer));

    let exported = exporter.export(&owner, id).await.expect("export succeeds");

    let rendered = String::from_utf8(exported.content).expect("utf8");
    assert_eq!(
        rendered,
        "Facts|f\nProcedural History|\nIssues|i\nHolding|h\nReasoning|r\nConclusion|c"
    );
    assert_eq!(exported.filename, format!("brief_{}.txt", id));
    assert_eq!(exported.content_type, "text/plain");
}
