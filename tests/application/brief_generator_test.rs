use std::sync::Arc;

use casebrief::application::ports::DocumentRepository;
use casebrief::application::services::{BriefGenerationError, BriefGenerator, BriefStage};
use casebrief::domain::{Document, DocumentStatus, GeneratedBrief, UserId};
use casebrief::infrastructure::persistence::InMemoryDocumentRepository;

use crate::common::{SAMPLE_BRIEF, ScriptedLlmClient, instant_retry};

fn generator(llm: &Arc<ScriptedLlmClient>) -> (Arc<InMemoryDocumentRepository>, BriefGenerator) {
    let repository = Arc::new(InMemoryDocumentRepository::new());
    let generator = BriefGenerator::new(llm.clone(), repository.clone(), instant_retry());
    (repository, generator)
}

#[tokio::test]
async fn given_full_text_when_generating_then_three_sequential_calls_feed_each_other() {
    let llm = Arc::new(ScriptedLlmClient::new());
    let (_, generator) = generator(&llm);

    let generated = generator
        .generate("The opinion text.")
        .await
        .expect("generation succeeds");

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].starts_with("Extract the key facts"));
    assert!(prompts[0].contains("The opinion text."));
    assert!(prompts[1].contains("Based on the facts: output 1"));
    assert!(prompts[2].contains("facts: output 1"));
    assert!(prompts[2].contains("analysis: output 2"));
    assert!(prompts[2].contains("The opinion text."));
    assert_eq!(
        generated,
        GeneratedBrief {
            facts: "output 1".to_string(),
            analysis: "output 2".to_string(),
            brief: SAMPLE_BRIEF.to_string(),
        }
    );
}

#[tokio::test]
async fn given_transient_failures_on_first_stage_when_generating_then_stage_is_retried() {
    let llm = Arc::new(ScriptedLlmClient::failing_first(2));
    let (_, generator) = generator(&llm);

    let generated = generator.generate("text").await.expect("third attempt succeeds");

    assert_eq!(llm.calls(), 5);
    assert_eq!(generated.facts, "output 3");
    let facts_prompts = llm
        .prompts()
        .iter()
        .filter(|p| p.starts_with("Extract the key facts"))
        .count();
    assert_eq!(facts_prompts, 3);
}

#[tokio::test]
async fn given_model_always_failing_when_generating_then_first_stage_error_reports_three_attempts() {
    let llm = Arc::new(ScriptedLlmClient::always_failing());
    let (_, generator) = generator(&llm);

    let error = generator.generate("text").await.expect_err("budget exhausted");

    let BriefGenerationError::ModelCall {
        stage, attempts, ..
    } = error;
    assert_eq!(stage, BriefStage::Facts);
    assert_eq!(attempts, 3);
    assert_eq!(llm.calls(), 3);
}

#[tokio::test]
async fn given_processing_document_when_persisting_completed_then_all_fields_are_stored() {
    let llm = Arc::new(ScriptedLlmClient::new());
    let (repository, generator) = generator(&llm);
    let owner = UserId::new("user-1");
    let document = Document::new(owner.clone(), "case.pdf".to_string());
    repository.create(&document).await.expect("create");

    let generated = generator.generate("text").await.expect("generation succeeds");
    generator
        .persist(&owner, document.id, &DocumentStatus::Completed(generated.clone()))
        .await
        .expect("persist");

    let stored = repository
        .get(&owner, document.id)
        .await
        .expect("get")
        .expect("document exists");
    assert_eq!(stored.status, DocumentStatus::Completed(generated));
}
