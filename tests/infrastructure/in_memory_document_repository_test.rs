use casebrief::application::ports::{DocumentRepository, RepositoryError};
use casebrief::domain::{Document, DocumentId, DocumentStatus, GeneratedBrief, UserId};
use casebrief::infrastructure::persistence::InMemoryDocumentRepository;

fn completed() -> DocumentStatus {
    DocumentStatus::Completed(GeneratedBrief {
        facts: "f".to_string(),
        analysis: "a".to_string(),
        brief: "Facts: f".to_string(),
    })
}

#[tokio::test]
async fn given_created_document_when_fetched_by_owner_then_it_is_returned() {
    let repository = InMemoryDocumentRepository::new();
    let owner = UserId::new("user-1");
    let document = Document::new(owner.clone(), "case.pdf".to_string());

    repository.create(&document).await.expect("create");

    let stored = repository.get(&owner, document.id).await.expect("get");
    assert_eq!(stored, Some(document));
}

#[tokio::test]
async fn given_document_when_fetched_by_other_user_then_nothing_is_returned() {
    let repository = InMemoryDocumentRepository::new();
    let document = Document::new(UserId::new("user-1"), "case.pdf".to_string());
    repository.create(&document).await.expect("create");

    let stored = repository
        .get(&UserId::new("user-2"), document.id)
        .await
        .expect("get");

    assert!(stored.is_none());
}

#[tokio::test]
async fn given_processing_document_when_completing_then_status_and_fields_are_stored() {
    let repository = InMemoryDocumentRepository::new();
    let owner = UserId::new("user-1");
    let document = Document::new(owner.clone(), "case.pdf".to_string());
    repository.create(&document).await.expect("create");

    repository
        .update_status(&owner, document.id, &completed())
        .await
        .expect("update");

    let stored = repository
        .get(&owner, document.id)
        .await
        .expect("get")
        .expect("exists");
    assert_eq!(stored.status, completed());
    assert!(stored.updated_at >= stored.created_at);
}

#[tokio::test]
async fn given_terminal_document_when_updating_again_then_transition_is_rejected() {
    let repository = InMemoryDocumentRepository::new();
    let owner = UserId::new("user-1");
    let document = Document::new(owner.clone(), "case.pdf".to_string());
    repository.create(&document).await.expect("create");
    repository
        .update_status(
            &owner,
            document.id,
            &DocumentStatus::Failed {
                error: "boom".to_string(),
            },
        )
        .await
        .expect("fail");

    let result = repository
        .update_status(&owner, document.id, &completed())
        .await;

    assert!(matches!(result, Err(RepositoryError::InvalidTransition(_))));
    let stored = repository
        .get(&owner, document.id)
        .await
        .expect("get")
        .expect("exists");
    assert_eq!(stored.status.as_str(), "failed");
}

#[tokio::test]
async fn given_processing_target_when_updating_then_transition_is_rejected() {
    let repository = InMemoryDocumentRepository::new();
    let owner = UserId::new("user-1");
    let document = Document::new(owner.clone(), "case.pdf".to_string());
    repository.create(&document).await.expect("create");

    let result = repository
        .update_status(&owner, document.id, &DocumentStatus::Processing)
        .await;

    assert!(matches!(result, Err(RepositoryError::InvalidTransition(_))));
}

#[tokio::test]
async fn given_unknown_document_when_updating_then_not_found_is_returned() {
    let repository = InMemoryDocumentRepository::new();

    let result = repository
        .update_status(&UserId::new("user-1"), DocumentId::new(), &completed())
        .await;

    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
async fn given_duplicate_document_when_creating_then_error_is_returned() {
    let repository = InMemoryDocumentRepository::new();
    let document = Document::new(UserId::new("user-1"), "case.pdf".to_string());
    repository.create(&document).await.expect("create");

    let result = repository.create(&document).await;

    assert!(result.is_err());
    assert_eq!(repository.len().await, 1);
}
