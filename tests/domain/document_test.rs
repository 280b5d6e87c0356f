use casebrief::domain::{Document, DocumentId, DocumentStatus, GeneratedBrief, UserId};

fn generated() -> GeneratedBrief {
    GeneratedBrief {
        facts: "facts".to_string(),
        analysis: "analysis".to_string(),
        brief: "Facts: x".to_string(),
    }
}

#[test]
fn given_new_document_when_created_then_status_is_processing() {
    let document = Document::new(UserId::new("user-1"), "case.pdf".to_string());

    assert_eq!(document.status, DocumentStatus::Processing);
    assert_eq!(document.owner.as_str(), "user-1");
    assert!(document.brief().is_none());
}

#[test]
fn given_completed_status_when_reading_brief_then_brief_is_returned() {
    let mut document = Document::new(UserId::new("user-1"), "case.pdf".to_string());
    document.status = DocumentStatus::Completed(generated());

    assert_eq!(document.brief(), Some("Facts: x"));
}

#[test]
fn given_statuses_when_checking_terminal_then_only_processing_is_open() {
    assert!(!DocumentStatus::Processing.is_terminal());
    assert!(DocumentStatus::Completed(generated()).is_terminal());
    assert!(
        DocumentStatus::Failed {
            error: "boom".to_string()
        }
        .is_terminal()
    );
}

#[test]
fn given_statuses_when_converted_to_str_then_wire_names_are_used() {
    assert_eq!(DocumentStatus::Processing.as_str(), "processing");
    assert_eq!(DocumentStatus::Completed(generated()).as_str(), "completed");
    assert_eq!(
        DocumentStatus::Failed {
            error: String::new()
        }
        .as_str(),
        "failed"
    );
}

#[test]
fn given_document_id_string_when_parsing_then_display_round_trips() {
    let id = DocumentId::new();

    let parsed: DocumentId = id.to_string().parse().expect("valid id");

    assert_eq!(parsed, id);
}

#[test]
fn given_non_uuid_string_when_parsing_document_id_then_error_is_returned() {
    assert!("not-a-uuid".parse::<DocumentId>().is_err());
}
