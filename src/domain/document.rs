use chrono::{DateTime, Utc};

use super::{DocumentId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub owner: UserId,
    pub filename: String,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(owner: UserId, filename: String) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            owner,
            filename,
            status: DocumentStatus::Processing,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn brief(&self) -> Option<&str> {
        match &self.status {
            DocumentStatus::Completed(generated) => Some(&generated.brief),
            _ => None,
        }
    }
}

/// Lifecycle of a document. `Completed` always carries the generated
/// fields and `Failed` always carries the error detail.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStatus {
    Processing,
    Completed(GeneratedBrief),
    Failed { error: String },
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Processing => "processing",
            DocumentStatus::Completed(_) => "completed",
            DocumentStatus::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, DocumentStatus::Processing)
    }
}

/// Output of the three-stage generation chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBrief {
    pub facts: String,
    pub analysis: String,
    pub brief: String,
}
