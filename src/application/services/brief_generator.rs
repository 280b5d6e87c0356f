use std::fmt;
use std::sync::Arc;

use crate::application::ports::{DocumentRepository, LlmClient, LlmClientError, RepositoryError};
use crate::application::prompts;
use crate::domain::{DocumentId, DocumentStatus, GeneratedBrief, UserId};

use super::retry_policy::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BriefStage {
    Facts,
    Analysis,
    Synthesis,
}

impl BriefStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            BriefStage::Facts => "facts",
            BriefStage::Analysis => "analysis",
            BriefStage::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for BriefStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts, then analysis, then the synthesized brief. Each stage's prompt
/// embeds the outputs of the stages before it, so the calls never overlap.
pub struct BriefGenerator {
    llm_client: Arc<dyn LlmClient>,
    repository: Arc<dyn DocumentRepository>,
    retry_policy: RetryPolicy,
}

impl BriefGenerator {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        repository: Arc<dyn DocumentRepository>,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            llm_client,
            repository,
            retry_policy,
        }
    }

    #[tracing::instrument(skip(self, full_text), fields(chars = full_text.len()))]
    pub async fn generate(&self, full_text: &str) -> Result<GeneratedBrief, BriefGenerationError> {
        let facts = self
            .call_model(BriefStage::Facts, prompts::facts_prompt(full_text))
            .await?;

        let analysis = self
            .call_model(
                BriefStage::Analysis,
                prompts::analysis_prompt(&facts, full_text),
            )
            .await?;

        let brief = self
            .call_model(
                BriefStage::Synthesis,
                prompts::synthesis_prompt(&facts, &analysis, full_text),
            )
            .await?;

        Ok(GeneratedBrief {
            facts,
            analysis,
            brief,
        })
    }

    /// Writes a terminal status and, for `Completed`, all generated fields.
    pub async fn persist(
        &self,
        owner: &UserId,
        id: DocumentId,
        status: &DocumentStatus,
    ) -> Result<(), RepositoryError> {
        tracing::debug!(document_id = %id, status = status.as_str(), "Persisting document status");
        self.repository.update_status(owner, id, status).await
    }

    async fn call_model(
        &self,
        stage: BriefStage,
        prompt: String,
    ) -> Result<String, BriefGenerationError> {
        let output = self
            .retry_policy
            .run(stage.as_str(), || self.llm_client.generate(&prompt))
            .await
            .map_err(|e| BriefGenerationError::ModelCall {
                stage,
                attempts: e.attempts,
                source: e.last_error,
            })?;

        tracing::info!(stage = %stage, output_chars = output.len(), "Generation stage complete");
        Ok(output)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BriefGenerationError {
    #[error("{stage} stage failed after {attempts} attempts: {source}")]
    ModelCall {
        stage: BriefStage,
        attempts: u32,
        #[source]
        source: LlmClientError,
    },
}
