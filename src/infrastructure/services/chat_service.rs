//! Chat service - the full question-to-answer pipeline

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::audit::{AuditEntry, AuditLog, ChatOutcome};
use crate::domain::gate::{ConfidenceGate, GateDecision};
use crate::domain::generation::{AnswerGenerator, PromptBuilder};
use crate::domain::query::QueryNormalizer;
use crate::domain::retrieval::{self, Retriever};
use crate::domain::DomainError;
use crate::infrastructure::observability::metrics;

/// What the user sees: generated text or the fixed fallback message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub outcome: ChatOutcome,
    pub request_id: Uuid,
}

/// Retrieval and gating parameters for [`ChatService`]
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub top_k: usize,
    pub min_similarity: f32,
    pub fallback_message: String,
}

/// Collaborators of [`ChatService`]
#[derive(Debug, Clone)]
pub struct ChatServiceDeps {
    pub normalizer: QueryNormalizer,
    pub gate: ConfidenceGate,
    pub retriever: Retriever,
    pub prompts: PromptBuilder,
    pub generator: Arc<dyn AnswerGenerator>,
    pub audit: Arc<dyn AuditLog>,
}

#[derive(Debug)]
pub struct ChatService {
    deps: ChatServiceDeps,
    settings: ChatSettings,
}

impl ChatService {
    pub fn new(deps: ChatServiceDeps, settings: ChatSettings) -> Self {
        Self { deps, settings }
    }

    /// Answer a question.
    ///
    /// Only an empty question is an error. Every other failure along the
    /// way ends in the fallback message.
    pub async fn ask(&self, message: &str) -> Result<ChatReply, DomainError> {
        let question = self.deps.normalizer.normalize(message);
        if question.is_empty() {
            return Err(DomainError::validation("message must not be empty"));
        }

        let request_id = Uuid::new_v4();
        let decision = self.decide(&question).await;
        let (decision_label, reason_label) = decision.labels();
        metrics::record_gate_decision(decision_label, reason_label);

        let reply = match decision {
            GateDecision::Proceed(evidence) => {
                let top_score = evidence.first().map(|c| c.score).unwrap_or_default();
                let prompt = self.deps.prompts.build(&question, &evidence);

                match self.deps.generator.generate(&prompt).await {
                    Ok(answer) => {
                        info!(
                            %request_id,
                            evidence = evidence.len(),
                            top_score,
                            "Answered from retrieved evidence"
                        );
                        self.reply(request_id, answer, ChatOutcome::Answered)
                    }
                    Err(e) => {
                        warn!(
                            %request_id,
                            generator = self.deps.generator.generator_name(),
                            error = %e,
                            "Generation failed, falling back"
                        );
                        self.fallback(request_id)
                    }
                }
            }
            GateDecision::Fallback(reason) => {
                info!(%request_id, reason = %reason, "Falling back");
                self.fallback(request_id)
            }
        };

        let entry = AuditEntry::new(request_id, question, reply.response.clone(), reply.outcome);
        if let Err(e) = self.deps.audit.record(&entry).await {
            warn!(%request_id, error = %e, "Failed to record audit entry");
        }

        Ok(reply)
    }

    async fn decide(&self, question: &str) -> GateDecision {
        // Checked first: no evidence can make these answerable
        if let Some(reason) = self.deps.gate.check_exclusive(question) {
            return GateDecision::Fallback(reason);
        }

        let started = Instant::now();
        let result = match self
            .deps
            .retriever
            .try_retrieve(question, self.settings.top_k)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                if e.is_embedding_unavailable() {
                    metrics::record_embedding_failures("query", 1);
                }
                retrieval::degraded(&e)
            }
        };
        metrics::record_retrieval(result.len(), started.elapsed());

        self.deps.gate.decide(result, self.settings.min_similarity)
    }

    fn reply(&self, request_id: Uuid, response: String, outcome: ChatOutcome) -> ChatReply {
        ChatReply {
            response,
            outcome,
            request_id,
        }
    }

    fn fallback(&self, request_id: Uuid) -> ChatReply {
        self.reply(
            request_id,
            self.settings.fallback_message.clone(),
            ChatOutcome::Fallback,
        )
    }
}
