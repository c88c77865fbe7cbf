use std::sync::Arc;
use thiserror::Error;

use crate::api::middleware::error::ApiError;
use crate::database::Database;
use crate::models::{ActionOutcome, AutomationRule, Message, RuleAction, TicketEvent};
use crate::services::prompt_builder::build_prompt;
use crate::services::response_generator::ResponseGenerator;

/// Canned reply posted when generation fails or comes back empty
pub const FALLBACK_REPLY: &str =
    "Thank you for your message. An agent will take care of your ticket shortly.";

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
    #[error("Agent not found: {0}")]
    AgentNotFound(String),
}

impl From<ApiError> for ActionError {
    fn from(err: ApiError) -> Self {
        ActionError::ExecutionFailed(err.to_string())
    }
}

/// Executes the action of a fired rule against a ticket.
///
/// Exactly one action variant runs per invocation; there is no chaining and
/// no retry. Generation failures are recovered locally with the canned
/// fallback reply; record-store write failures propagate to the caller.
pub struct ActionExecutor {
    db: Database,
    generator: Arc<dyn ResponseGenerator>,
    /// System account credited as author of automated messages
    ai_account_id: String,
}

impl ActionExecutor {
    pub fn new(db: Database, generator: Arc<dyn ResponseGenerator>, ai_account_id: String) -> Self {
        Self {
            db,
            generator,
            ai_account_id,
        }
    }

    pub async fn execute(
        &self,
        rule: &AutomationRule,
        ticket: &TicketEvent,
    ) -> Result<ActionOutcome, ActionError> {
        tracing::info!(
            "Executing action of rule '{}' ({}) on ticket {}",
            rule.name,
            rule.id,
            ticket.id
        );

        match &rule.action {
            RuleAction::AiReply { prompt, faq_id } => {
                self.execute_ai_reply(ticket, prompt.as_deref(), faq_id.as_deref())
                    .await
            }
            RuleAction::StatusChange { status } => {
                self.db.update_ticket_status(&ticket.id, *status).await?;
                Ok(ActionOutcome::StatusChanged)
            }
            RuleAction::AssignAgent { agent_id } => {
                // Verify the target exists and is an agent before writing
                self.db
                    .get_agent_by_id(agent_id)
                    .await?
                    .ok_or_else(|| ActionError::AgentNotFound(agent_id.clone()))?;

                self.db.assign_ticket_to_agent(&ticket.id, agent_id).await?;
                Ok(ActionOutcome::AgentAssigned)
            }
        }
    }

    async fn execute_ai_reply(
        &self,
        ticket: &TicketEvent,
        admin_prompt: Option<&str>,
        faq_id: Option<&str>,
    ) -> Result<ActionOutcome, ActionError> {
        // A dangling faq_id degrades to "no FAQ block" rather than failing
        let faq = match faq_id {
            Some(id) => self.db.get_faq_entry_by_id(id).await?,
            None => None,
        };

        let prompt = build_prompt(ticket, admin_prompt, faq.as_ref());

        let (content, outcome) = match self.generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => (text, ActionOutcome::ReplyPosted),
            Ok(_) => {
                tracing::warn!(
                    "Generation returned an empty reply for ticket {}, falling back to canned message",
                    ticket.id
                );
                (FALLBACK_REPLY.to_string(), ActionOutcome::ReplyFallback)
            }
            Err(e) => {
                tracing::warn!(
                    "Generation failed for ticket {}: {}, falling back to canned message",
                    ticket.id,
                    e
                );
                (FALLBACK_REPLY.to_string(), ActionOutcome::ReplyFallback)
            }
        };

        let message = Message::new_outgoing(ticket.id.clone(), content, self.ai_account_id.clone());
        self.db.create_message(&message).await?;

        tracing::info!(
            "Automated reply posted on ticket {} (outcome: {})",
            ticket.id,
            outcome
        );

        Ok(outcome)
    }
}
