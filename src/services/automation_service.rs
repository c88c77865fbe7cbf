use std::time::Instant;

use crate::database::{AutomationRulesRepository, Database};
use crate::models::{ActionOutcome, AutomationRule, RuleEvaluationLog, TicketEvent};
use crate::services::action_executor::ActionExecutor;
use crate::services::rule_selector::select_rule;

/// Orchestrates rule selection and action dispatch for new tickets
pub struct AutomationService {
    db: Database,
    action_executor: ActionExecutor,
}

impl AutomationService {
    pub fn new(db: Database, action_executor: ActionExecutor) -> Self {
        Self {
            db,
            action_executor,
        }
    }

    /// Entry point invoked synchronously from the ticket-creation flow.
    ///
    /// Loads the enabled rules fresh on every call, fires at most one rule,
    /// and reports whether an automated action ran so the caller can skip
    /// the default ticket-received message.
    pub async fn handle_ticket_created(&self, ticket: &TicketEvent) -> Result<bool, String> {
        let start_time = Instant::now();

        tracing::info!("Processing automation rules for ticket {}", ticket.id);

        let rules = self
            .db
            .get_automation_rules(true)
            .await
            .map_err(|e| format!("Failed to fetch rules: {}", e))?;

        if rules.is_empty() {
            tracing::debug!("No enabled automation rules");
            return Ok(false);
        }

        let rule = match select_rule(&rules, ticket) {
            Some(rule) => rule,
            None => {
                tracing::debug!(
                    "No rule matched ticket {} ({} enabled rule(s) checked)",
                    ticket.id,
                    rules.len()
                );
                return Ok(false);
            }
        };

        tracing::info!(
            "Rule '{}' ({}) matched ticket {} on {}",
            rule.name,
            rule.id,
            ticket.id,
            rule.trigger.location
        );

        let result = self.action_executor.execute(rule, ticket).await;

        let evaluation_time_ms = start_time.elapsed().as_millis() as i64;
        let (outcome, error_message) = match &result {
            Ok(outcome) => (*outcome, None),
            Err(e) => (ActionOutcome::Failed, Some(e.to_string())),
        };

        let log = RuleEvaluationLog {
            id: uuid::Uuid::new_v4().to_string(),
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            ticket_id: ticket.id.clone(),
            location: rule.trigger.location,
            outcome,
            error_message,
            evaluation_time_ms,
            evaluated_at: chrono::Utc::now().to_rfc3339(),
        };

        // The dispatch already ran; a failed log write is reported but must
        // not mask the result.
        if let Err(e) = self.db.create_rule_evaluation_log(&log).await {
            tracing::error!(
                "Failed to create evaluation log for rule '{}': {}",
                rule.name,
                e
            );
        }

        match result {
            Ok(outcome) => {
                tracing::info!(
                    "Rule '{}' executed on ticket {}: outcome={}, time={}ms",
                    rule.name,
                    ticket.id,
                    outcome,
                    evaluation_time_ms
                );
                Ok(true)
            }
            Err(e) => {
                tracing::error!(
                    "Action execution failed for rule '{}' on ticket {}: {}",
                    rule.name,
                    ticket.id,
                    e
                );
                Err(format!("Action execution failed: {}", e))
            }
        }
    }

    // Proxy methods for the rule store, used by the API layer

    pub async fn create_automation_rule(&self, rule: &AutomationRule) -> Result<(), String> {
        self.db
            .create_automation_rule(rule)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn get_automation_rule_by_id(
        &self,
        id: &str,
    ) -> Result<Option<AutomationRule>, String> {
        self.db
            .get_automation_rule_by_id(id)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn get_automation_rules(
        &self,
        enabled_only: bool,
    ) -> Result<Vec<AutomationRule>, String> {
        self.db
            .get_automation_rules(enabled_only)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn update_automation_rule(&self, rule: &AutomationRule) -> Result<(), String> {
        self.db
            .update_automation_rule(rule)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn delete_automation_rule(&self, id: &str) -> Result<(), String> {
        self.db
            .delete_automation_rule(id)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn enable_automation_rule(&self, id: &str) -> Result<(), String> {
        self.db
            .enable_automation_rule(id)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn disable_automation_rule(&self, id: &str) -> Result<(), String> {
        self.db
            .disable_automation_rule(id)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn get_rule_evaluation_logs(
        &self,
        rule_id: Option<&str>,
        ticket_id: Option<&str>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> Result<Vec<RuleEvaluationLog>, String> {
        self.db
            .get_rule_evaluation_logs(rule_id, ticket_id, limit, offset)
            .await
            .map_err(|e| e.to_string())
    }
}
