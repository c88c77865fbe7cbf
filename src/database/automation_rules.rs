use async_trait::async_trait;
use sqlx::Row;

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{
    ActionOutcome, AutomationRule, RuleAction, RuleEvaluationLog, RuleTrigger, TriggerLocation,
};

#[async_trait]
pub trait AutomationRulesRepository: Send + Sync {
    /// Create automation rule
    async fn create_automation_rule(&self, rule: &AutomationRule) -> ApiResult<()>;
    /// Get automation rule by ID
    async fn get_automation_rule_by_id(&self, id: &str) -> ApiResult<Option<AutomationRule>>;
    /// Get all automation rules in matching priority order (creation time
    /// ascending), optionally restricted to enabled ones
    async fn get_automation_rules(&self, enabled_only: bool) -> ApiResult<Vec<AutomationRule>>;
    /// Update an existing automation rule
    async fn update_automation_rule(&self, rule: &AutomationRule) -> ApiResult<()>;
    /// Delete an automation rule
    async fn delete_automation_rule(&self, id: &str) -> ApiResult<()>;
    /// Enable an automation rule
    async fn enable_automation_rule(&self, id: &str) -> ApiResult<()>;
    /// Disable an automation rule
    async fn disable_automation_rule(&self, id: &str) -> ApiResult<()>;
    /// Create a rule evaluation log entry
    async fn create_rule_evaluation_log(&self, log: &RuleEvaluationLog) -> ApiResult<()>;
    /// Get rule evaluation logs with optional filters
    async fn get_rule_evaluation_logs(
        &self,
        rule_id: Option<&str>,
        ticket_id: Option<&str>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> ApiResult<Vec<RuleEvaluationLog>>;
}

fn rule_from_row(row: &sqlx::any::AnyRow) -> ApiResult<AutomationRule> {
    let location_str: String = row.try_get("trigger_location")?;
    let location = location_str.parse::<TriggerLocation>().map_err(|e| {
        ApiError::Internal(format!(
            "Failed to parse trigger_location '{}': {}",
            location_str, e
        ))
    })?;

    let action_str: String = row.try_get("action")?;
    let action: RuleAction = serde_json::from_str(&action_str)
        .map_err(|e| ApiError::Internal(format!("Failed to deserialize action: {}", e)))?;

    Ok(AutomationRule {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        reason: row.try_get::<Option<String>, _>("reason").ok().flatten(),
        enabled: {
            let enabled_int: i32 = row.try_get("enabled")?;
            enabled_int != 0
        },
        trigger: RuleTrigger {
            keyword: row.try_get("trigger_keyword")?,
            location,
        },
        action,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl AutomationRulesRepository for Database {
    async fn create_automation_rule(&self, rule: &AutomationRule) -> ApiResult<()> {
        let action_json = serde_json::to_string(&rule.action)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize action: {}", e)))?;

        sqlx::query(
            "INSERT INTO automation_rules (id, name, reason, enabled, trigger_keyword, trigger_location, action, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&rule.id)
        .bind(&rule.name)
        .bind(&rule.reason)
        .bind(rule.enabled)
        .bind(&rule.trigger.keyword)
        .bind(rule.trigger.location.to_string())
        .bind(&action_json)
        .bind(&rule.created_at)
        .bind(&rule.updated_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn get_automation_rule_by_id(&self, id: &str) -> ApiResult<Option<AutomationRule>> {
        let row = sqlx::query(
            "SELECT id, name, reason, CAST(enabled AS INTEGER) as enabled, trigger_keyword, trigger_location, action, created_at, updated_at
             FROM automation_rules
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        if let Some(row) = row {
            Ok(Some(rule_from_row(&row)?))
        } else {
            Ok(None)
        }
    }

    async fn get_automation_rules(&self, enabled_only: bool) -> ApiResult<Vec<AutomationRule>> {
        // created_at ASC is load-bearing: it is the first-match priority order
        let query = if enabled_only {
            "SELECT id, name, reason, CAST(enabled AS INTEGER) as enabled, trigger_keyword, trigger_location, action, created_at, updated_at
             FROM automation_rules
             WHERE enabled = TRUE
             ORDER BY created_at ASC"
        } else {
            "SELECT id, name, reason, CAST(enabled AS INTEGER) as enabled, trigger_keyword, trigger_location, action, created_at, updated_at
             FROM automation_rules
             ORDER BY created_at ASC"
        };

        let rows = sqlx::query(query).fetch_all(self.pool()).await?;

        let mut rules = Vec::new();
        for row in rows {
            rules.push(rule_from_row(&row)?);
        }

        Ok(rules)
    }

    async fn update_automation_rule(&self, rule: &AutomationRule) -> ApiResult<()> {
        let action_json = serde_json::to_string(&rule.action)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize action: {}", e)))?;

        let result = sqlx::query(
            "UPDATE automation_rules
             SET name = ?, reason = ?, enabled = ?, trigger_keyword = ?, trigger_location = ?, action = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&rule.name)
        .bind(&rule.reason)
        .bind(rule.enabled)
        .bind(&rule.trigger.keyword)
        .bind(rule.trigger.location.to_string())
        .bind(&action_json)
        .bind(&rule.updated_at)
        .bind(&rule.id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Automation rule not found".to_string()));
        }

        Ok(())
    }

    async fn delete_automation_rule(&self, id: &str) -> ApiResult<()> {
        sqlx::query("DELETE FROM automation_rules WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn enable_automation_rule(&self, id: &str) -> ApiResult<()> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        sqlx::query("UPDATE automation_rules SET enabled = TRUE, updated_at = ? WHERE id = ?")
            .bind(&updated_at)
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn disable_automation_rule(&self, id: &str) -> ApiResult<()> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        sqlx::query("UPDATE automation_rules SET enabled = FALSE, updated_at = ? WHERE id = ?")
            .bind(&updated_at)
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn create_rule_evaluation_log(&self, log: &RuleEvaluationLog) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO rule_evaluation_logs (id, rule_id, rule_name, ticket_id, location, outcome, error_message, evaluation_time_ms, evaluated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&log.id)
        .bind(&log.rule_id)
        .bind(&log.rule_name)
        .bind(&log.ticket_id)
        .bind(log.location.to_string())
        .bind(log.outcome.to_string())
        .bind(&log.error_message)
        .bind(log.evaluation_time_ms)
        .bind(&log.evaluated_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn get_rule_evaluation_logs(
        &self,
        rule_id: Option<&str>,
        ticket_id: Option<&str>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> ApiResult<Vec<RuleEvaluationLog>> {
        let mut query = String::from(
            "SELECT id, rule_id, rule_name, ticket_id, location, outcome, error_message, evaluation_time_ms, evaluated_at
             FROM rule_evaluation_logs
             WHERE 1=1",
        );

        let mut params: Vec<String> = Vec::new();

        if let Some(rule_id) = rule_id {
            query.push_str(" AND rule_id = ?");
            params.push(rule_id.to_string());
        }

        if let Some(ticket_id) = ticket_id {
            query.push_str(" AND ticket_id = ?");
            params.push(ticket_id.to_string());
        }

        query.push_str(" ORDER BY evaluated_at DESC");

        if let Some(limit) = limit {
            query.push_str(" LIMIT ?");
            params.push(limit.to_string());
        }

        if let Some(offset) = offset {
            query.push_str(" OFFSET ?");
            params.push(offset.to_string());
        }

        let mut sql_query = sqlx::query(&query);
        for param in &params {
            sql_query = sql_query.bind(param);
        }

        let rows = sql_query.fetch_all(self.pool()).await?;

        let mut logs = Vec::new();
        for row in rows {
            let location_str: String = row.try_get("location")?;
            let location = location_str.parse::<TriggerLocation>().map_err(|e| {
                ApiError::Internal(format!("Failed to parse location '{}': {}", location_str, e))
            })?;

            let outcome_str: String = row.try_get("outcome")?;
            let outcome = outcome_str.parse::<ActionOutcome>().map_err(|e| {
                ApiError::Internal(format!("Failed to parse outcome '{}': {}", outcome_str, e))
            })?;

            logs.push(RuleEvaluationLog {
                id: row.try_get("id")?,
                rule_id: row.try_get("rule_id")?,
                rule_name: row.try_get("rule_name")?,
                ticket_id: row.try_get("ticket_id")?,
                location,
                outcome,
                error_message: row
                    .try_get::<Option<String>, _>("error_message")
                    .ok()
                    .flatten(),
                evaluation_time_ms: row.try_get("evaluation_time_ms")?,
                evaluated_at: row.try_get("evaluated_at")?,
            });
        }

        Ok(logs)
    }
}
