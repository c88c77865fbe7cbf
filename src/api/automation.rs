use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::middleware::{ApiError, ApiResult, AppState},
    models::{AutomationRule, RuleAction, RuleEvaluationLog, RuleTrigger},
};

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct CreateAutomationRuleRequest {
    pub name: String,
    pub reason: Option<String>,
    pub trigger: RuleTrigger,
    pub action: RuleAction,
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAutomationRuleRequest {
    pub name: Option<String>,
    pub reason: Option<String>,
    pub trigger: Option<RuleTrigger>,
    pub action: Option<RuleAction>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct RuleFilters {
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct LogFilters {
    pub rule_id: Option<String>,
    pub ticket_id: Option<String>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

// Response DTOs

#[derive(Debug, Serialize)]
pub struct RuleListResponse {
    pub rules: Vec<AutomationRule>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct LogListResponse {
    pub logs: Vec<RuleEvaluationLog>,
    pub total: usize,
}

// API Handlers

/// Create a new automation rule
pub async fn create_automation_rule(
    State(state): State<AppState>,
    Json(request): Json<CreateAutomationRuleRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut rule = AutomationRule::new(request.name, request.trigger, request.action);
    rule.reason = request.reason;
    if let Some(enabled) = request.enabled {
        rule.enabled = enabled;
    }

    rule.validate().map_err(ApiError::BadRequest)?;

    state
        .automation_service
        .create_automation_rule(&rule)
        .await
        .map_err(ApiError::Internal)?;

    Ok((StatusCode::CREATED, Json(rule)))
}

/// List automation rules in matching priority order
pub async fn list_automation_rules(
    State(state): State<AppState>,
    Query(filters): Query<RuleFilters>,
) -> ApiResult<impl IntoResponse> {
    let rules = state
        .automation_service
        .get_automation_rules(filters.enabled.unwrap_or(false))
        .await
        .map_err(ApiError::Internal)?;

    let total = rules.len();
    Ok(Json(RuleListResponse { rules, total }))
}

/// Get a single automation rule
pub async fn get_automation_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let rule = state
        .automation_service
        .get_automation_rule_by_id(&id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Automation rule not found".to_string()))?;

    Ok(Json(rule))
}

/// Update an automation rule; omitted fields keep their current value
pub async fn update_automation_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAutomationRuleRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut rule = state
        .automation_service
        .get_automation_rule_by_id(&id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Automation rule not found".to_string()))?;

    if let Some(name) = request.name {
        rule.name = name;
    }
    if let Some(reason) = request.reason {
        rule.reason = Some(reason);
    }
    if let Some(trigger) = request.trigger {
        rule.trigger = trigger;
    }
    if let Some(action) = request.action {
        rule.action = action;
    }
    if let Some(enabled) = request.enabled {
        rule.enabled = enabled;
    }
    rule.updated_at = chrono::Utc::now().to_rfc3339();

    rule.validate().map_err(ApiError::BadRequest)?;

    state
        .automation_service
        .update_automation_rule(&rule)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(rule))
}

/// Delete an automation rule
pub async fn delete_automation_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state
        .automation_service
        .delete_automation_rule(&id)
        .await
        .map_err(ApiError::Internal)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Enable an automation rule
pub async fn enable_automation_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state
        .automation_service
        .enable_automation_rule(&id)
        .await
        .map_err(ApiError::Internal)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Disable an automation rule
pub async fn disable_automation_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state
        .automation_service
        .disable_automation_rule(&id)
        .await
        .map_err(ApiError::Internal)?;

    Ok(StatusCode::NO_CONTENT)
}

/// List rule evaluation logs with optional filters
pub async fn list_rule_evaluation_logs(
    State(state): State<AppState>,
    Query(filters): Query<LogFilters>,
) -> ApiResult<impl IntoResponse> {
    let logs = state
        .automation_service
        .get_rule_evaluation_logs(
            filters.rule_id.as_deref(),
            filters.ticket_id.as_deref(),
            filters.limit,
            filters.offset,
        )
        .await
        .map_err(ApiError::Internal)?;

    let total = logs.len();
    Ok(Json(LogListResponse { logs, total }))
}
