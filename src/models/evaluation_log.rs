use serde::{Deserialize, Serialize};

use crate::models::TriggerLocation;

/// Outcome of the action executed for a fired rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    /// AI-generated reply was posted
    ReplyPosted,
    /// Generation failed or came back empty; the canned reply was posted
    ReplyFallback,
    StatusChanged,
    AgentAssigned,
    /// Action execution failed; see error_message
    Failed,
}

impl std::fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionOutcome::ReplyPosted => write!(f, "reply_posted"),
            ActionOutcome::ReplyFallback => write!(f, "reply_fallback"),
            ActionOutcome::StatusChanged => write!(f, "status_changed"),
            ActionOutcome::AgentAssigned => write!(f, "agent_assigned"),
            ActionOutcome::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for ActionOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reply_posted" => Ok(ActionOutcome::ReplyPosted),
            "reply_fallback" => Ok(ActionOutcome::ReplyFallback),
            "status_changed" => Ok(ActionOutcome::StatusChanged),
            "agent_assigned" => Ok(ActionOutcome::AgentAssigned),
            "failed" => Ok(ActionOutcome::Failed),
            _ => Err(format!("Invalid action outcome: {}", s)),
        }
    }
}

/// Audit record written for every automation run that fired a rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEvaluationLog {
    pub id: String,
    pub rule_id: String,
    pub rule_name: String,
    pub ticket_id: String,
    /// Ticket field the trigger matched against
    pub location: TriggerLocation,
    pub outcome: ActionOutcome,
    pub error_message: Option<String>,
    pub evaluation_time_ms: i64,
    pub evaluated_at: String,
}
