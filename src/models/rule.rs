use serde::{Deserialize, Serialize};

use crate::models::TicketStatus;

/// Automation rule configuration defining when and how to react to a new ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationRule {
    pub id: String,
    pub name: String,
    /// Free-text annotation for administrators; never evaluated
    pub reason: Option<String>,
    pub enabled: bool,
    pub trigger: RuleTrigger,
    pub action: RuleAction,
    pub created_at: String,
    pub updated_at: String,
}

/// Where the trigger keyword is looked for on the incoming ticket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerLocation {
    Title,
    Description,
    Message,
}

impl std::fmt::Display for TriggerLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerLocation::Title => write!(f, "title"),
            TriggerLocation::Description => write!(f, "description"),
            TriggerLocation::Message => write!(f, "message"),
        }
    }
}

impl std::str::FromStr for TriggerLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(TriggerLocation::Title),
            "description" => Ok(TriggerLocation::Description),
            "message" => Ok(TriggerLocation::Message),
            _ => Err(format!("Invalid trigger location: {}", s)),
        }
    }
}

/// Trigger condition for a rule
///
/// `keyword` may hold several comma-separated alternatives in a single
/// string; the matcher evaluates each segment independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleTrigger {
    pub keyword: String,
    pub location: TriggerLocation,
}

/// Action executed when a rule fires; exactly one variant per rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleAction {
    AiReply {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        faq_id: Option<String>,
    },
    StatusChange {
        status: TicketStatus,
    },
    AssignAgent {
        agent_id: String,
    },
}

impl RuleAction {
    /// Validate action parameters
    pub fn validate(&self) -> Result<(), String> {
        match self {
            RuleAction::AiReply { .. } => Ok(()),
            RuleAction::StatusChange { .. } => Ok(()),
            RuleAction::AssignAgent { agent_id } => {
                if agent_id.trim().is_empty() {
                    return Err("AssignAgent action requires a non-empty agent id".to_string());
                }
                Ok(())
            }
        }
    }
}

impl AutomationRule {
    pub fn new(name: String, trigger: RuleTrigger, action: RuleAction) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            reason: None,
            enabled: true,
            trigger,
            action,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Validate rule configuration before it is saved
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() || self.name.len() > 200 {
            return Err("Rule name must be 1-200 characters".to_string());
        }

        // A rule whose keyword has no non-empty segment can never match.
        let has_keyword = self
            .trigger
            .keyword
            .split(',')
            .map(str::trim)
            .any(|segment| !segment.is_empty());
        if !has_keyword {
            return Err("Trigger keyword must contain at least one non-empty segment".to_string());
        }

        self.action.validate()?;

        Ok(())
    }
}
