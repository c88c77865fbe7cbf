pub mod test_db;

pub use test_db::*;

use async_trait::async_trait;
use std::sync::Arc;

use deskbot::database::Database;
use deskbot::models::{AutomationRule, RuleAction, RuleTrigger, Ticket, TriggerLocation};
use deskbot::services::{
    ActionExecutor, AutomationService, GenerationError, ResponseGenerator,
};

/// Account ids seeded by the test database
pub const AI_ACCOUNT_ID: &str = "ai-assistant";
pub const CONTACT_ID: &str = "contact-001";
pub const AGENT_ID: &str = "agent-001";

/// Scripted stand-in for the text-generation collaborator
pub enum ScriptedGenerator {
    Reply(String),
    Empty,
    Fail,
}

#[async_trait]
impl ResponseGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        match self {
            ScriptedGenerator::Reply(text) => Ok(text.clone()),
            ScriptedGenerator::Empty => Ok(String::new()),
            ScriptedGenerator::Fail => Err(GenerationError::Status(500)),
        }
    }
}

/// Generator that records every prompt it receives
pub struct RecordingGenerator {
    pub prompts: std::sync::Mutex<Vec<String>>,
    pub reply: String,
}

impl RecordingGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            prompts: std::sync::Mutex::new(Vec::new()),
            reply: reply.to_string(),
        }
    }
}

#[async_trait]
impl ResponseGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Build an automation service wired to the given generator
pub fn automation_service(db: &Database, generator: Arc<dyn ResponseGenerator>) -> AutomationService {
    let executor = ActionExecutor::new(db.clone(), generator, AI_ACCOUNT_ID.to_string());
    AutomationService::new(db.clone(), executor)
}

/// Insert an open ticket for the seeded test contact
pub async fn create_open_ticket(db: &Database, title: &str, description: &str) -> Ticket {
    let ticket = Ticket::new(
        title.to_string(),
        description.to_string(),
        CONTACT_ID.to_string(),
    );
    db.create_ticket(&ticket).await.expect("Failed to create ticket");
    ticket
}

/// Build a rule; persisting it is up to the test
pub fn rule(
    name: &str,
    keyword: &str,
    location: TriggerLocation,
    action: RuleAction,
) -> AutomationRule {
    AutomationRule::new(
        name.to_string(),
        RuleTrigger {
            keyword: keyword.to_string(),
            location,
        },
        action,
    )
}
