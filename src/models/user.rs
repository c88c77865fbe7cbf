use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Agent,
    Contact,
    /// Non-human actors (the AI assistant account)
    System,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Agent => "agent",
            UserType::Contact => "contact",
            UserType::System => "system",
        }
    }
}

impl From<String> for UserType {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "agent" => UserType::Agent,
            "contact" => UserType::Contact,
            "system" => UserType::System,
            _ => UserType::Contact, // Default fallback
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User account (agents, ticket-opening contacts, and system actors)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub user_type: UserType,
    pub created_at: String, // ISO 8601 timestamp
}

impl User {
    pub fn new(email: String, display_name: String, user_type: UserType) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            email,
            display_name,
            user_type,
            created_at: now,
        }
    }
}
