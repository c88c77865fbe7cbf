use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message type indicating direction of communication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Incoming, // From client to agent
    Outgoing, // From agent (or the automation engine) to client
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Incoming => "incoming",
            MessageType::Outgoing => "outgoing",
        }
    }
}

impl From<String> for MessageType {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "incoming" => MessageType::Incoming,
            "outgoing" => MessageType::Outgoing,
            _ => MessageType::Incoming, // Default fallback
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Message attached to a ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub ticket_id: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub content: String,
    pub author_id: String,
    /// Internal notes are visible to agents only, never to the client
    pub is_internal: bool,
    pub created_at: String, // ISO 8601 timestamp
}

impl Message {
    /// Create a new incoming message from a client
    pub fn new_incoming(ticket_id: String, content: String, author_id: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            ticket_id,
            message_type: MessageType::Incoming,
            content,
            author_id,
            is_internal: false,
            created_at: now,
        }
    }

    /// Create a new outgoing message addressed to the client
    pub fn new_outgoing(ticket_id: String, content: String, author_id: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            ticket_id,
            message_type: MessageType::Outgoing,
            content,
            author_id,
            is_internal: false,
            created_at: now,
        }
    }

    /// Validate message content
    pub fn validate_content(content: &str) -> Result<(), String> {
        let len = content.len();
        if len == 0 {
            return Err("Message content cannot be empty".to_string());
        }
        if len > 10_000 {
            return Err(format!(
                "Message content too long: {} characters (max 10,000)",
                len
            ));
        }
        Ok(())
    }
}
