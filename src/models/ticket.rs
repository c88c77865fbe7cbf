use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Pending,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Pending => "pending",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }
}

impl From<String> for TicketStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "open" => TicketStatus::Open,
            "pending" => TicketStatus::Pending,
            "resolved" => TicketStatus::Resolved,
            "closed" => TicketStatus::Closed,
            _ => TicketStatus::Open, // Default fallback
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ticket entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub contact_id: String,
    pub assigned_agent_id: Option<String>,
    pub created_at: String, // ISO 8601 timestamp
    pub updated_at: String, // ISO 8601 timestamp
}

impl Ticket {
    pub fn new(title: String, description: String, contact_id: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            status: TicketStatus::Open,
            contact_id,
            assigned_agent_id: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Read-only projection of a newly created ticket handed to the automation
/// engine; carries the first message when the ticket was opened with one.
#[derive(Debug, Clone)]
pub struct TicketEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub message: Option<String>,
}

impl TicketEvent {
    pub fn from_ticket(ticket: &Ticket, message: Option<String>) -> Self {
        Self {
            id: ticket.id.clone(),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            message,
        }
    }
}

/// Request to open a ticket
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
    pub contact_id: String,
    /// Optional first message posted together with the ticket
    #[serde(default)]
    pub message: Option<String>,
}
