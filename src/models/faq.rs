use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// FAQ entry that an AI-reply rule may link for extra context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub created_at: String, // ISO 8601 timestamp
}

impl FaqEntry {
    pub fn new(question: String, answer: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            question,
            answer,
            created_at: now,
        }
    }
}

/// Request to create a FAQ entry
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaqEntryRequest {
    pub question: String,
    pub answer: String,
}
