pub mod automation_rules;

pub use automation_rules::AutomationRulesRepository;

use sqlx::{any::AnyPoolOptions, AnyPool, Row};
use crate::{
    api::middleware::error::{ApiError, ApiResult},
    models::*,
};

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = AnyPoolOptions::new()
            .max_connections(20)
            .min_connections(5)
            .connect(database_url)
            .await?;

        // Enable foreign keys for SQLite
        if database_url.starts_with("sqlite") {
            sqlx::query("PRAGMA foreign_keys = ON")
                .execute(&pool)
                .await?;
        }

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("migrations/sqlite")
            .run(&self.pool)
            .await?;
        Ok(())
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    // User operations

    pub async fn create_user(&self, user: &User) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO users (id, email, display_name, user_type, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.user_type.as_str())
        .bind(&user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_user_by_id(&self, id: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, display_name, user_type, created_at
             FROM users
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            Ok(Some(User {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                display_name: row.try_get("display_name")?,
                user_type: UserType::from(row.try_get::<String, _>("user_type")?),
                created_at: row.try_get("created_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    /// Look up an agent account; non-agent users come back as None
    pub async fn get_agent_by_id(&self, id: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, display_name, user_type, created_at
             FROM users
             WHERE id = ? AND user_type = 'agent'",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            Ok(Some(User {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                display_name: row.try_get("display_name")?,
                user_type: UserType::Agent,
                created_at: row.try_get("created_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    // Ticket operations

    pub async fn create_ticket(&self, ticket: &Ticket) -> ApiResult<()> {
        tracing::debug!(
            "Creating ticket id={} for contact_id={}",
            ticket.id,
            ticket.contact_id
        );

        sqlx::query(
            "INSERT INTO tickets (id, title, description, status, contact_id, assigned_agent_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&ticket.id)
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.status.as_str())
        .bind(&ticket.contact_id)
        .bind(&ticket.assigned_agent_id)
        .bind(&ticket.created_at)
        .bind(&ticket.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!("Ticket created: id={}, title={}", ticket.id, ticket.title);
        Ok(())
    }

    pub async fn get_ticket_by_id(&self, id: &str) -> ApiResult<Option<Ticket>> {
        let row = sqlx::query(
            "SELECT id, title, description, status, contact_id, assigned_agent_id, created_at, updated_at
             FROM tickets
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let status_str: String = row.try_get("status")?;
            Ok(Some(Ticket {
                id: row.try_get("id")?,
                title: row.try_get("title")?,
                description: row.try_get("description")?,
                status: TicketStatus::from(status_str),
                contact_id: row.try_get("contact_id")?,
                assigned_agent_id: row.try_get("assigned_agent_id").ok(),
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    pub async fn update_ticket_status(&self, ticket_id: &str, status: TicketStatus) -> ApiResult<()> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        let result = sqlx::query(
            "UPDATE tickets
             SET status = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(&now)
        .bind(ticket_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Ticket not found".to_string()));
        }

        tracing::info!("Ticket {} status set to '{}'", ticket_id, status);
        Ok(())
    }

    pub async fn assign_ticket_to_agent(&self, ticket_id: &str, agent_id: &str) -> ApiResult<()> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        let result = sqlx::query(
            "UPDATE tickets
             SET assigned_agent_id = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(agent_id)
        .bind(&now)
        .bind(ticket_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Ticket not found".to_string()));
        }

        tracing::info!("Ticket {} assigned to agent {}", ticket_id, agent_id);
        Ok(())
    }

    // Message operations

    pub async fn create_message(&self, message: &Message) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO messages (id, ticket_id, type, content, author_id, is_internal, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&message.id)
        .bind(&message.ticket_id)
        .bind(message.message_type.as_str())
        .bind(&message.content)
        .bind(&message.author_id)
        .bind(message.is_internal)
        .bind(&message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_messages(
        &self,
        ticket_id: &str,
        limit: i64,
        offset: i64,
    ) -> ApiResult<(Vec<Message>, i64)> {
        let count_row = sqlx::query("SELECT COUNT(*) as count FROM messages WHERE ticket_id = ?")
            .bind(ticket_id)
            .fetch_one(&self.pool)
            .await?;
        let total_count: i64 = count_row.try_get("count")?;

        let rows = sqlx::query(
            "SELECT id, ticket_id, type, content, author_id, CAST(is_internal AS INTEGER) as is_internal, created_at
             FROM messages
             WHERE ticket_id = ?
             ORDER BY created_at ASC
             LIMIT ? OFFSET ?",
        )
        .bind(ticket_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let mut messages = Vec::new();
        for row in rows {
            let message_type_str: String = row.try_get("type")?;
            // SQLite stores BOOLEAN as INTEGER
            let is_internal: i32 = row.try_get("is_internal")?;

            messages.push(Message {
                id: row.try_get("id")?,
                ticket_id: row.try_get("ticket_id")?,
                message_type: MessageType::from(message_type_str),
                content: row.try_get("content")?,
                author_id: row.try_get("author_id")?,
                is_internal: is_internal != 0,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok((messages, total_count))
    }

    pub async fn count_messages(&self, ticket_id: &str) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM messages WHERE ticket_id = ?")
            .bind(ticket_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("count")?)
    }

    // FAQ operations

    pub async fn create_faq_entry(&self, entry: &FaqEntry) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO faq_entries (id, question, answer, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.question)
        .bind(&entry.answer)
        .bind(&entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_faq_entry_by_id(&self, id: &str) -> ApiResult<Option<FaqEntry>> {
        let row = sqlx::query(
            "SELECT id, question, answer, created_at
             FROM faq_entries
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            Ok(Some(FaqEntry {
                id: row.try_get("id")?,
                question: row.try_get("question")?,
                answer: row.try_get("answer")?,
                created_at: row.try_get("created_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    pub async fn list_faq_entries(&self) -> ApiResult<Vec<FaqEntry>> {
        let rows = sqlx::query(
            "SELECT id, question, answer, created_at
             FROM faq_entries
             ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(FaqEntry {
                id: row.try_get("id")?,
                question: row.try_get("question")?,
                answer: row.try_get("answer")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(entries)
    }
}
