use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::middleware::{ApiError, ApiResult, AppState},
    models::{CreateTicketRequest, Message, Ticket, TicketEvent},
};

/// Default acknowledgement posted when no automation rule fired
pub const TICKET_RECEIVED_MESSAGE: &str =
    "We have received your ticket. An agent will get back to you shortly.";

#[derive(Debug, Serialize)]
pub struct CreateTicketResponse {
    pub ticket: Ticket,
    /// True when an automation rule handled the new ticket
    pub automated: bool,
}

#[derive(Debug, Deserialize)]
pub struct MessagePagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<Message>,
    pub total: i64,
}

/// Open a ticket and run the automation engine over it.
///
/// The automation result decides whether the default ticket-received
/// message is posted: when a rule already replied (or otherwise acted), the
/// default acknowledgement is suppressed.
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<CreateTicketRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Ticket title cannot be empty".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Ticket description cannot be empty".to_string(),
        ));
    }
    if let Some(content) = &request.message {
        Message::validate_content(content).map_err(ApiError::BadRequest)?;
    }

    state
        .db
        .get_user_by_id(&request.contact_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Contact not found".to_string()))?;

    let ticket = Ticket::new(request.title, request.description, request.contact_id);
    state.db.create_ticket(&ticket).await?;

    if let Some(content) = &request.message {
        let message = Message::new_incoming(
            ticket.id.clone(),
            content.clone(),
            ticket.contact_id.clone(),
        );
        state.db.create_message(&message).await?;
    }

    let event = TicketEvent::from_ticket(&ticket, request.message);
    let automated = state
        .automation_service
        .handle_ticket_created(&event)
        .await
        .map_err(ApiError::Internal)?;

    if !automated {
        let acknowledgement = Message::new_outgoing(
            ticket.id.clone(),
            TICKET_RECEIVED_MESSAGE.to_string(),
            state.ai_account_id.clone(),
        );
        state.db.create_message(&acknowledgement).await?;
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateTicketResponse { ticket, automated }),
    ))
}

/// Get a ticket by id
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let ticket = state
        .db
        .get_ticket_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;

    Ok(Json(ticket))
}

/// List the messages of a ticket, oldest first
pub async fn list_ticket_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pagination): Query<MessagePagination>,
) -> ApiResult<impl IntoResponse> {
    state
        .db
        .get_ticket_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;

    let limit = pagination.limit.unwrap_or(50).clamp(1, 200);
    let offset = pagination.offset.unwrap_or(0).max(0);

    let (messages, total) = state.db.list_messages(&id, limit, offset).await?;

    Ok(Json(MessageListResponse { messages, total }))
}
