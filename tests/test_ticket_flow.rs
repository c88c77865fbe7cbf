mod helpers;

use helpers::*;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use deskbot::api::middleware::AppState;
use deskbot::api::{build_router, tickets::TICKET_RECEIVED_MESSAGE};
use deskbot::database::AutomationRulesRepository;
use deskbot::models::{Message, RuleAction, Ticket, TriggerLocation};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app_with_generator(
    db: &deskbot::database::Database,
    generator: Arc<dyn deskbot::services::ResponseGenerator>,
) -> axum::Router {
    let state = AppState {
        db: db.clone(),
        automation_service: Arc::new(automation_service(db, generator)),
        ai_account_id: AI_ACCOUNT_ID.to_string(),
    };
    build_router(state)
}

async fn post_json(app: &axum::Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_ticket_creation_without_automation_posts_default_message() {
    let db = setup_test_db().await;
    let app = app_with_generator(&db, Arc::new(ScriptedGenerator::Fail)).await;

    let (status, body) = post_json(
        &app,
        "/api/tickets",
        json!({
            "title": "Mon imprimante ne fonctionne plus",
            "description": "Rien ne sort depuis ce matin",
            "contact_id": CONTACT_ID,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["automated"], json!(false));

    let ticket: Ticket = serde_json::from_value(body["ticket"].clone()).unwrap();
    let (messages, total) = db.list_messages(&ticket.id, 50, 0).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(messages[0].content, TICKET_RECEIVED_MESSAGE);
    assert_eq!(messages[0].author_id, AI_ACCOUNT_ID);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_ticket_creation_with_ai_reply_suppresses_default_message() {
    let db = setup_test_db().await;

    let rule = rule(
        "VPN replies",
        "connexion",
        TriggerLocation::Title,
        RuleAction::AiReply {
            prompt: None,
            faq_id: None,
        },
    );
    db.create_automation_rule(&rule).await.unwrap();

    let app = app_with_generator(
        &db,
        Arc::new(ScriptedGenerator::Reply(
            "Voici comment retablir la connexion.".to_string(),
        )),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/api/tickets",
        json!({
            "title": "Probleme de connexion VPN",
            "description": "Impossible de me connecter",
            "contact_id": CONTACT_ID,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["automated"], json!(true));

    let ticket: Ticket = serde_json::from_value(body["ticket"].clone()).unwrap();
    let (messages, total) = db.list_messages(&ticket.id, 50, 0).await.unwrap();

    // Exactly one outgoing message: the AI reply, not the acknowledgement
    assert_eq!(total, 1);
    assert_eq!(messages[0].content, "Voici comment retablir la connexion.");
    assert!(messages.iter().all(|m: &Message| m.content != TICKET_RECEIVED_MESSAGE));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_ticket_created_with_first_message_feeds_message_rules() {
    let db = setup_test_db().await;

    let rule = rule(
        "Urgent routing",
        "urgent",
        TriggerLocation::Message,
        RuleAction::AssignAgent {
            agent_id: AGENT_ID.to_string(),
        },
    );
    db.create_automation_rule(&rule).await.unwrap();

    let app = app_with_generator(&db, Arc::new(ScriptedGenerator::Fail)).await;

    let (status, body) = post_json(
        &app,
        "/api/tickets",
        json!({
            "title": "Serveur en panne",
            "description": "Production inaccessible",
            "contact_id": CONTACT_ID,
            "message": "C'est urgent, toute l'equipe est bloquee",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["automated"], json!(true));

    let ticket: Ticket = serde_json::from_value(body["ticket"].clone()).unwrap();
    let reloaded = db.get_ticket_by_id(&ticket.id).await.unwrap().unwrap();
    assert_eq!(reloaded.assigned_agent_id.as_deref(), Some(AGENT_ID));

    // The client's first message is stored; no default acknowledgement since
    // an automated action ran
    let (messages, total) = db.list_messages(&ticket.id, 50, 0).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(messages[0].author_id, CONTACT_ID);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_rule_crud_over_http() {
    let db = setup_test_db().await;
    let app = app_with_generator(&db, Arc::new(ScriptedGenerator::Fail)).await;

    let (status, body) = post_json(
        &app,
        "/api/automation/rules",
        json!({
            "name": "Billing",
            "trigger": { "keyword": "facturation", "location": "title" },
            "action": { "type": "status_change", "status": "pending" },
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let rule_id = body["id"].as_str().unwrap().to_string();

    let stored = db
        .get_automation_rule_by_id(&rule_id)
        .await
        .unwrap()
        .expect("Rule should be stored");
    assert_eq!(stored.name, "Billing");
    assert!(stored.enabled);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_rule_validation_rejected_over_http() {
    let db = setup_test_db().await;
    let app = app_with_generator(&db, Arc::new(ScriptedGenerator::Fail)).await;

    // Keyword with no non-empty segment can never match
    let (status, _) = post_json(
        &app,
        "/api/automation/rules",
        json!({
            "name": "Broken",
            "trigger": { "keyword": " , ", "location": "title" },
            "action": { "type": "ai_reply" },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/automation/rules",
        json!({
            "name": "Broken assignment",
            "trigger": { "keyword": "urgent", "location": "title" },
            "action": { "type": "assign_agent", "agent_id": "" },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    teardown_test_db(db).await;
}
