pub mod automation;
pub mod faq_entries;
pub mod middleware;
pub mod tickets;

pub use middleware::*;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub async fn health() -> &'static str {
    "ok"
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tickets", post(tickets::create_ticket))
        .route("/api/tickets/:id", get(tickets::get_ticket))
        .route(
            "/api/tickets/:id/messages",
            get(tickets::list_ticket_messages),
        )
        .route(
            "/api/automation/rules",
            post(automation::create_automation_rule).get(automation::list_automation_rules),
        )
        .route(
            "/api/automation/rules/:id",
            put(automation::update_automation_rule)
                .get(automation::get_automation_rule)
                .delete(automation::delete_automation_rule),
        )
        .route(
            "/api/automation/rules/:id/enable",
            post(automation::enable_automation_rule),
        )
        .route(
            "/api/automation/rules/:id/disable",
            post(automation::disable_automation_rule),
        )
        .route(
            "/api/automation/logs",
            get(automation::list_rule_evaluation_logs),
        )
        .route(
            "/api/faq",
            post(faq_entries::create_faq_entry).get(faq_entries::list_faq_entries),
        )
        .route("/api/faq/:id", get(faq_entries::get_faq_entry))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
