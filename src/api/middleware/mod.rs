pub mod error;

pub use error::*;

use std::sync::Arc;

use crate::database::Database;
use crate::services::AutomationService;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub automation_service: Arc<AutomationService>,
    /// System account credited as author of automated messages
    pub ai_account_id: String,
}
