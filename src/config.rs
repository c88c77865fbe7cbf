use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// System account credited as author of automated messages
    pub ai_account_id: String,
    /// Ollama-compatible generation endpoint
    pub ai_gateway_url: String,
    pub ai_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://deskbot.db?mode=rwc".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let ai_account_id =
            env::var("AI_ACCOUNT_ID").unwrap_or_else(|_| "ai-assistant".to_string());

        let ai_gateway_url = env::var("AI_GATEWAY_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:11434/api/generate".to_string());

        let ai_model = env::var("AI_MODEL").unwrap_or_else(|_| "llama3.2".to_string());

        Ok(Config {
            database_url,
            server_host,
            server_port,
            ai_account_id,
            ai_gateway_url,
            ai_model,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
}
