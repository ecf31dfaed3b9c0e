use std::env;

pub const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Clone, Debug)]
pub struct AppConfig {
    // The only required setting. The proxy refuses to call upstream
    // without it but the server still starts.
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_url: String,
    pub anthropic_version: String,
    pub static_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let anthropic_api_key = env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let anthropic_api_url = env::var("KINETIC_ANTHROPIC_API_URL")
            .unwrap_or_else(|_| DEFAULT_ANTHROPIC_API_URL.to_string());
        let static_dir = env::var("KINETIC_STATIC_DIR").unwrap_or_else(|_| "./public".to_string());

        Self {
            anthropic_api_key,
            anthropic_api_url,
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            static_dir,
        }
    }
}
