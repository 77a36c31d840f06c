use std::env;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a concise assistant helping write, summarize, and improve meeting notes.";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    // Missing credential is a per-request configuration error, not a
    // startup failure, so this stays optional.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub system_prompt: String,
    pub web_ui_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let openai_api_hostname = env::var("NOTECHAT_LLM_HOST")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key = env::var("OPENAI_API_KEY").ok();
        let openai_model =
            env::var("NOTECHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let system_prompt = env::var("NOTECHAT_SYSTEM_PROMPT")
            .unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string());
        let web_ui_path =
            env::var("NOTECHAT_WEB_UI_PATH").unwrap_or_else(|_| "./web-ui".to_string());

        Self {
            openai_api_hostname,
            openai_api_key,
            openai_model,
            system_prompt,
            web_ui_path,
        }
    }
}
