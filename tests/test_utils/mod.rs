//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::Router;
use axum::body::Body;

use notechat::api::AppState;
use notechat::api::app;
use notechat::core::AppConfig;

/// Creates a test application router pointed at the given completion
/// API hostname (usually a mockito server) with an optional API key.
pub fn test_app(api_hostname: &str, api_key: Option<&str>) -> Router {
    let app_config = AppConfig {
        openai_api_hostname: api_hostname.to_string(),
        openai_api_key: api_key.map(String::from),
        openai_model: String::from("gpt-4o-mini"),
        system_prompt: String::from(
            "You are a concise assistant helping write, summarize, and improve meeting notes.",
        ),
        web_ui_path: String::from("./web-ui"),
    };
    let app_state = AppState::new(app_config);
    app(Arc::new(RwLock::new(app_state)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
