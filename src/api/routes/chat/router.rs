//! Router for the chat API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};

use super::public::{ChatReplyResponse, ChatRequest, ErrorResponse};
use crate::api::state::AppState;
use crate::chat::{RequestConfig, Transcript, build_request_messages};
use crate::openai::{CompletionError, completion};

type SharedState = Arc<RwLock<AppState>>;

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

fn server_error(error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error }),
    )
        .into_response()
}

/// Run one stateless chat turn. The client supplies the entire
/// history, already ending with the newest user message, and owns all
/// transcript updates; the server holds no per-client chat state.
///
/// The body is deserialized by hand so malformed JSON and a non-array
/// `history` are rejected with a 400 and an `error` field before any
/// network call is made.
async fn chat_handler(State(state): State<SharedState>, body: String) -> Response {
    let request: ChatRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(err) => return bad_request(format!("Invalid request body: {}", err)),
    };

    let (api_hostname, api_key, default_model, default_system_prompt) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.config.openai_api_hostname.clone(),
            shared_state.config.openai_api_key.clone(),
            shared_state.config.openai_model.clone(),
            shared_state.config.system_prompt.clone(),
        )
    };

    // Configuration error, reported before any network attempt
    let Some(api_key) = api_key else {
        return bad_request(CompletionError::MissingCredential.to_string());
    };

    let config = RequestConfig {
        model: request
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(default_model),
        system_prompt: request.system_prompt.unwrap_or(default_system_prompt),
        include_notes: request.include_notes.unwrap_or(true),
    };
    let transcript = Transcript::from_messages(request.history);
    let notes = request.notes.unwrap_or_default();
    let messages = build_request_messages(&config, &notes, &transcript);

    match completion(&messages, &api_hostname, &api_key, &config.model).await {
        Ok(reply) => Json(ChatReplyResponse { reply }).into_response(),
        Err(err) => {
            tracing::error!("Chat completion failed: {}", err);
            server_error(err.to_string())
        }
    }
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/chat", post(chat_handler))
}
