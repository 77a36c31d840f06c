//! Transport for OpenAI compatible chat completion APIs.
use std::time::Duration;

use serde_json::{Value, json};
use thiserror::Error;

use crate::chat::Message;

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Missing API credential. Set OPENAI_API_KEY in your environment.")]
    MissingCredential,

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected API response: {body}")]
    MalformedResponse { body: String },
}

/// Sends a chat completion request and returns the assistant's reply
/// with surrounding whitespace trimmed.
pub async fn completion(
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<String, CompletionError> {
    let payload = json!({
        "model": model,
        "messages": messages,
        "temperature": 0.5,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(COMPLETION_TIMEOUT)
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CompletionError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let decoded: Value = serde_json::from_str(&body)
        .map_err(|_| CompletionError::MalformedResponse { body: body.clone() })?;

    match decoded["choices"][0]["message"]["content"].as_str() {
        Some(content) => Ok(content.trim().to_string()),
        None => Err(CompletionError::MalformedResponse {
            body: decoded.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    #[tokio::test]
    async fn test_completion_extracts_trimmed_reply() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant", "content": "  Summary.  "}}]}"#,
            )
            .create_async()
            .await;

        let messages = vec![Message::new(Role::User, "Summarize this")];
        let reply = completion(&messages, &server.url(), "test-key", "gpt-4o-mini")
            .await
            .unwrap();
        assert_eq!(reply, "Summary.");
    }

    #[tokio::test]
    async fn test_completion_non_2xx_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let messages = vec![Message::new(Role::User, "hi")];
        let err = completion(&messages, &server.url(), "bad-key", "gpt-4o-mini")
            .await
            .unwrap_err();
        match err {
            CompletionError::Api { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "unauthorized");
            }
            other => panic!("Expected Api error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_completion_missing_choices_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let messages = vec![Message::new(Role::User, "hi")];
        let err = completion(&messages, &server.url(), "test-key", "gpt-4o-mini")
            .await
            .unwrap_err();
        match err {
            CompletionError::MalformedResponse { body } => {
                assert!(body.contains(r#""choices":[]"#));
            }
            other => panic!("Expected MalformedResponse, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_completion_non_json_body_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let messages = vec![Message::new(Role::User, "hi")];
        let err = completion(&messages, &server.url(), "test-key", "gpt-4o-mini")
            .await
            .unwrap_err();
        match err {
            CompletionError::MalformedResponse { body } => assert_eq!(body, "not json"),
            other => panic!("Expected MalformedResponse, got: {other:?}"),
        }
    }
}
