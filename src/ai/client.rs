//! Anthropic Messages API client with the web search server tool

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{AiConfig, ApiKey};
use crate::constants::{ANTHROPIC_VERSION, USER_AGENT, WEB_SEARCH_TOOL_NAME, WEB_SEARCH_TOOL_TYPE};

#[derive(Debug, Error)]
pub enum AiError {
    #[error("request to the model API failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
}

/// Client for single-turn searches against the Anthropic API
pub struct AnthropicClient {
    client: Client,
    api_key: ApiKey,
    api_url: String,
    model: String,
    max_tokens: u32,
    web_search_max_uses: Option<u32>,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    tools: Vec<Tool<'a>>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Tool<'a> {
    #[serde(rename = "type")]
    tool_type: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_uses: Option<u32>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<Usage>,
}

/// Response content block. Tool use and search result blocks are not needed
/// and collapse into `Other`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
    #[serde(default)]
    server_tool_use: Option<ServerToolUsage>,
}

#[derive(Debug, Deserialize)]
struct ServerToolUsage {
    #[serde(default)]
    web_search_requests: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

impl AnthropicClient {
    pub fn new(api_key: ApiKey, config: &AiConfig) -> Result<Self, AiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            web_search_max_uses: config.web_search_max_uses,
        })
    }

    /// Send `prompt` as a single user turn with web search enabled and
    /// return the first text block of the reply (empty if there is none).
    pub async fn search(&self, prompt: &str) -> Result<String, AiError> {
        let request = self.request(prompt);

        tracing::info!(model = %self.model, "Calling model API with web search");

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        let response: MessagesResponse = response.json().await?;

        if let Some(usage) = &response.usage {
            tracing::info!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                web_searches = usage
                    .server_tool_use
                    .as_ref()
                    .map_or(0, |u| u.web_search_requests),
                stop_reason = response.stop_reason.as_deref().unwrap_or("unknown"),
                "Model response received"
            );
        }

        Ok(first_text(response))
    }

    fn request<'a>(&'a self, prompt: &'a str) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            tools: vec![Tool {
                tool_type: WEB_SEARCH_TOOL_TYPE,
                name: WEB_SEARCH_TOOL_NAME,
                max_uses: self.web_search_max_uses,
            }],
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        }
    }
}

fn first_text(response: MessagesResponse) -> String {
    let stop_reason = response.stop_reason.clone();
    let text = response.content.into_iter().find_map(|block| match block {
        ContentBlock::Text { text } => Some(text),
        ContentBlock::Other => None,
    });

    text.unwrap_or_else(|| {
        tracing::warn!(
            stop_reason = stop_reason.as_deref().unwrap_or("unknown"),
            "Model response contained no text block"
        );
        String::new()
    })
}

fn api_error(status: StatusCode, body: &str) -> AiError {
    let message = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => format!("{}: {}", parsed.error.error_type, parsed.error.message),
        Err(_) => body.trim().to_string(),
    };
    AiError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(max_uses: Option<u32>) -> AnthropicClient {
        let config = AiConfig {
            web_search_max_uses: max_uses,
            ..AiConfig::default()
        };
        let key = ApiKey::from_lookup(|_| Some("sk-ant-test".to_string())).unwrap();
        AnthropicClient::new(key, &config).unwrap()
    }

    #[test]
    fn test_request_enables_web_search() {
        let client = test_client(None);
        let value = serde_json::to_value(client.request("hello")).unwrap();

        assert_eq!(value["model"], "claude-sonnet-4-6");
        assert_eq!(value["max_tokens"], 2048);
        assert_eq!(value["tools"][0]["type"], "web_search_20250305");
        assert_eq!(value["tools"][0]["name"], "web_search");
        assert!(value["tools"][0].get("max_uses").is_none());
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_request_forwards_max_uses() {
        let client = test_client(Some(4));
        let value = serde_json::to_value(client.request("hello")).unwrap();
        assert_eq!(value["tools"][0]["max_uses"], 4);
    }

    #[test]
    fn test_first_text_skips_tool_blocks() {
        let body = serde_json::json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [
                {"type": "text", "text": "I'll search for today's news."},
                {"type": "server_tool_use", "id": "srvtoolu_01", "name": "web_search",
                 "input": {"query": "AI news"}},
                {"type": "web_search_tool_result", "tool_use_id": "srvtoolu_01",
                 "content": [{"type": "web_search_result", "url": "https://example.com",
                              "title": "Example"}]},
                {"type": "text", "text": "1. A | B | https://example.com",
                 "citations": [{"type": "web_search_result_location",
                                "url": "https://example.com"}]}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 20,
                      "server_tool_use": {"web_search_requests": 1}}
        });

        let response: MessagesResponse = serde_json::from_value(body).unwrap();
        assert_eq!(
            response.usage.unwrap().server_tool_use.unwrap().web_search_requests,
            1
        );

        let response: MessagesResponse = serde_json::from_value(serde_json::json!({
            "content": [
                {"type": "server_tool_use", "id": "srvtoolu_01", "name": "web_search",
                 "input": {"query": "AI news"}},
                {"type": "text", "text": "1. A | B | https://example.com"},
                {"type": "text", "text": "second"}
            ]
        }))
        .unwrap();
        assert_eq!(first_text(response), "1. A | B | https://example.com");
    }

    #[test]
    fn test_no_text_block_yields_empty_digest() {
        let response: MessagesResponse = serde_json::from_value(serde_json::json!({
            "content": [
                {"type": "server_tool_use", "id": "srvtoolu_01", "name": "web_search",
                 "input": {"query": "AI news"}}
            ],
            "stop_reason": "max_tokens"
        }))
        .unwrap();

        assert_eq!(first_text(response), "");

        let response: MessagesResponse =
            serde_json::from_value(serde_json::json!({"content": []})).unwrap();
        assert_eq!(first_text(response), "");
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        let err = api_error(StatusCode::UNAUTHORIZED, body);
        assert_eq!(
            err.to_string(),
            "model API error (401 Unauthorized): authentication_error: invalid x-api-key"
        );

        let err = api_error(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err.to_string(), "model API error (502 Bad Gateway): upstream down");
    }
}
