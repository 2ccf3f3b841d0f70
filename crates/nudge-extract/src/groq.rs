//! Groq completion provider — OpenAI-compatible chat completions with
//! function calling, `temperature 0` for deterministic extraction.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::provider::{CompletionProvider, FunctionSchema, ProviderError};

pub struct GroqProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GroqProvider {
    pub fn new(api_key: String, base_url: Option<String>, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.groq.com/openai".to_string()),
            model,
        }
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        schema: &FunctionSchema,
    ) -> Result<serde_json::Value, ProviderError> {
        let body = build_request_body(&self.model, system, user, schema);
        let url = format!("{}/v1/chat/completions", self.base_url);

        debug!(model = %self.model, "sending extraction request to Groq");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status == 429 {
            let retry = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|s| s * 1000) // convert seconds to ms
                .unwrap_or(5000);
            return Err(ProviderError::RateLimited {
                retry_after_ms: retry,
            });
        }

        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status, body = %text, "Groq API error");
            return Err(ProviderError::Api {
                status,
                message: text,
            });
        }

        let api_resp: ApiResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        parse_tool_arguments(api_resp)
    }
}

fn build_request_body(
    model: &str,
    system: &str,
    user: &str,
    schema: &FunctionSchema,
) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": [
            { "role": "system", "content": system },
            { "role": "user",   "content": user },
        ],
        "tools": [{
            "type": "function",
            "function": {
                "name": schema.name,
                "description": schema.description,
                "parameters": schema.parameters,
            },
        }],
        "tool_choice": "auto",
        "temperature": 0,
    })
}

/// Pull the first tool call out of the response and parse its arguments.
///
/// The arguments field is a JSON string per the OpenAI-compatible wire format.
fn parse_tool_arguments(resp: ApiResponse) -> Result<serde_json::Value, ProviderError> {
    let call = resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.tool_calls)
        .and_then(|calls| calls.into_iter().next())
        .ok_or_else(|| ProviderError::Parse("response contains no tool call".to_string()))?;

    serde_json::from_str(&call.function.arguments)
        .map_err(|e| ProviderError::Parse(format!("bad tool arguments JSON: {e}")))
}

// Groq API response types (private — deserialization only)

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    /// JSON-encoded arguments object.
    arguments: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_arguments(arguments: &str) -> ApiResponse {
        ApiResponse {
            choices: vec![Choice {
                message: ChatMessage {
                    tool_calls: Some(vec![ToolCall {
                        function: FunctionCall {
                            arguments: arguments.to_string(),
                        },
                    }]),
                },
            }],
        }
    }

    #[test]
    fn tool_arguments_are_decoded_from_nested_string() {
        let resp =
            response_with_arguments(r#"{"hour":10,"minute":20,"reminder_message":"Hello!"}"#);
        let value = parse_tool_arguments(resp).unwrap();
        assert_eq!(value["hour"], 10);
        assert_eq!(value["minute"], 20);
    }

    #[test]
    fn missing_tool_call_is_a_parse_error() {
        let resp = ApiResponse {
            choices: vec![Choice {
                message: ChatMessage { tool_calls: None },
            }],
        };
        assert!(matches!(
            parse_tool_arguments(resp),
            Err(ProviderError::Parse(_))
        ));
    }

    #[test]
    fn malformed_arguments_string_is_a_parse_error() {
        let resp = response_with_arguments("not json");
        assert!(matches!(
            parse_tool_arguments(resp),
            Err(ProviderError::Parse(_))
        ));
    }
}
