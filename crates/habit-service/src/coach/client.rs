//! LLM 聊天补全客户端
//!
//! OpenAI 兼容的 chat/completions 接口，默认指向 Groq。

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::error::{HabitError, Result};
use strive_shared::config::AiConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// LLM 客户端
pub struct CoachClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl CoachClient {
    /// 从配置构建客户端
    ///
    /// 未配置 api_key 或 HTTP 客户端构建失败时返回 None，
    /// 教练功能整体降级为 503。
    pub fn from_config(config: &AiConfig) -> Option<Self> {
        if config.api_key.is_empty() {
            return None;
        }

        let http = match reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build() {
            Ok(http) => http,
            Err(e) => {
                warn!(error = %e, "HTTP 客户端构建失败，教练功能停用");
                return None;
            }
        };

        Some(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// 发送一轮 system + user 对话，返回模型文本
    pub async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| HabitError::ExternalService(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("LLM 接口限流");
            return Err(HabitError::CoachBusy);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HabitError::ExternalService(format!(
                "upstream returned {status}: {body}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| HabitError::ExternalService(e.to_string()))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| "Let's keep striving! (AI didn't return text)".to_string());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> AiConfig {
        AiConfig {
            api_key: api_key.to_string(),
            base_url: "https://api.groq.com/openai/v1/".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }

    #[test]
    fn test_missing_api_key_disables_client() {
        assert!(CoachClient::from_config(&config("")).is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = CoachClient::from_config(&config("key")).unwrap();
        assert_eq!(client.base_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_completion_response_parsing() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": "Great week!"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Great week!")
        );
    }
}
