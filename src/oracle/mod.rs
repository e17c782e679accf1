//! 文本生成/评估模型客户端
//!
//! 评分核心通过 [`Oracle`] trait 调用外部大模型服务。进程持有单个长生命周期
//! 客户端实例，经构造注入传给评分核心，测试时可替换为脚本化的假实现。

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::{PromptArenaError, Result};

/// 一次模型调用的请求
///
/// system 为控制指令，user 为用户指令；json_response 要求模型返回
/// 结构化 JSON（评估调用使用）。
#[derive(Debug, Clone)]
pub struct OracleRequest {
    pub system: String,
    pub user: String,
    pub temperature: f64,
    pub json_response: bool,
}

/// 模型调用失败
///
/// 传输、认证、配额、响应格式异常统一折叠为一个原因字符串，
/// 核心不区分失败子类。
#[derive(Debug, Clone)]
pub struct OracleError {
    message: String,
}

impl OracleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for OracleError {}

/// 模型调用契约：给定指令对，返回生成文本或失败
///
/// 本层不做任何重试，重试属于更上层的关注点。
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn complete(&self, request: OracleRequest) -> std::result::Result<String, OracleError>;
}

/// OpenAI 兼容 chat-completions 客户端
pub struct OpenAiOracle {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiOracle {
    /// 从全局配置构造客户端
    ///
    /// API key 优先读取 OPENAI_API_KEY 环境变量，其次读取配置文件。
    pub fn from_config() -> Result<Self> {
        let config = AppConfig::get();

        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| {
                let key = config.oracle.api_key.trim();
                if key.is_empty() {
                    None
                } else {
                    Some(key.to_string())
                }
            })
            .ok_or_else(|| {
                PromptArenaError::oracle_config(
                    "Oracle API key not configured. Set OPENAI_API_KEY or oracle.api_key",
                )
            })?;

        Ok(Self::new(
            &config.oracle.api_base,
            &api_key,
            &config.oracle.model,
            Duration::from_secs(config.oracle.request_timeout),
        ))
    }

    pub fn new(api_base: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build oracle HTTP client");

        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn complete(&self, request: OracleRequest) -> std::result::Result<String, OracleError> {
        let mut request_body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": request.system
                },
                {
                    "role": "user",
                    "content": request.user
                }
            ],
            "temperature": request.temperature,
        });

        if request.json_response {
            request_body["response_format"] = serde_json::json!({ "type": "json_object" });
        }

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| OracleError::new(format!("Failed to call oracle API: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(OracleError::new(format!(
                "Oracle API request failed: {status} - {error_text}"
            )));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| OracleError::new(format!("Failed to parse oracle API response: {e}")))?;

        let content = response_json
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| OracleError::new("Invalid oracle API response format"))?;

        debug!("Oracle returned {} chars", content.len());

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

    fn oracle_for(server: &MockServer) -> OpenAiOracle {
        OpenAiOracle::new(
            &server.uri(),
            "test-key",
            "gpt-4o-mini",
            Duration::from_secs(5),
        )
    }

    fn execution_request() -> OracleRequest {
        OracleRequest {
            system: "Summarize this text in one sentence".to_string(),
            user: "Summarize: {text}".to_string(),
            temperature: 0.7,
            json_response: false,
        }
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        let mock_response = serde_json::json!({
            "choices": [{
                "message": {
                    "content": "A one sentence summary."
                }
            }]
        });

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/v1/chat/completions"))
            .and(matchers::header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
            .mount(&mock_server)
            .await;

        let oracle = oracle_for(&mock_server);
        let result = oracle.complete(execution_request()).await;

        assert_eq!(result.unwrap(), "A one sentence summary.");
    }

    #[tokio::test]
    async fn test_complete_api_error_includes_status() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"message": "rate limit exceeded"}
            })))
            .mount(&mock_server)
            .await;

        let oracle = oracle_for(&mock_server);
        let err = oracle.complete(execution_request()).await.unwrap_err();

        assert!(err.message().contains("Oracle API request failed"));
        assert!(err.message().contains("429"));
    }

    #[tokio::test]
    async fn test_complete_missing_content_field() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {}}]
            })))
            .mount(&mock_server)
            .await;

        let oracle = oracle_for(&mock_server);
        let err = oracle.complete(execution_request()).await.unwrap_err();

        assert!(err.message().contains("Invalid oracle API response format"));
    }
}
