//! OpenAI-compatible chat completions answer generator

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::generation::{AnswerGenerator, Prompt};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug)]
pub struct OpenAiAnswerGenerator<C: HttpClientTrait> {
    client: C,
    auth_header: Option<String>,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> OpenAiAnswerGenerator<C> {
    pub fn new(client: C, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, model, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = api_key
            .filter(|key| !key.is_empty())
            .map(|key| format!("Bearer {}", key));
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
            model: model.into(),
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if let Some(ref auth) = self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }
        headers
    }

    fn build_request(&self, prompt: &Prompt) -> serde_json::Value {
        let mut messages = Vec::with_capacity(2);

        if !prompt.system.is_empty() {
            messages.push(OpenAiMessage {
                role: "system".to_string(),
                content: Some(prompt.system.clone()),
            });
        }
        messages.push(OpenAiMessage {
            role: "user".to_string(),
            content: Some(prompt.user.clone()),
        });

        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        })
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<String, DomainError> {
        let response: OpenAiChatResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse chat response: {}", e))
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| DomainError::provider("openai", "Chat response contained no answer"))
    }
}

#[async_trait]
impl<C: HttpClientTrait> AnswerGenerator for OpenAiAnswerGenerator<C> {
    async fn generate(&self, prompt: &Prompt) -> Result<String, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(prompt);

        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn generator_name(&self) -> &'static str {
        "openai"
    }
}

// OpenAI API types for chat completions

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use crate::infrastructure::http_client::HttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/chat/completions";

    fn prompt() -> Prompt {
        Prompt {
            system: "You are helpful.".to_string(),
            user: "How heavy is it?".to_string(),
        }
    }

    fn chat_response(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_generate_returns_first_choice() {
        let client = MockHttpClient::new().with_response(TEST_URL, chat_response(" 3kg to 12kg. "));
        let generator = OpenAiAnswerGenerator::new(client, Some("key".into()), "gpt-4o-mini");

        let answer = generator.generate(&prompt()).await.unwrap();

        assert_eq!(answer, "3kg to 12kg.");
    }

    #[tokio::test]
    async fn test_request_contains_system_and_user_messages() {
        let client = MockHttpClient::new().with_response(TEST_URL, chat_response("ok"));
        let generator = OpenAiAnswerGenerator::new(client, None, "gpt-4o-mini");

        generator.generate(&prompt()).await.unwrap();

        let body = &generator.client.requests()[0].1;
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "How heavy is it?");
    }

    #[tokio::test]
    async fn test_empty_answer_is_error() {
        let client = MockHttpClient::new().with_response(TEST_URL, chat_response("   "));
        let generator = OpenAiAnswerGenerator::new(client, None, "gpt-4o-mini");

        assert!(generator.generate(&prompt()).await.is_err());
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let client = MockHttpClient::new().with_error(TEST_URL, "overloaded");
        let generator = OpenAiAnswerGenerator::new(client, None, "gpt-4o-mini");

        assert!(generator.generate(&prompt()).await.is_err());
    }

    #[tokio::test]
    async fn test_against_compatible_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("Move with meaning.")))
            .mount(&server)
            .await;

        let generator =
            OpenAiAnswerGenerator::with_base_url(HttpClient::new(), None, "llama3", server.uri());

        assert_eq!(generator.generate(&prompt()).await.unwrap(), "Move with meaning.");
    }
}
