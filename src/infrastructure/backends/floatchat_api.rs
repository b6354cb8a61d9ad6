#[cfg(test)]
#[path = "floatchat_api_test.rs"]
mod tests;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatApiError;
use crate::domain::models::ChatBackend;
use crate::domain::models::SessionId;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatRequest {
    message: String,
    session_id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatResponse {
    response: String,
}

/// Client for the FloatChat inference backend's `POST /api/v1/chat`
/// endpoint.
pub struct FloatChatApi {
    url: String,
    client: reqwest::Client,
}

impl Default for FloatChatApi {
    fn default() -> FloatChatApi {
        return FloatChatApi::new(&Config::get(ConfigKey::ApiURL));
    }
}

impl FloatChatApi {
    pub fn new(url: &str) -> FloatChatApi {
        return FloatChatApi {
            url: url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        };
    }
}

#[async_trait]
impl ChatBackend for FloatChatApi {
    #[allow(clippy::implicit_return)]
    async fn send(&self, message: &str, session_id: &SessionId) -> Result<String, ChatApiError> {
        let req = ChatRequest {
            message: message.to_string(),
            session_id: session_id.as_str().to_string(),
        };

        let res = self
            .client
            .post(format!("{url}/api/v1/chat", url = self.url))
            .json(&req)
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "FloatChat API is not reachable");
                return Err(ChatApiError::Network(err.to_string()));
            }
        };

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make chat request to FloatChat API"
            );
            return Err(ChatApiError::Protocol {
                status: res.status().as_u16(),
            });
        }

        let body = res.json::<ChatResponse>().await.map_err(|err| {
            if err.is_decode() {
                return ChatApiError::MalformedResponse(err.to_string());
            }
            return ChatApiError::Network(err.to_string());
        })?;
        tracing::debug!(body = ?body, "Chat response");

        return Ok(body.response);
    }
}
