use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::session::SecureString;

use super::error::ApiError;
use super::types::{
    FriendRequestBody, ProfilePayload, ProfileTarget, SearchPayload, UserProfile, UserSummary,
};

/// Thin typed wrapper over the REST endpoints.
///
/// Every call takes the bearer token explicitly so the client itself holds
/// no session state.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| ApiError::InvalidRequest(format!("bad base url: {}", e)))?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            timeout_secs: u64::from(config.timeout_seconds),
        })
    }

    /// `GET /user/search?username=<query>`
    pub async fn search_users(
        &self,
        query: &str,
        token: Option<&SecureString>,
    ) -> Result<Vec<UserSummary>, ApiError> {
        let mut url = self.endpoint(&["user", "search"])?;
        url.query_pairs_mut().append_pair("username", query);

        let resp = self.send(self.client.get(url), token).await?;
        match self.read_json::<SearchPayload>(resp).await? {
            SearchPayload::Users(users) => Ok(users),
            SearchPayload::Failure { error } => Err(ApiError::Server {
                status: 200,
                message: error,
            }),
        }
    }

    /// `GET /user/profile` or `GET /user/profile/<username>`
    pub async fn get_profile(
        &self,
        target: &ProfileTarget,
        token: Option<&SecureString>,
    ) -> Result<UserProfile, ApiError> {
        let url = match target {
            ProfileTarget::Own => self.endpoint(&["user", "profile"])?,
            ProfileTarget::User(name) => self.endpoint(&["user", "profile", name.as_str()])?,
        };

        let resp = self.send(self.client.get(url), token).await?;
        let payload: ProfilePayload = self.read_json(resp).await?;
        if let Some(error) = payload.error {
            return Err(ApiError::Server {
                status: 200,
                message: error,
            });
        }
        Ok(payload.into())
    }

    /// `POST /request/send`
    pub async fn send_request(
        &self,
        username: &str,
        token: Option<&SecureString>,
    ) -> Result<(), ApiError> {
        self.friend_mutation("send", username, token).await
    }

    /// `POST /request/accept`
    pub async fn accept_request(
        &self,
        username: &str,
        token: Option<&SecureString>,
    ) -> Result<(), ApiError> {
        self.friend_mutation("accept", username, token).await
    }

    /// `POST /request/cancel`
    pub async fn cancel_request(
        &self,
        username: &str,
        token: Option<&SecureString>,
    ) -> Result<(), ApiError> {
        self.friend_mutation("cancel", username, token).await
    }

    async fn friend_mutation(
        &self,
        verb: &str,
        username: &str,
        token: Option<&SecureString>,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["request", verb])?;
        let builder = self.client.post(url).json(&FriendRequestBody { username });
        let resp = self.send(builder, token).await?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs))?;

        if !status.is_success() {
            return Err(match error_message(&bytes) {
                Some(message) => ApiError::Server {
                    status: status.as_u16(),
                    message,
                },
                None => status_error(status),
            });
        }
        // Some handlers answer 200 with `{"error": ...}`.
        if let Some(message) = error_field(&bytes) {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(&self, resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs))?;

        if !status.is_success() {
            return Err(match error_message(&bytes) {
                Some(message) => ApiError::Server {
                    status: status.as_u16(),
                    message,
                },
                None => status_error(status),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest("base url cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        token: Option<&SecureString>,
    ) -> Result<Response, ApiError> {
        let builder = match token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token.expose())),
            None => builder,
        };

        builder
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs))
    }
}

/// Pull a human-readable message out of `{"error": ...}` / `{"message": ...}`.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let field = value.get("error").or_else(|| value.get("message"))?;
    message_text(field)
}

/// Only `{"error": ...}`; a success body may legitimately carry `message`.
fn error_field(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    message_text(value.get("error")?)
}

fn message_text(field: &serde_json::Value) -> Option<String> {
    match field {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Object(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        _ => None,
    }
}

fn status_error(status: reqwest::StatusCode) -> ApiError {
    ApiError::Server {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}
