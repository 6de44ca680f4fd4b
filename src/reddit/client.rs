//! reddit OAuth client for a "script" type app.

use super::{Comment, InboxMessage, Platform, PlatformError};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

pub const REDDIT_AUTH_BASE: &str = "https://www.reddit.com";
pub const REDDIT_API_BASE: &str = "https://oauth.reddit.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;
// Refresh the bearer token a little before reddit says it expires.
const TOKEN_EXPIRY_SLACK_SECS: i64 = 60;
const INBOX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

pub struct RedditClient {
    http: Client,
    credentials: RedditCredentials,
    auth_base: String,
    api_base: String,
    token: Mutex<Option<AccessToken>>,
}

#[derive(Deserialize)]
struct TokenBody {
    access_token: Option<String>,
    expires_in: Option<i64>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct Listing<T> {
    data: ListingData<T>,
}

#[derive(Deserialize)]
struct ListingData<T> {
    children: Vec<Thing<T>>,
}

#[derive(Deserialize)]
struct Thing<T> {
    data: T,
}

// The moderator listing is a `UserList` whose children are not wrapped in `{kind, data}`.
#[derive(Deserialize)]
struct ModeratorList {
    data: ModeratorChildren,
}

#[derive(Deserialize)]
struct ModeratorChildren {
    children: Vec<Moderator>,
}

#[derive(Deserialize)]
struct Moderator {
    name: String,
}

#[derive(Deserialize)]
struct ApiEnvelope {
    json: Option<ApiErrors>,
}

#[derive(Deserialize)]
struct ApiErrors {
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

impl RedditClient {
    pub fn new(credentials: RedditCredentials) -> Result<Self, PlatformError> {
        Self::with_endpoints(credentials, REDDIT_AUTH_BASE, REDDIT_API_BASE)
    }

    pub fn with_endpoints(
        credentials: RedditCredentials,
        auth_base: &str,
        api_base: &str,
    ) -> Result<Self, PlatformError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(crate::constants::USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            credentials,
            auth_base: auth_base.trim_end_matches('/').to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        })
    }

    /// Fetch a bearer token now. Called once at startup so bad credentials fail fast.
    #[instrument(level = "info", skip(self), fields(user = %self.credentials.username))]
    pub async fn login(&self) -> Result<(), PlatformError> {
        let token = self.request_token().await?;
        *self.token.lock().await = Some(token);
        info!(target = "reddit", "authenticated");
        Ok(())
    }

    async fn request_token(&self) -> Result<AccessToken, PlatformError> {
        let response = self
            .http
            .post(format!("{}/api/v1/access_token", self.auth_base))
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PlatformError::Auth(format!("token endpoint answered {}", response.status())));
        }
        let body: TokenBody = response.json().await?;
        match (body.access_token, body.error) {
            (Some(value), None) => Ok(AccessToken {
                value,
                expires_at: Utc::now()
                    + ChronoDuration::seconds(body.expires_in.unwrap_or(3600) - TOKEN_EXPIRY_SLACK_SECS),
            }),
            (_, Some(error)) => Err(PlatformError::Auth(error)),
            (None, None) => Err(PlatformError::Auth("no access token in response".into())),
        }
    }

    async fn bearer(&self) -> Result<String, PlatformError> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref()
            && token.expires_at > Utc::now()
        {
            return Ok(token.value.clone());
        }
        debug!(target = "reddit", "refreshing access token");
        let token = self.request_token().await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, PlatformError> {
        let bearer = self.bearer().await?;
        Ok(self
            .http
            .request(method, format!("{}{}", self.api_base, path))
            .bearer_auth(bearer))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, PlatformError> {
        let response = self.request(Method::GET, path).await?.query(query).send().await?;
        if !response.status().is_success() {
            return Err(PlatformError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<(), PlatformError> {
        let response = self.request(Method::POST, path).await?.form(form).send().await?;
        if !response.status().is_success() {
            return Err(PlatformError::Status(response.status()));
        }
        // `api_type=json` endpoints report validation problems in a 200 body.
        let text = response.text().await?;
        if let Ok(ApiEnvelope { json: Some(json) }) = serde_json::from_str::<ApiEnvelope>(&text)
            && !json.errors.is_empty()
        {
            return Err(PlatformError::Api(serde_json::Value::Array(json.errors).to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Platform for RedditClient {
    fn username(&self) -> &str {
        &self.credentials.username
    }

    async fn unread(&self) -> Result<Vec<InboxMessage>, PlatformError> {
        let limit = INBOX_PAGE_SIZE.to_string();
        let listing: Listing<InboxMessage> = self
            .get_json("/message/unread", &[("limit", limit.as_str()), ("raw_json", "1")])
            .await?;
        // reddit lists newest first.
        let mut messages: Vec<_> = listing.data.children.into_iter().map(|t| t.data).collect();
        messages.reverse();
        Ok(messages)
    }

    async fn mark_read(&self, message: &InboxMessage) -> Result<(), PlatformError> {
        self.post_form("/api/read_message", &[("id", message.name.as_str())])
            .await
    }

    async fn reply(&self, message: &InboxMessage, body: &str) -> Result<(), PlatformError> {
        self.post_form(
            "/api/comment",
            &[("api_type", "json"), ("thing_id", message.name.as_str()), ("text", body)],
        )
        .await
    }

    async fn send_message(&self, to: &str, subject: &str, body: &str) -> Result<(), PlatformError> {
        self.post_form(
            "/api/compose",
            &[("api_type", "json"), ("to", to), ("subject", subject), ("text", body)],
        )
        .await
    }

    async fn comment(&self, fullname: &str) -> Result<Option<Comment>, PlatformError> {
        let listing: Listing<Comment> = self
            .get_json("/api/info", &[("id", fullname), ("raw_json", "1")])
            .await?;
        Ok(listing.data.children.into_iter().next().map(|t| t.data))
    }

    async fn edit_comment(&self, fullname: &str, body: &str) -> Result<(), PlatformError> {
        self.post_form(
            "/api/editusertext",
            &[("api_type", "json"), ("thing_id", fullname), ("text", body)],
        )
        .await
    }

    async fn delete_comment(&self, fullname: &str) -> Result<(), PlatformError> {
        self.post_form("/api/del", &[("id", fullname)]).await
    }

    async fn is_moderator(&self, subreddit: &str, user: &str) -> Result<bool, PlatformError> {
        let path = format!("/r/{subreddit}/about/moderators");
        match self.get_json::<ModeratorList>(&path, &[]).await {
            Ok(list) => Ok(list
                .data
                .children
                .iter()
                .any(|m| m.name.eq_ignore_ascii_case(user))),
            // Private, banned or missing subreddits.
            Err(PlatformError::Status(
                StatusCode::FORBIDDEN | StatusCode::NOT_FOUND,
            )) => {
                warn!(target = "reddit", subreddit, "moderator list unavailable");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
