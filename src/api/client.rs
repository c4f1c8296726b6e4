use std::time::Duration;

use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response};

use crate::api::error::RequestError;
use crate::api::types::{BulletPointsResponse, SummaryResponse, TextRequest, TokenResponse};

/// Cookie the server issues at login and expects back on protected calls.
const TOKEN_COOKIE: &str = "token";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Typed wrapper around the summarization backend.
///
/// Every operation is a single stateless round trip: no retries, no
/// caching, no ordering between calls. Concurrent calls from the same
/// client are unrelated requests.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl SummaryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build reqwest client");

        Self {
            http,
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a session token to all subsequent protected calls.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Condense `text` into a short summary. The caller is expected to
    /// reject blank input before getting here.
    pub async fn generate_summary(&self, text: &str) -> Result<SummaryResponse, RequestError> {
        let request = TextRequest {
            text: text.to_string(),
        };

        let response = self
            .authorized(self.http.post(self.endpoint("/generate-summary/")))
            .json(&request)
            .send()
            .await?;

        let response = Self::check_status(response)?;
        Ok(response.json().await?)
    }

    /// Extract the key points of `text` as an ordered list. Same contract
    /// as [`generate_summary`](Self::generate_summary); an empty list is a
    /// valid outcome.
    pub async fn generate_bullet_points(
        &self,
        text: &str,
    ) -> Result<BulletPointsResponse, RequestError> {
        let request = TextRequest {
            text: text.to_string(),
        };

        let response = self
            .authorized(self.http.post(self.endpoint("/generate-bullet-points/")))
            .json(&request)
            .send()
            .await?;

        let response = Self::check_status(response)?;
        Ok(response.json().await?)
    }

    /// Invalidate the session on the server. Discarding the locally stored
    /// credential afterwards is the caller's responsibility.
    pub async fn logout(&self) -> Result<(), RequestError> {
        let response = self
            .authorized(self.http.post(self.endpoint("/logout")))
            .send()
            .await?;

        Self::check_status(response)?;
        Ok(())
    }

    /// Exchange username and password for a session token. The server
    /// answers with a `Set-Cookie: token=...` header rather than a JSON
    /// body, so the credential is lifted out of the cookie.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, RequestError> {
        let form = [("username", username), ("password", password)];

        let response = self
            .http
            .post(self.endpoint("/token"))
            .form(&form)
            .send()
            .await?;

        let response = Self::check_status(response)?;
        let access_token = extract_token_cookie(&response)
            .ok_or_else(|| RequestError::malformed("login response carried no token cookie"))?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(COOKIE, format!("{TOKEN_COOKIE}={token}")),
            None => request,
        }
    }

    fn check_status(response: Response) -> Result<Response, RequestError> {
        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::status(status));
        }
        Ok(response)
    }
}

fn extract_token_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let (name, rest) = cookie.split_once('=')?;
            if name.trim() != TOKEN_COOKIE {
                return None;
            }
            let value = rest.split(';').next()?.trim();
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = SummaryClient::new("http://localhost:8000/");
        assert_eq!(
            client.endpoint("/logout"),
            "http://localhost:8000/logout".to_string()
        );
    }
}
