use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{IdentityError, IdentityVerifier};
use crate::domain::UserId;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Validates ID tokens against an OAuth2 token-info endpoint and returns the
/// token subject as the user id.
pub struct TokenInfoVerifier {
    client: Client,
    endpoint: String,
    audience: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenInfo {
    pub sub: String,
    pub aud: Option<String>,
}

impl TokenInfoVerifier {
    pub fn new(endpoint: &str, audience: Option<String>) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            audience,
        })
    }

    pub fn check_audience(&self, info: &TokenInfo) -> Result<(), IdentityError> {
        match (&self.audience, &info.aud) {
            (None, _) => Ok(()),
            (Some(expected), Some(actual)) if expected == actual => Ok(()),
            _ => Err(IdentityError::InvalidToken),
        }
    }
}

#[async_trait]
impl IdentityVerifier for TokenInfoVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, IdentityError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("id_token", token)])
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        if response.status().is_server_error() {
            return Err(IdentityError::Unavailable(format!(
                "token info returned {}",
                response.status()
            )));
        }
        if !response.status().is_success() {
            return Err(IdentityError::InvalidToken);
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|_| IdentityError::InvalidToken)?;

        self.check_audience(&info)?;

        if info.sub.is_empty() {
            return Err(IdentityError::InvalidToken);
        }

        Ok(UserId::new(info.sub))
    }
}
