//! OAuth2 access tokens for a Google service account (JWT-bearer grant).

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::ProviderError;
use crate::config::FcmConfig;

pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens this close to expiry are refreshed before use.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Mints and caches access tokens; concurrent callers share one refresh.
pub struct ServiceAccountTokenSource {
    client: Client,
    client_email: String,
    private_key_id: String,
    token_uri: String,
    encoding_key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    pub fn new(client: Client, config: &FcmConfig) -> Result<Self, ProviderError> {
        if config.client_email.is_empty() {
            return Err(ProviderError::Configuration(
                "FIREBASE_CLIENT_EMAIL is not configured".to_string(),
            ));
        }

        let encoding_key = EncodingKey::from_rsa_pem(config.private_key.expose_secret().as_bytes())
            .map_err(|e| {
                ProviderError::Configuration(format!("Failed to parse FIREBASE_PRIVATE_KEY: {}", e))
            })?;

        Ok(Self {
            client,
            client_email: config.client_email.clone(),
            private_key_id: config.private_key_id.clone(),
            token_uri: config.token_uri.clone(),
            encoding_key,
            cached: Mutex::new(None),
        })
    }

    /// Signed RS256 assertion exchanged at the token endpoint.
    pub fn sign_assertion(&self) -> Result<String, ProviderError> {
        let now = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: FCM_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        if !self.private_key_id.is_empty() {
            header.kid = Some(self.private_key_id.clone());
        }

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ProviderError::Authentication(format!("Failed to sign assertion: {}", e)))
    }

    pub async fn access_token(&self) -> Result<String, ProviderError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() + EXPIRY_MARGIN {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn fetch_token(&self) -> Result<CachedToken, ProviderError> {
        let assertion = self.sign_assertion()?;

        let response = self
            .client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                ProviderError::Connection(format!("Failed to reach token endpoint: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Authentication(format!(
                "Token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ProviderError::Authentication(format!("Failed to parse token response: {}", e))
        })?;

        tracing::debug!(expires_in = token.expires_in, "Obtained FCM access token");

        Ok(CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}
