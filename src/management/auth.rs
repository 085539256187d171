use chrono::Utc;
use reqwest::Client;

use crate::{Res, config::Credentials, spotify, types::Token};

/// Seconds before expiry at which a token is already treated as expired.
pub const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    http: Client,
    token_url: String,
    credentials: Credentials,
    token: Option<Token>,
}

impl TokenManager {
    pub fn new(http: Client, token_url: String, credentials: Credentials) -> Self {
        TokenManager {
            http,
            token_url,
            credentials,
            token: None,
        }
    }

    /// Returns an access token, requesting a new one when there is none yet
    /// or the current one is about to expire.
    pub async fn get_valid_token(&mut self) -> Res<String> {
        let now = Utc::now().timestamp() as u64;
        if let Some(token) = &self.token {
            if !is_expired(token, now) {
                return Ok(token.access_token.clone());
            }
        }

        let token =
            spotify::auth::request_token(&self.http, &self.token_url, &self.credentials).await?;
        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    /// Drops the current token so the next call requests a fresh one.
    pub fn invalidate(&mut self) {
        self.token = None;
    }
}

pub fn is_expired(token: &Token, now: u64) -> bool {
    now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
}
