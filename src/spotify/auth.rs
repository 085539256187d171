use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, StatusCode, header::AUTHORIZATION};

use crate::{
    Res,
    config::Credentials,
    error::Error,
    types::{AuthErrorResponse, Token, TokenResponse},
};

/// Requests an access token with the OAuth 2.0 client credentials grant.
///
/// The client id and secret are sent as HTTP Basic credentials, the body only
/// carries `grant_type=client_credentials`. The resulting token grants access
/// to the public catalog (search, artists, albums, tracks, audio features) but
/// to no user data, which is all the collector needs.
///
/// # Arguments
///
/// * `client` - shared HTTP client
/// * `token_url` - token endpoint, e.g. `https://accounts.spotify.com/api/token`
/// * `credentials` - client id and secret of a registered application
///
/// # Errors
///
/// Every failure of the token endpoint is reported as [`Error::Auth`]: without
/// a token no other request can succeed. Network failures are [`Error::Http`].
pub async fn request_token(client: &Client, token_url: &str, credentials: &Credentials) -> Res<Token> {
    let res = client
        .post(token_url)
        .header(AUTHORIZATION, basic_auth_header(credentials))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(Error::Auth(auth_failure_reason(status, &body)));
    }

    let json: TokenResponse = serde_json::from_str(&body)?;

    Ok(Token {
        access_token: json.access_token,
        token_type: json.token_type,
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Value of the `Authorization` header for the token request.
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(pair))
}

fn auth_failure_reason(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<AuthErrorResponse>(body) {
        Ok(err) => match err.error_description {
            Some(description) => format!("{} ({})", description, err.error),
            None => err.error,
        },
        Err(_) => format!("token endpoint answered {}", status),
    }
}
