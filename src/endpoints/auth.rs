use serde_json::json;

use crate::dispatcher::{Dispatcher, RequestOptions};
use crate::error::ApiResult;
use crate::models::{TokenResponse, UserProfile};

/// Create an account and start a session for it.
pub async fn register(api: &Dispatcher, username: &str, password: &str) -> ApiResult<TokenResponse> {
    let options = RequestOptions::post_json(json!({
        "username": username,
        "password": password,
    }));
    let data: TokenResponse = api.request("/api/auth/register", options).await?;
    api.session().set_token(&data.access_token, &data.username);
    Ok(data)
}

/// Log in with the form-encoded password grant and start a session.
pub async fn login(api: &Dispatcher, username: &str, password: &str) -> ApiResult<TokenResponse> {
    let data: TokenResponse = api
        .request("/api/auth/login", RequestOptions::login_form(username, password))
        .await?;
    api.session().set_token(&data.access_token, &data.username);
    Ok(data)
}

/// The account behind the current token. The server rejects missing or stale tokens.
pub async fn get_current_user(api: &Dispatcher) -> ApiResult<UserProfile> {
    api.request("/api/users/me", RequestOptions::get()).await
}
