use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{http_status_fallback, remote_detail, ApiError, ApiResult, LOGIN_FAILED};
use crate::session::SessionStore;

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Request payload.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// The login endpoint takes an OAuth2 password form; no other request is form-encoded.
    LoginForm { username: String, password: String },
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: RequestBody,
    /// Applied last, so these win over the default content type and the bearer token.
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post_json(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: RequestBody::Json(body),
            headers: HeaderMap::new(),
        }
    }

    pub fn login_form(username: &str, password: &str) -> Self {
        Self {
            method: Method::POST,
            body: RequestBody::LoginForm {
                username: username.to_string(),
                password: password.to_string(),
            },
            headers: HeaderMap::new(),
        }
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Performs HTTP calls against the configured base URL.
///
/// Knows nothing about individual endpoints; it only merges headers, injects
/// the bearer token from the session store and normalizes failures.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl Dispatcher {
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sakhatype/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn headers_for(&self, options: &RequestOptions) -> HeaderMap {
        let content_type = match options.body {
            RequestBody::LoginForm { .. } => FORM,
            _ => JSON,
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));

        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("stored token is not a valid header value; sending without it"),
            }
        }

        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        headers
    }

    pub async fn request<T>(&self, path: &str, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let headers = self.headers_for(&options);
        let is_login = matches!(options.body, RequestBody::LoginForm { .. });

        debug!(method = %options.method, path, "dispatching request");

        let mut builder = self.http.request(options.method, &url);
        builder = match options.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::LoginForm { username, password } => {
                builder.form(&[("username", username), ("password", password)])
            }
        };

        let response = builder.headers(headers).send().await?;
        let status = response.status();

        if !status.is_success() {
            let code = status.as_u16();
            let body = response.bytes().await.unwrap_or_default();
            let detail = remote_detail(&body, || {
                if is_login {
                    LOGIN_FAILED.to_string()
                } else {
                    http_status_fallback(code)
                }
            });
            debug!(status = code, path, %detail, "request rejected");
            return Err(ApiError::Remote {
                status: code,
                detail,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
