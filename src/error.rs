use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Message used when the server sends a `detail` that is not a plain string.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Fallback message for a rejected login whose body carries no usable detail.
pub const LOGIN_FAILED: &str = "Login failed";

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the dispatcher and, unchanged, by every endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be completed, or a success body could not be decoded.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("{detail}")]
    Remote { status: u16, detail: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            ApiError::Remote { status, .. } => Some(*status),
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Transport(_) => None,
            ApiError::Remote { detail, .. } => Some(detail),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Remote { status: 401, .. })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

/// Extract the human-readable message from a non-success response body.
///
/// A non-empty string `detail` wins. A `detail` of any other JSON type maps to
/// [`UNKNOWN_ERROR`]. Anything else (not JSON, not an object, no detail) maps
/// to `fallback`.
pub(crate) fn remote_detail(body: &[u8], fallback: impl FnOnce() -> String) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(Value::String(detail)),
        }) if !detail.is_empty() => detail,
        Ok(ErrorBody {
            detail: Some(Value::String(_)),
        })
        | Ok(ErrorBody { detail: None })
        | Err(_) => fallback(),
        Ok(ErrorBody { detail: Some(_) }) => UNKNOWN_ERROR.to_string(),
    }
}

pub(crate) fn http_status_fallback(status: u16) -> String {
    format!("HTTP error! status: {status}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_for(body: &str) -> String {
        remote_detail(body.as_bytes(), || http_status_fallback(400))
    }

    #[test]
    fn string_detail_is_used_verbatim() {
        assert_eq!(detail_for(r#"{"detail":"bad password"}"#), "bad password");
    }

    #[test]
    fn unparseable_body_uses_status_fallback() {
        assert_eq!(detail_for("<html>502</html>"), "HTTP error! status: 400");
        assert_eq!(detail_for(""), "HTTP error! status: 400");
    }

    #[test]
    fn missing_or_empty_detail_uses_fallback() {
        assert_eq!(detail_for(r#"{"error":"x"}"#), "HTTP error! status: 400");
        assert_eq!(detail_for(r#"{"detail":""}"#), "HTTP error! status: 400");
        assert_eq!(detail_for(r#"{"detail":null}"#), "HTTP error! status: 400");
        assert_eq!(detail_for(r#"["detail"]"#), "HTTP error! status: 400");
    }

    #[test]
    fn structured_detail_is_unknown_error() {
        let body = r#"{"detail":[{"loc":["body","wpm"],"msg":"field required"}]}"#;
        assert_eq!(detail_for(body), UNKNOWN_ERROR);
    }

    #[test]
    fn login_fallback_is_caller_supplied() {
        let detail = remote_detail(b"not json", || LOGIN_FAILED.to_string());
        assert_eq!(detail, "Login failed");
    }

    #[test]
    fn remote_error_displays_bare_detail() {
        let err = ApiError::Remote {
            status: 401,
            detail: "Incorrect username or password".into(),
        };
        assert_eq!(err.to_string(), "Incorrect username or password");
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
        assert_eq!(err.detail(), Some("Incorrect username or password"));
    }
}
