//! Reward payloads.

use std::borrow::Cow;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};

/// Header the header level hides the real password in.
pub const X_REAL_PASSWORD: &str = "x-real-password";

pub const FINISH_MESSAGE: &str =
    "You have completed the very last level of HTTP quest. Congratulations!";

/// `{"<key>": "<password>"}` with optional extra headers.
#[derive(Debug, Clone)]
pub struct PasswordResponse {
    key: Cow<'static, str>,
    password: String,
    headers: Vec<(HeaderName, String)>,
}

impl PasswordResponse {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            key: Cow::Borrowed("password"),
            password: password.into(),
            headers: Vec::new(),
        }
    }

    /// Use a different JSON key for the password.
    pub fn with_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

impl IntoResponse for PasswordResponse {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert(self.key.into_owned(), Value::String(self.password));

        let mut response = Json(Value::Object(body)).into_response();
        for (name, value) in self.headers {
            match HeaderValue::from_str(&value) {
                Ok(value) => {
                    response.headers_mut().insert(name, value);
                }
                Err(_) => {
                    tracing::error!(header = %name, "Password is not a valid header value");
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            }
        }
        response
    }
}

/// Plain-text message of the last level.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinishResponse;

impl IntoResponse for FinishResponse {
    fn into_response(self) -> Response {
        FINISH_MESSAGE.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_default_key() {
        let response = PasswordResponse::new("secret").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({"password": "secret"}));
    }

    #[tokio::test]
    async fn test_custom_key_and_header() {
        let response = PasswordResponse::new("qwerty")
            .with_key("пароль")
            .with_header(HeaderName::from_static(X_REAL_PASSWORD), "real")
            .into_response();

        assert_eq!(response.headers()["X-Real-Password"], "real");
        assert_eq!(json_body(response).await, serde_json::json!({"пароль": "qwerty"}));
    }
}
