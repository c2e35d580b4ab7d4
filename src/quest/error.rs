//! Request-level error taxonomy.
//!
//! | Kind        | Variants                                          | Status |
//! |-------------|---------------------------------------------------|--------|
//! | auth        | `PasswordRequired`, `PasswordWrong`               | 403    |
//! | validation  | `Validation`                                      | 400    |
//! | policy      | `NotInternetExplorer`, `Wrong*`                   | 403    |
//! | policy      | `NotRussian`                                      | 406    |
//! | routing     | `MethodNotAllowed`                                | 405    |
//! | invariant   | `Mask`                                            | 500    |
//!
//! Every message a client sees is fixed; nothing internal is echoed back.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::quest::schema::FieldErrors;
use crate::quest::transform::MaskError;

#[derive(Debug, Error)]
pub enum QuestError {
    #[error("X-Password header is required")]
    PasswordRequired,

    #[error("X-Password header is wrong")]
    PasswordWrong,

    #[error("Invalid request body.")]
    Validation(FieldErrors),

    #[error("Password for the next level is only available for the bravest! Internet Explorer 6 users!")]
    NotInternetExplorer,

    #[error("Я говорю только по русски, товарищ.")]
    NotRussian,

    #[error("Wrong secret.")]
    WrongRedirectSecret,

    #[error("Secret is wrong, human.")]
    WrongRobotsSecret,

    #[error("Wrong number.")]
    WrongNumber,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Internal Server Error")]
    Mask(#[from] MaskError),
}

impl QuestError {
    pub fn status(&self) -> StatusCode {
        match self {
            QuestError::PasswordRequired
            | QuestError::PasswordWrong
            | QuestError::NotInternetExplorer
            | QuestError::WrongRedirectSecret
            | QuestError::WrongRobotsSecret
            | QuestError::WrongNumber => StatusCode::FORBIDDEN,
            QuestError::Validation(_) => StatusCode::BAD_REQUEST,
            QuestError::NotRussian => StatusCode::NOT_ACCEPTABLE,
            QuestError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            QuestError::Mask(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldErrors> for QuestError {
    fn from(errors: FieldErrors) -> Self {
        QuestError::Validation(errors)
    }
}

impl IntoResponse for QuestError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            QuestError::Validation(errors) => {
                (status, Json(json!({ "errors": errors }))).into_response()
            }
            QuestError::Mask(ref source) => {
                tracing::error!(error = %source, "Mask secret does not fit the finish password");
                (status, self.to_string()).into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_plain_text_errors() {
        let response = QuestError::PasswordRequired.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_text(response).await, "X-Password header is required");

        let response = QuestError::NotRussian.into_response();
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(body_text(response).await, "Я говорю только по русски, товарищ.");
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let mut errors = FieldErrors::default();
        errors.add("number", "Not a valid integer.");

        let response = QuestError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(response).await,
            r#"{"errors":{"number":["Not a valid integer."]}}"#
        );
    }

    #[tokio::test]
    async fn test_mask_error_hides_details() {
        let error = QuestError::from(MaskError {
            password: 3,
            secret: 4,
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal Server Error");
    }
}
