//! Level handlers.
//!
//! Each handler runs behind the level's password gate and hands out the
//! password of the next level, or explains why it won't.

use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{header, HeaderMap, HeaderName},
    response::{IntoResponse, Redirect, Response},
};
use url::form_urlencoded;

use crate::http::server::AppState;
use crate::quest::response::X_REAL_PASSWORD;
use crate::quest::transform;
use crate::quest::{
    ChainStep, FinishResponse, Level, NumberPayload, PasswordResponse, QuestError,
    SecretPayload, DECOY_PASSWORD, SECRET_NUMBER,
};

/// Query parameter carrying the redirect chain token.
pub const SECRET_PARAM: &str = "secret";

pub async fn plain(State(state): State<AppState>) -> PasswordResponse {
    PasswordResponse::new(state.vault.password(Level::Reverse))
}

pub async fn reverse(State(state): State<AppState>) -> PasswordResponse {
    PasswordResponse::new(transform::reverse(state.vault.password(Level::Base64)))
        .with_key(transform::reverse("password"))
}

pub async fn base64(State(state): State<AppState>) -> PasswordResponse {
    PasswordResponse::new(transform::base64_encode(state.vault.password(Level::Header)))
}

/// Decoy in the body, the real password in `X-Real-Password`.
pub async fn header(State(state): State<AppState>) -> PasswordResponse {
    PasswordResponse::new(DECOY_PASSWORD).with_header(
        HeaderName::from_static(X_REAL_PASSWORD),
        state.vault.password(Level::Delete),
    )
}

/// Routed for DELETE only.
pub async fn delete(State(state): State<AppState>) -> PasswordResponse {
    PasswordResponse::new(state.vault.password(Level::UserAgent))
}

pub async fn user_agent(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<PasswordResponse, QuestError> {
    if !lowercase_header(&headers, header::USER_AGENT).contains("msie 6.0") {
        return Err(QuestError::NotInternetExplorer);
    }

    Ok(PasswordResponse::new(state.vault.password(Level::AcceptLanguage)))
}

pub async fn accept_language(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<PasswordResponse, QuestError> {
    if !lowercase_header(&headers, header::ACCEPT_LANGUAGE).contains("ru") {
        return Err(QuestError::NotRussian);
    }

    Ok(PasswordResponse::new(state.vault.password(Level::Redirect)).with_key("пароль"))
}

/// Walk the chain of secrets one redirect at a time.
pub async fn redirect(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, QuestError> {
    let secret = uri.query().and_then(|query| query_param(query, SECRET_PARAM));

    match state.vault.redirect_chain().step(secret.as_deref()) {
        ChainStep::Redirect(next) => {
            let location = format!(
                "{}?{}",
                uri.path(),
                form_urlencoded::Serializer::new(String::new())
                    .append_pair(SECRET_PARAM, next)
                    .finish()
            );
            Ok(Redirect::temporary(&location).into_response())
        }
        ChainStep::Complete => {
            Ok(PasswordResponse::new(state.vault.password(Level::Robots)).into_response())
        }
        ChainStep::Unknown => Err(QuestError::WrongRedirectSecret),
    }
}

pub async fn robots(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<PasswordResponse, QuestError> {
    let payload = SecretPayload::from_body(&body)?;

    if payload.secret != state.vault.robots_secret() {
        return Err(QuestError::WrongRobotsSecret);
    }

    Ok(PasswordResponse::new(state.vault.password(Level::GuessNumber)))
}

pub async fn guess_number(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<PasswordResponse, QuestError> {
    let payload = NumberPayload::from_body(&body)?;

    if payload.number != SECRET_NUMBER {
        return Err(QuestError::WrongNumber);
    }

    Ok(PasswordResponse::new(state.vault.password(Level::Mask)))
}

/// Reveal the finish password where the guess matches the mask secret.
pub async fn mask(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<PasswordResponse, QuestError> {
    let payload = SecretPayload::from_body(&body)?;

    let masked = transform::mask(
        state.vault.password(Level::Finish),
        state.vault.mask_secret(),
        &payload.secret,
    )?;

    Ok(PasswordResponse::new(masked))
}

pub async fn finish() -> FinishResponse {
    FinishResponse
}

/// Fallback for level routes hit with the wrong method.
pub async fn method_not_allowed() -> QuestError {
    QuestError::MethodNotAllowed
}

fn lowercase_header(headers: &HeaderMap, name: HeaderName) -> String {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).to_lowercase())
        .unwrap_or_default()
}

/// First value of `name` in a query string; repeated keys are ignored.
fn query_param(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
