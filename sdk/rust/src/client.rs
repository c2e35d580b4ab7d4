use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{redirect, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

pub const LEVEL_COUNT: u8 = 12;

/// Characters tried, in order, when recovering the mask secret.
pub const MASK_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const IE6_USER_AGENT: &str = "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1; SV1)";
const MAX_REDIRECTS: usize = 64;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Everything collected on the way through the quest.
#[derive(Debug, Clone, Serialize)]
pub struct Walkthrough {
    /// `passwords[n - 1]` unlocks level n.
    pub passwords: Vec<String>,
    pub robots_secret: String,
    pub number: i64,
    pub mask_secret: String,
    pub message: String,
}

pub struct QuestClient {
    client: Client,
    base_url: String,
}

impl QuestClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        // The redirect level needs more hops than reqwest follows by default.
        let client = Client::builder()
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn level(&self, number: u8, method: Method, password: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/level/{}", self.base_url, number))
            .header("X-Password", password)
    }

    /// Level-1 password, scraped from the home page.
    pub async fn home(&self) -> Result<String, ClientError> {
        let text = self.text(self.client.get(format!("{}/", self.base_url))).await?;
        find_after(&text, "Password: ")
            .ok_or_else(|| ClientError::Unexpected("no password on the home page".into()))
    }

    /// Secret for the robots level, scraped from robots.txt.
    pub async fn robots_secret(&self) -> Result<String, ClientError> {
        let text = self
            .text(self.client.get(format!("{}/robots.txt", self.base_url)))
            .await?;
        find_after(&text, "# Secret: ")
            .ok_or_else(|| ClientError::Unexpected("no secret in robots.txt".into()))
    }

    pub async fn plain(&self, password: &str) -> Result<String, ClientError> {
        let body = self.json(self.level(1, Method::GET, password)).await?;
        field(&body, "password")
    }

    pub async fn reverse(&self, password: &str) -> Result<String, ClientError> {
        let body = self.json(self.level(2, Method::GET, password)).await?;
        Ok(field(&body, "drowssap")?.chars().rev().collect())
    }

    pub async fn base64(&self, password: &str) -> Result<String, ClientError> {
        let body = self.json(self.level(3, Method::GET, password)).await?;
        let bytes = STANDARD
            .decode(field(&body, "password")?)
            .map_err(|e| ClientError::Unexpected(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ClientError::Unexpected(e.to_string()))
    }

    /// The body holds a decoy; the real password is in a header.
    pub async fn header(&self, password: &str) -> Result<String, ClientError> {
        let response = check(self.level(4, Method::GET, password).send().await?).await?;
        response
            .headers()
            .get("X-Real-Password")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ClientError::Unexpected("missing X-Real-Password header".into()))
    }

    pub async fn delete(&self, password: &str) -> Result<String, ClientError> {
        let body = self.json(self.level(5, Method::DELETE, password)).await?;
        field(&body, "password")
    }

    pub async fn user_agent(&self, password: &str) -> Result<String, ClientError> {
        let request = self.level(6, Method::GET, password).header(USER_AGENT, IE6_USER_AGENT);
        field(&self.json(request).await?, "password")
    }

    pub async fn accept_language(&self, password: &str) -> Result<String, ClientError> {
        let request = self.level(7, Method::GET, password).header(ACCEPT_LANGUAGE, "ru-RU,ru;q=0.9");
        field(&self.json(request).await?, "пароль")
    }

    /// Follows the whole redirect chain.
    pub async fn redirect(&self, password: &str) -> Result<String, ClientError> {
        let body = self.json(self.level(8, Method::GET, password)).await?;
        field(&body, "password")
    }

    pub async fn robots(&self, password: &str, secret: &str) -> Result<String, ClientError> {
        let request = self.level(9, Method::POST, password).json(&json!({ "secret": secret }));
        field(&self.json(request).await?, "password")
    }

    /// `None` when the server says the number is wrong.
    pub async fn guess_number(&self, password: &str, number: i64) -> Result<Option<String>, ClientError> {
        let response = self
            .level(10, Method::POST, password)
            .json(&json!({ "number": number }))
            .send()
            .await?;

        if response.status() == StatusCode::FORBIDDEN {
            return Ok(None);
        }
        let body: Value = check(response).await?.json().await?;
        field(&body, "password").map(Some)
    }

    /// Try every number in range until one is accepted.
    pub async fn find_number(&self, password: &str) -> Result<(i64, String), ClientError> {
        for number in 1..=1000 {
            if let Some(next) = self.guess_number(password, number).await? {
                return Ok((number, next));
            }
        }
        Err(ClientError::Unexpected("no number between 1 and 1000 was accepted".into()))
    }

    /// The finish password, masked wherever `guess` misses the secret.
    pub async fn mask(&self, password: &str, guess: &str) -> Result<String, ClientError> {
        let request = self.level(11, Method::POST, password).json(&json!({ "secret": guess }));
        field(&self.json(request).await?, "password")
    }

    /// Recover the mask secret one position at a time.
    ///
    /// Returns the secret and the fully revealed finish password.
    pub async fn crack_mask(&self, password: &str) -> Result<(String, String), ClientError> {
        let length = self.mask(password, "").await?.chars().count();
        let mut secret = String::new();

        for position in 0..length {
            let mut found = None;
            for candidate in MASK_ALPHABET.chars() {
                let guess = format!("{secret}{candidate}");
                let masked = self.mask(password, &guess).await?;
                if masked.chars().nth(position).is_some_and(|c| c != '*') {
                    found = Some(candidate);
                    break;
                }
            }
            match found {
                Some(c) => secret.push(c),
                None => {
                    return Err(ClientError::Unexpected(format!(
                        "no character revealed position {position}"
                    )))
                }
            }
        }

        let revealed = self.mask(password, &secret).await?;
        Ok((secret, revealed))
    }

    pub async fn finish(&self, password: &str) -> Result<String, ClientError> {
        self.text(self.level(12, Method::GET, password)).await
    }

    /// Walk every level from the home page to the finish message.
    pub async fn solve(&self) -> Result<Walkthrough, ClientError> {
        let mut passwords = Vec::with_capacity(LEVEL_COUNT as usize);

        passwords.push(self.home().await?);
        passwords.push(self.plain(last(&passwords)).await?);
        passwords.push(self.reverse(last(&passwords)).await?);
        passwords.push(self.base64(last(&passwords)).await?);
        passwords.push(self.header(last(&passwords)).await?);
        passwords.push(self.delete(last(&passwords)).await?);
        passwords.push(self.user_agent(last(&passwords)).await?);
        passwords.push(self.accept_language(last(&passwords)).await?);
        passwords.push(self.redirect(last(&passwords)).await?);

        let robots_secret = self.robots_secret().await?;
        passwords.push(self.robots(last(&passwords), &robots_secret).await?);

        let (number, next) = self.find_number(last(&passwords)).await?;
        passwords.push(next);

        let (mask_secret, next) = self.crack_mask(last(&passwords)).await?;
        passwords.push(next);

        let message = self.finish(last(&passwords)).await?;

        Ok(Walkthrough {
            passwords,
            robots_secret,
            number,
            mask_secret,
            message,
        })
    }

    async fn text(&self, request: RequestBuilder) -> Result<String, ClientError> {
        Ok(check(request.send().await?).await?.text().await?)
    }

    async fn json(&self, request: RequestBuilder) -> Result<Value, ClientError> {
        Ok(check(request.send().await?).await?.json().await?)
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

fn field(body: &Value, key: &str) -> Result<String, ClientError> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ClientError::Unexpected(format!("missing `{key}` in {body}")))
}

fn find_after(text: &str, prefix: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.strip_prefix(prefix))
        .map(|rest| rest.trim().to_string())
}

fn last(passwords: &[String]) -> &str {
    passwords.last().map(String::as_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_after() {
        let text = "Welcome!\n\nPassword: abc123\n";
        assert_eq!(find_after(text, "Password: ").as_deref(), Some("abc123"));
        assert_eq!(find_after(text, "Secret: "), None);
    }

    #[test]
    fn test_field() {
        let body = json!({"пароль": "x", "n": 1});
        assert_eq!(field(&body, "пароль").unwrap(), "x");
        assert!(field(&body, "n").is_err());
        assert!(field(&body, "password").is_err());
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = QuestClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
