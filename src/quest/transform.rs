//! Pure string transforms used by the levels.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Placeholder for a position the guess did not match.
pub const MASK_CHAR: char = '*';

/// Reverse a string by Unicode code points.
pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// Standard alphabet, padded, no line wrapping.
pub fn base64_encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decoded bytes are not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub fn base64_decode(text: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD.decode(text.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// The target password and the mask secret must have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mask target has {password} characters but secret has {secret}")]
pub struct MaskError {
    pub password: usize,
    pub secret: usize,
}

/// Reveal `password` at every position where `guess` matches `secret`.
///
/// Positions the guess does not reach are masked, guess characters past the
/// end of the secret are ignored.
pub fn mask(password: &str, secret: &str, guess: &str) -> Result<String, MaskError> {
    let password_len = password.chars().count();
    let secret_len = secret.chars().count();
    if password_len != secret_len {
        return Err(MaskError {
            password: password_len,
            secret: secret_len,
        });
    }

    let mut guess = guess.chars();
    let masked = password
        .chars()
        .zip(secret.chars())
        .map(|(p, s)| match guess.next() {
            Some(g) if g == s => p,
            _ => MASK_CHAR,
        })
        .collect();

    Ok(masked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse() {
        assert_eq!(reverse("password"), "drowssap");
        assert_eq!(reverse(&reverse("password")), "password");
        assert_eq!(reverse("пароль"), "ьлорап");
        assert_eq!(reverse(""), "");
    }

    #[test]
    fn test_base64_encode() {
        assert_eq!(base64_encode("foo"), "Zm9v");
        assert_eq!(base64_encode("bar"), "YmFy");
        assert_eq!(
            base64_encode("Beautiful is better than ugly."),
            "QmVhdXRpZnVsIGlzIGJldHRlciB0aGFuIHVnbHku"
        );
        assert_eq!(base64_encode("fo"), "Zm8=");
    }

    #[test]
    fn test_base64_decode() {
        assert_eq!(base64_decode("Zm9v").unwrap(), "foo");
        assert_eq!(base64_decode("YmFy").unwrap(), "bar");
        assert_eq!(
            base64_decode("QmVhdXRpZnVsIGlzIGJldHRlciB0aGFuIHVnbHku").unwrap(),
            "Beautiful is better than ugly."
        );
        assert!(base64_decode("not base64!").is_err());
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("mark", "alex", "alex").unwrap(), "mark");
        assert_eq!(mask("mark", "alex", "alem").unwrap(), "mar*");
        assert_eq!(mask("mark", "alex", "jon").unwrap(), "****");
        assert_eq!(mask("mark", "alex", "").unwrap(), "****");
    }

    #[test]
    fn test_mask_short_and_long_guesses() {
        assert_eq!(mask("mark", "alex", "al").unwrap(), "ma**");
        assert_eq!(mask("mark", "alex", "alexander").unwrap(), "mark");
        assert_eq!(mask("mark", "alex", "xlex").unwrap(), "*ark");
    }

    #[test]
    fn test_mask_length_mismatch() {
        assert_eq!(
            mask("mark", "alexander", "alexander"),
            Err(MaskError {
                password: 4,
                secret: 9
            })
        );
    }

    #[test]
    fn test_mask_quest_default() {
        let config = crate::config::QuestConfig::default();
        let finish = &config.passwords.finish;
        let secret = &config.secrets.mask;

        assert_eq!(mask(finish, secret, secret).unwrap(), *finish);
        assert_eq!(
            mask(finish, secret, "eeeeeeeeeeeeeeeeeeee").unwrap(),
            "***u****7***********"
        );
    }
}
