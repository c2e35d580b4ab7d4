//! JSON body validation for the levels that take a body.
//!
//! Error messages and leniency rules match what quest players have always
//! seen: an undecodable body counts as `{}`, every field reports its own
//! list of messages, and keys nobody asked for are rejected.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NOT_AN_INTEGER: &str = "Not a valid integer.";
pub const UNKNOWN_FIELD: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";

/// Key used for errors that concern the body as a whole.
pub const SCHEMA_KEY: &str = "_schema";

/// Per-field validation messages, serialized as `{field: [message, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }
}

/// Decode a request body into a JSON object.
///
/// Bodies that are not JSON at all count as an empty object.
pub fn parse_object(body: &[u8]) -> Result<Map<String, Value>, FieldErrors> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(FieldErrors::single(SCHEMA_KEY, INVALID_INPUT)),
        Err(_) => Ok(Map::new()),
    }
}

/// Required string field.
pub fn string_field(object: &Map<String, Value>, name: &str, errors: &mut FieldErrors) -> Option<String> {
    match object.get(name) {
        None => errors.add(name, MISSING),
        Some(Value::Null) => errors.add(name, NULL),
        Some(Value::String(s)) => return Some(s.clone()),
        Some(_) => errors.add(name, NOT_A_STRING),
    }
    None
}

/// Required integer field within `min..=max`.
///
/// Accepts JSON integers, integral floats and numeric strings.
pub fn integer_field(
    object: &Map<String, Value>,
    name: &str,
    min: i64,
    max: i64,
    errors: &mut FieldErrors,
) -> Option<i64> {
    let value = match object.get(name) {
        None => {
            errors.add(name, MISSING);
            return None;
        }
        Some(Value::Null) => {
            errors.add(name, NULL);
            return None;
        }
        Some(value) => value,
    };

    let Some(number) = as_integer(value) else {
        errors.add(name, NOT_AN_INTEGER);
        return None;
    };

    if number < min || number > max {
        errors.add(
            name,
            format!("Must be greater than or equal to {min} and less than or equal to {max}."),
        );
        return None;
    }

    Some(number)
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Flag every key of `object` that is not in `known`.
pub fn reject_unknown(object: &Map<String, Value>, known: &[&str], errors: &mut FieldErrors) {
    for key in object.keys() {
        if !known.contains(&key.as_str()) {
            errors.add(key.as_str(), UNKNOWN_FIELD);
        }
    }
}

/// Body of the robots and mask levels: `{"secret": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretPayload {
    pub secret: String,
}

impl SecretPayload {
    pub fn from_body(body: &[u8]) -> Result<Self, FieldErrors> {
        let object = parse_object(body)?;
        let mut errors = FieldErrors::default();

        let secret = string_field(&object, "secret", &mut errors);
        reject_unknown(&object, &["secret"], &mut errors);

        match secret {
            Some(secret) if errors.is_empty() => Ok(Self { secret }),
            _ => Err(errors),
        }
    }
}

/// Body of the guess_number level: `{"number": 1..=1000}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberPayload {
    pub number: i64,
}

impl NumberPayload {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 1000;

    pub fn from_body(body: &[u8]) -> Result<Self, FieldErrors> {
        let object = parse_object(body)?;
        let mut errors = FieldErrors::default();

        let number = integer_field(&object, "number", Self::MIN, Self::MAX, &mut errors);
        reject_unknown(&object, &["number"], &mut errors);

        match number {
            Some(number) if errors.is_empty() => Ok(Self { number }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RANGE: &str = "Must be greater than or equal to 1 and less than or equal to 1000.";

    fn number_errors(body: Value) -> FieldErrors {
        NumberPayload::from_body(body.to_string().as_bytes()).unwrap_err()
    }

    #[test]
    fn test_secret_payload() {
        let payload = SecretPayload::from_body(br#"{"secret": "foobar"}"#).unwrap();
        assert_eq!(payload.secret, "foobar");
    }

    #[test]
    fn test_unparsable_body_is_empty_object() {
        for body in [&b""[..], &b"not json"[..], &b"{\"secret\":"[..]] {
            let errors = SecretPayload::from_body(body).unwrap_err();
            assert_eq!(errors.get("secret"), Some(&[MISSING.to_string()][..]));
        }
    }

    #[test]
    fn test_secret_type_errors() {
        let errors = SecretPayload::from_body(br#"{"secret": 42}"#).unwrap_err();
        assert_eq!(errors.get("secret"), Some(&[NOT_A_STRING.to_string()][..]));

        let errors = SecretPayload::from_body(br#"{"secret": null}"#).unwrap_err();
        assert_eq!(errors.get("secret"), Some(&[NULL.to_string()][..]));
    }

    #[test]
    fn test_non_object_body() {
        let errors = SecretPayload::from_body(b"[1, 2]").unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"_schema": ["Invalid input type."]})
        );
    }

    #[test]
    fn test_unknown_fields_are_reported_with_missing_ones() {
        let errors = SecretPayload::from_body(br#"{"token": "x"}"#).unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"secret": [MISSING], "token": [UNKNOWN_FIELD]})
        );
    }

    #[test]
    fn test_number_payload_accepts_integers() {
        for body in [json!({"number": 372}), json!({"number": "372"}), json!({"number": 372.0})] {
            let payload = NumberPayload::from_body(body.to_string().as_bytes()).unwrap();
            assert_eq!(payload.number, 372);
        }
    }

    #[test]
    fn test_number_payload_errors() {
        assert_eq!(
            serde_json::to_value(number_errors(json!({}))).unwrap(),
            json!({"number": [MISSING]})
        );
        for invalid in [json!("foobar"), json!(true), json!(3.5), json!([1])] {
            assert_eq!(
                number_errors(json!({ "number": invalid })).get("number"),
                Some(&[NOT_AN_INTEGER.to_string()][..])
            );
        }
    }

    #[test]
    fn test_number_range_is_inclusive() {
        for out_of_range in [0, 1001, -5] {
            assert_eq!(
                number_errors(json!({ "number": out_of_range })).get("number"),
                Some(&[RANGE.to_string()][..])
            );
        }
        assert!(NumberPayload::from_body(br#"{"number": 1}"#).is_ok());
        assert!(NumberPayload::from_body(br#"{"number": 1000}"#).is_ok());
    }
}
