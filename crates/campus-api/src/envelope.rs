// Response envelope decoding
//
// Every backend response is expected to look like
// `{ "success": bool, "data"|"<resource>": ..., "message": "..." }`.
// Bodies are decoded exactly once, here, into a tagged `Envelope`; the
// facade only ever sees a successful `Payload` and asks it for typed
// values.
//
// Document stores key records by `_id` and may echo it as `id` too. A
// successful payload is normalized so each object carries a single `id`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::Error;

const DATA_KEY: &str = "data";
const ID_KEY: &str = "id";
const OBJECT_ID_KEY: &str = "_id";
const DEFAULT_FAILURE: &str = "Request failed";

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success(Payload),
    Failure { message: String },
}

impl Envelope {
    /// Decode a 2xx response body.
    ///
    /// An empty body is a success with no fields. A JSON object without a
    /// `success` flag is a success. A bare JSON array or scalar becomes
    /// the payload's `data`.
    pub fn decode(body: &str) -> Result<Self, Error> {
        if body.trim().is_empty() {
            return Ok(Self::Success(Payload::default()));
        }

        let value: Value = serde_json::from_str(body).map_err(|e| {
            let preview = preview(body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.to_owned(),
            }
        })?;

        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        let mut fields = match value {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert(DATA_KEY.into(), other);
                return Self::Success(Payload::from_fields(map));
            }
        };

        let success = fields
            .remove("success")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);

        if success {
            Self::Success(Payload::from_fields(fields))
        } else {
            let message = fields
                .remove("message")
                .and_then(|v| v.as_str().map(str::to_owned))
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE.to_owned());
            Self::Failure { message }
        }
    }

    /// Turn a failure envelope into [`Error::Rejected`].
    pub fn into_result(self) -> Result<Payload, Error> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Failure { message } => Err(Error::Rejected { message }),
        }
    }
}

/// The unwrapped fields of a successful envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Payload {
    fn from_fields(mut fields: Map<String, Value>) -> Self {
        canonicalize_ids(&mut fields);
        let message = match fields.remove("message") {
            Some(Value::String(m)) => Some(m),
            Some(other) => {
                // Not a status message; keep it as data.
                fields.insert("message".into(), other);
                None
            }
            None => None,
        };
        Self { message, fields }
    }

    /// Server-supplied status message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Decode the payload as `T`.
    ///
    /// Looks at `data` first, then each resource-named key in order. If
    /// none is present the remaining fields are decoded as one object.
    pub fn extract<T: DeserializeOwned>(mut self, keys: &[&str]) -> Result<T, Error> {
        let value = std::iter::once(DATA_KEY)
            .chain(keys.iter().copied())
            .find_map(|key| self.fields.remove(key))
            .unwrap_or(Value::Object(self.fields));

        serde_json::from_value(value.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        })
    }

    /// Decode one named field, leaving the rest untouched.
    pub fn extract_field<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, Error> {
        let Some(value) = self.fields.remove(key) else {
            return Ok(None);
        };
        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| Error::Deserialization {
                message: format!("{key}: {e}"),
                body: value.to_string(),
            })
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Fold `_id` into `id` in `map` and every object nested under it.
/// An existing `id` wins and the duplicate `_id` is dropped.
fn canonicalize_ids(map: &mut Map<String, Value>) {
    if let Some(object_id) = map.remove(OBJECT_ID_KEY) {
        map.entry(ID_KEY).or_insert(object_id);
    }
    for value in map.values_mut() {
        canonicalize_value(value);
    }
}

fn canonicalize_value(value: &mut Value) {
    match value {
        Value::Object(map) => canonicalize_ids(map),
        Value::Array(items) => items.iter_mut().for_each(canonicalize_value),
        _ => {}
    }
}

/// First 200 bytes of a body, cut on a char boundary.
pub(crate) fn preview(body: &str) -> &str {
    let end = body
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|end| *end <= 200)
        .last()
        .unwrap_or(0);
    &body[..end]
}

/// Pull a human-readable message out of an error response body.
///
/// Returns the message and, when the body was JSON, the parsed payload.
pub(crate) fn error_details(status: reqwest::StatusCode, body: &str) -> (String, Option<Value>) {
    let payload = serde_json::from_str::<Value>(body).ok();

    let from_payload = payload.as_ref().and_then(|p| {
        ["message", "error", "msg"]
            .iter()
            .find_map(|k| p.get(*k).and_then(Value::as_str))
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
    });

    let message = from_payload.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() || payload.is_some() {
            format!("Request failed with status code {}", status.as_u16())
        } else {
            preview(trimmed).to_owned()
        }
    });

    (message, payload)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Course {
        id: String,
    }

    #[test]
    fn data_key_wins_over_resource_key() {
        let env = Envelope::from_value(json!({
            "success": true,
            "data": [{"id": "a"}],
            "courses": [{"id": "b"}]
        }));
        let courses: Vec<Course> = env.into_result().unwrap().extract(&["courses"]).unwrap();
        assert_eq!(courses, vec![Course { id: "a".into() }]);
    }

    #[test]
    fn resource_key_is_used_when_data_is_absent() {
        let env = Envelope::from_value(json!({"success": true, "course": {"id": "c1"}}));
        let course: Course = env.into_result().unwrap().extract(&["course"]).unwrap();
        assert_eq!(course.id, "c1");
    }

    #[test]
    fn remaining_fields_decode_as_one_object() {
        let env = Envelope::from_value(json!({"success": true, "id": "c9", "message": "ok"}));
        let payload = env.into_result().unwrap();
        assert_eq!(payload.message(), Some("ok"));
        let course: Course = payload.extract(&[]).unwrap();
        assert_eq!(course.id, "c9");
    }

    #[test]
    fn object_ids_fold_into_id() {
        let env = Envelope::from_value(json!({
            "success": true,
            "data": [
                {"_id": "c1", "id": "c1", "title": "Both"},
                {"_id": "c2", "title": "Mongo only"},
                {"id": "c3", "owner": {"_id": "u1", "name": "Ada"}}
            ]
        }));
        let value = env.into_result().unwrap().into_value();
        assert_eq!(
            value["data"],
            json!([
                {"id": "c1", "title": "Both"},
                {"id": "c2", "title": "Mongo only"},
                {"id": "c3", "owner": {"id": "u1", "name": "Ada"}}
            ])
        );
    }

    #[test]
    fn duplicate_ids_still_decode() {
        let body = r#"{"success":true,"data":[{"_id":"c1","id":"c1"}]}"#;
        let courses: Vec<Course> = Envelope::decode(body)
            .unwrap()
            .into_result()
            .unwrap()
            .extract(&[])
            .unwrap();
        assert_eq!(courses, vec![Course { id: "c1".into() }]);
    }

    #[test]
    fn failure_envelope_becomes_rejected() {
        let env = Envelope::decode(r#"{"success": false, "message": "Course not found"}"#).unwrap();
        match env.into_result() {
            Err(Error::Rejected { message }) => assert_eq!(message, "Course not found"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn failure_without_message_gets_a_generic_one() {
        let env = Envelope::from_value(json!({"success": false}));
        assert_eq!(
            env,
            Envelope::Failure {
                message: "Request failed".into()
            }
        );
    }

    #[test]
    fn empty_and_bare_bodies_are_successes() {
        assert!(matches!(Envelope::decode("").unwrap(), Envelope::Success(_)));

        let ids: Vec<String> = Envelope::decode(r#"["a","b"]"#)
            .unwrap()
            .into_result()
            .unwrap()
            .extract(&[])
            .unwrap();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn malformed_json_is_a_deserialization_error() {
        assert!(matches!(
            Envelope::decode("<html>"),
            Err(Error::Deserialization { .. })
        ));
    }

    #[test]
    fn error_details_prefer_server_message() {
        let (msg, payload) = error_details(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"success":false,"message":"Title is required"}"#,
        );
        assert_eq!(msg, "Title is required");
        assert!(payload.is_some());

        let (msg, payload) = error_details(reqwest::StatusCode::BAD_GATEWAY, "");
        assert_eq!(msg, "Request failed with status code 502");
        assert!(payload.is_none());
    }
}
