use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use campus_api::Payload;

use crate::error::CoreError;

/// Pagination block returned next to list payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default, alias = "totalItems", alias = "totalDocs", alias = "count")]
    pub total: Option<u64>,
    #[serde(default, alias = "totalPages")]
    pub pages: Option<u32>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a list payload.
    ///
    /// Accepts the list under `data` or `<resource>`, either directly or
    /// nested one level (`data: { <resource>: [...], pagination }`), with
    /// pagination at either level.
    pub(crate) fn from_payload(mut payload: Payload, resource: &str) -> Result<Self, CoreError> {
        let mut pagination: Option<Pagination> = payload.extract_field("pagination")?;
        let body: Value = payload.extract(&[resource])?;

        let list = match body {
            Value::Array(_) => body,
            Value::Object(mut inner) => {
                if pagination.is_none() {
                    pagination = inner
                        .remove("pagination")
                        .map(serde_json::from_value)
                        .transpose()
                        .map_err(|e| CoreError::Internal(format!("invalid pagination: {e}")))?;
                }
                [resource, "items", "docs", "results"]
                    .iter()
                    .find_map(|k| inner.remove(*k))
                    .unwrap_or(Value::Array(Vec::new()))
            }
            Value::Null => Value::Array(Vec::new()),
            other => {
                return Err(CoreError::Internal(format!(
                    "expected a list of {resource}, got {other}"
                )));
            }
        };

        let items = serde_json::from_value(list)
            .map_err(|e| CoreError::Internal(format!("invalid {resource} list: {e}")))?;
        Ok(Self { items, pagination })
    }
}
