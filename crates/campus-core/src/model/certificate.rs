use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "certificateId", alias = "verificationCode")]
    pub code: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub course: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCertificateRequest {
    pub user_id: String,
    pub course_id: String,
}

/// Result of checking a certificate code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateVerification {
    #[serde(default, alias = "isValid")]
    pub valid: bool,
    #[serde(default)]
    pub certificate: Option<Certificate>,
}
