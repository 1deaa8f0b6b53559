use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: Option<u64>,
    #[serde(default)]
    pub total_courses: Option<u64>,
    #[serde(default)]
    pub total_enrollments: Option<u64>,
    #[serde(default)]
    pub total_revenue: Option<f64>,
    #[serde(default)]
    pub active_users: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
