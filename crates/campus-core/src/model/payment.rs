use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub course: Option<Value>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    #[serde(default, alias = "paymentMethod")]
    pub method: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
    #[serde(other)]
    Unknown,
}

/// Revenue summary. Field names vary between backend versions, hence
/// the aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    #[serde(default, alias = "totalAmount")]
    pub total_revenue: Option<f64>,
    #[serde(default, alias = "count", alias = "totalTransactions")]
    pub total_payments: Option<u64>,
    #[serde(default)]
    pub monthly_revenue: Option<f64>,
    #[serde(default, alias = "refunds")]
    pub refunded: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn stats_accept_alternate_names() {
        let stats: PaymentStats =
            serde_json::from_value(json!({"totalAmount": 1200.5, "count": 4})).unwrap();
        assert_eq!(stats.total_revenue, Some(1200.5));
        assert_eq!(stats.total_payments, Some(4));
    }

    #[test]
    fn status_display_matches_wire_name() {
        assert_eq!(PaymentStatus::Refunded.to_string(), "refunded");
    }
}
