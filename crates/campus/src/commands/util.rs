//! Shared helpers for command handlers.

use chrono::{DateTime, Utc};
use serde_json::Value;

use campus_core::{Filters, ListQuery};

use crate::cli::ListArgs;
use crate::error::CliError;

/// Build a facade query from `--page/--limit/--filter`.
pub fn list_query(args: &ListArgs) -> Result<ListQuery, CliError> {
    let filters = args
        .filter
        .iter()
        .map(|raw| {
            let (key, value) = split_pair(raw, "filter")?;
            Ok((key.to_owned(), Some(value.to_owned())))
        })
        .collect::<Result<Filters, CliError>>()?;
    Ok(ListQuery::new(args.page, args.limit).with_filters(filters))
}

/// Split `KEY=VALUE`; the value may be empty, the key may not.
pub fn split_pair<'a>(raw: &'a str, field: &str) -> Result<(&'a str, &'a str), CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(CliError::Validation {
            field: field.into(),
            reason: format!("expected KEY=VALUE, got '{raw}'"),
        }),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Cell formatting ──────────────────────────────────────────────────

pub fn opt(value: Option<&str>) -> String {
    value.unwrap_or("-").to_owned()
}

pub fn date(value: Option<&DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d").to_string())
}

pub fn money(amount: Option<f64>, currency: Option<&str>) -> String {
    match (amount, currency) {
        (Some(a), Some(c)) => format!("{a:.2} {}", c.to_uppercase()),
        (Some(a), None) => format!("{a:.2}"),
        (None, _) => "-".into(),
    }
}

pub fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".into(),
        Some(false) => "no".into(),
        None => "-".into(),
    }
}

/// Label for a related record the backend may send populated (an object
/// with a name/title/email) or as a bare id.
pub fn reference(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Object(obj)) => ["name", "title", "email", "_id", "id"]
            .iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_str))
            .unwrap_or("-")
            .to_owned(),
        _ => "-".into(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn empty_filter_values_are_dropped_from_the_query() {
        let args = ListArgs {
            page: 2,
            limit: 20,
            filter: vec!["status=".into(), "course=c1".into()],
        };
        let query = list_query(&args).unwrap();
        assert_eq!(
            query.to_query(),
            vec![
                ("page".to_owned(), "2".to_owned()),
                ("limit".to_owned(), "20".to_owned()),
                ("course".to_owned(), "c1".to_owned()),
            ]
        );
    }

    #[test]
    fn filter_without_key_is_rejected() {
        assert!(split_pair("=x", "filter").is_err());
        assert!(split_pair("nokey", "filter").is_err());
        assert_eq!(split_pair("a=b=c", "filter").unwrap(), ("a", "b=c"));
    }

    #[test]
    fn references_prefer_readable_names() {
        assert_eq!(reference(Some(&json!({"_id": "u1", "name": "Ada"}))), "Ada");
        assert_eq!(reference(Some(&json!("c9"))), "c9");
        assert_eq!(reference(None), "-");
    }
}
