// ── List query normalization ──
//
// List pages send `page`, `limit`, and whatever filters the UI controls
// hold. A control with nothing selected yields an empty string or no
// value at all; those entries are dropped so the server never receives
// an empty-string constraint.

use indexmap::IndexMap;
use serde_json::{Map, Value};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Ordered filter map. `None` models an unset (null/undefined) value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(IndexMap<String, Option<String>>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<V: Into<String>>(&mut self, key: impl Into<String>, value: Option<V>) {
        self.0.insert(key.into(), value.map(Into::into));
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<V: Into<String>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert(key, value);
        self
    }

    /// Convert a loose JSON object (as a UI form would produce).
    ///
    /// `null` is unset; strings pass through; numbers and booleans are
    /// stringified; arrays and objects are sent as compact JSON.
    pub fn from_json(map: &Map<String, Value>) -> Self {
        let entries = map
            .iter()
            .map(|(k, v)| {
                let value = match v {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    Value::Bool(b) => Some(b.to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    other => Some(other.to_string()),
                };
                (k.clone(), value)
            })
            .collect();
        Self(entries)
    }

    /// The entries that survive normalization, in insertion order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(k, v)| match v.as_deref() {
                None | Some("") => None,
                Some(v) => Some((k.clone(), v.to_owned())),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Filters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }
}

/// `(page, limit, filters)` for list-oriented operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub filters: Filters,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            filters: Filters::new(),
        }
    }
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            filters: Filters::new(),
        }
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn filter<V: Into<String>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.filters.insert(key, value);
        self
    }

    /// `page`, `limit`, then the surviving filters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_owned(), self.page.to_string()),
            ("limit".to_owned(), self.limit.to_string()),
        ];
        params.extend(self.filters.to_query());
        params
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_and_unset_filters_are_dropped() {
        let filters = Filters::new()
            .with("status", Some(""))
            .with("course", Some("c1"))
            .with("dateFrom", None::<String>);

        assert_eq!(filters.to_query(), vec![("course".to_owned(), "c1".to_owned())]);
    }

    #[test]
    fn json_filters_normalize_the_same_way() {
        let raw = json!({"status": "", "course": "c1", "dateFrom": null});
        let filters = Filters::from_json(raw.as_object().unwrap_or(&Map::new()));
        assert_eq!(filters.to_query(), vec![("course".to_owned(), "c1".to_owned())]);
    }

    #[test]
    fn scalar_json_values_are_stringified() {
        let raw = json!({"published": true, "minPrice": 10});
        let filters = Filters::from_json(raw.as_object().unwrap_or(&Map::new()));
        assert_eq!(
            filters.to_query(),
            vec![
                ("published".to_owned(), "true".to_owned()),
                ("minPrice".to_owned(), "10".to_owned()),
            ]
        );
    }

    #[test]
    fn whitespace_is_a_real_value() {
        let filters = Filters::new().with("search", Some(" "));
        assert!(!filters.is_empty());
    }

    #[test]
    fn list_query_leads_with_page_and_limit() {
        let query = ListQuery::new(3, 25)
            .filter("status", Some("active"))
            .filter("category", Some(""));

        assert_eq!(
            query.to_query(),
            vec![
                ("page".to_owned(), "3".to_owned()),
                ("limit".to_owned(), "25".to_owned()),
                ("status".to_owned(), "active".to_owned()),
            ]
        );
    }

    #[test]
    fn defaults_are_first_page_of_ten() {
        let query = ListQuery::default();
        assert_eq!((query.page, query.limit), (1, 10));
        assert!(query.filters.is_empty());
    }
}
