use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;

use crate::credentials::{AuthMode, CredentialScope};
use crate::error::Error;

/// One outbound call, as built by the facade.
///
/// The path is kept as raw segments relative to the resolved base URL;
/// each one is percent-encoded when the URL is built, so ids and codes
/// can never add segments or a query string.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: HeaderMap,
    pub auth: AuthMode,
}

impl RequestContext {
    /// `route` is a fixed path such as `/admin/users`, split on `/`.
    /// Caller-supplied values go through [`segment`](Self::segment).
    pub fn new(method: Method, route: &str) -> Self {
        Self {
            method,
            segments: route
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            query: Vec::new(),
            body: None,
            headers: HeaderMap::new(),
            auth: AuthMode::default(),
        }
    }

    pub fn get(route: &str) -> Self {
        Self::new(Method::GET, route)
    }

    pub fn post(route: &str) -> Self {
        Self::new(Method::POST, route)
    }

    pub fn put(route: &str) -> Self {
        Self::new(Method::PUT, route)
    }

    pub fn patch(route: &str) -> Self {
        Self::new(Method::PATCH, route)
    }

    pub fn delete(route: &str) -> Self {
        Self::new(Method::DELETE, route)
    }

    /// Append one path segment verbatim (an id, a code).
    pub fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    /// Path for logs, unencoded.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Send without any stored credential.
    pub fn anonymous(mut self) -> Self {
        self.auth = AuthMode::Anonymous;
        self
    }

    /// Send with `scope`'s token only.
    pub fn scoped(mut self, scope: CredentialScope) -> Self {
        self.auth = AuthMode::Scope(scope);
        self
    }

    pub fn query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, Error> {
        let value = serde_json::to_value(body).map_err(|e| Error::Deserialization {
            message: format!("failed to encode request body: {e}"),
            body: String::new(),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}
