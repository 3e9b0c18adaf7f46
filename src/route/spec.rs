use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a route table.
///
/// `headers` (also accepted as `header`) keeps the raw JSON shape: a header
/// name, an object mapping names to value patterns, or an array of those.
/// The shape is validated when the table is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSpec<H, M = ()> {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, alias = "header", skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    pub handler: H,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware: Option<M>,
}

impl<H> RouteSpec<H> {
    pub fn new<S: Into<String>>(url: S, handler: H) -> Self {
        Self {
            url: url.into(),
            method: None,
            headers: None,
            handler,
            middleware: None,
        }
    }
}

impl<H, M> RouteSpec<H, M> {
    pub fn method<S: Into<String>>(mut self, method: S) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Requires the header to be present with any value.
    pub fn header<S: Into<String>>(mut self, name: S) -> Self {
        self.push_header(Value::String(name.into()));
        self
    }

    /// Requires the header to be present with a value matching `value`.
    pub fn header_pattern<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        let mut map = Map::new();
        map.insert(name.into(), Value::String(value.into()));
        self.push_header(Value::Object(map));
        self
    }

    pub fn with_headers(mut self, headers: Value) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn middleware<N>(self, middleware: N) -> RouteSpec<H, N> {
        RouteSpec {
            url: self.url,
            method: self.method,
            headers: self.headers,
            handler: self.handler,
            middleware: Some(middleware),
        }
    }

    fn push_header(&mut self, item: Value) {
        self.headers = Some(match self.headers.take() {
            None => Value::Array(vec![item]),
            Some(Value::Array(mut items)) => {
                items.push(item);
                Value::Array(items)
            }
            Some(existing) => Value::Array(vec![existing, item]),
        });
    }
}
