use memchr::memchr;
use smallvec::SmallVec;
use std::sync::Arc;

use super::Test;
use crate::enums::Category;
use crate::types::CapturedParam;

/// Request components a compiled router is matched against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParts {
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub fragment: Option<String>,
    pub method: String,
    pub headers: Vec<(String, String)>,
}

impl RequestParts {
    pub fn new<S: Into<String>>(method: S) -> Self {
        Self {
            method: method.into(),
            segments: vec![String::new()],
            ..Default::default()
        }
    }

    /// Splits `path?query#fragment` into its components.
    pub fn from_uri<S: Into<String>>(method: S, uri: &str) -> Self {
        let (rest, fragment) = split_once_byte(uri, b'#');
        let (path, query) = split_once_byte(rest, b'?');

        let mut parts = Self::new(method).path(path);
        if let Some(query) = query {
            parts = parts.query_string(query);
        }
        if let Some(fragment) = fragment {
            parts = parts.fragment(fragment);
        }
        parts
    }

    /// Splits on `/` exactly like route patterns, so `/a/b` becomes
    /// `["", "a", "b"]`.
    pub fn path(mut self, path: &str) -> Self {
        self.segments = path.split('/').map(str::to_string).collect();
        self
    }

    pub fn segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn query_pair<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn query_string(mut self, query: &str) -> Self {
        for item in query.split('&').filter(|item| !item.is_empty()) {
            let (key, value) = split_once_byte(item, b'=');
            self.query
                .push((key.to_string(), value.unwrap_or_default().to_string()));
        }
        self
    }

    pub fn fragment<S: Into<String>>(mut self, fragment: S) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }
}

fn split_once_byte(input: &str, byte: u8) -> (&str, Option<&str>) {
    match memchr(byte, input.as_bytes()) {
        Some(idx) => (&input[..idx], Some(&input[idx + 1..])),
        None => (input, None),
    }
}

#[derive(Debug)]
struct CaptureCell {
    name: Arc<str>,
    value: String,
    prev: Option<Arc<CaptureCell>>,
}

// Persistent list so that every step can extend the captures without
// copying what earlier steps recorded.
#[derive(Debug, Clone, Default)]
struct Captures(Option<Arc<CaptureCell>>);

impl Captures {
    fn push(&self, name: &Arc<str>, value: String) -> Self {
        Captures(Some(Arc::new(CaptureCell {
            name: Arc::clone(name),
            value,
            prev: self.0.clone(),
        })))
    }

    fn iter(&self) -> impl Iterator<Item = &CaptureCell> {
        std::iter::successors(self.0.as_deref(), |cell| cell.prev.as_deref())
    }
}

/// Cursor over a request. Matching never mutates a state; every consumption
/// returns a new one sharing the underlying request.
#[derive(Debug, Clone)]
pub struct MatchState {
    request: Arc<RequestParts>,
    segment: usize,
    query: SmallVec<[usize; 8]>,
    fragment: bool,
    method: bool,
    headers: SmallVec<[usize; 8]>,
    captures: Captures,
}

impl MatchState {
    pub fn new(request: RequestParts) -> Self {
        Self {
            segment: 0,
            query: (0..request.query.len()).collect(),
            fragment: request.fragment.is_some(),
            method: true,
            headers: (0..request.headers.len()).collect(),
            captures: Captures::default(),
            request: Arc::new(request),
        }
    }

    pub fn from_request<I, K, V>(method: &str, uri: &str, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut request = RequestParts::from_uri(method, uri);
        request.headers = headers
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::new(request)
    }

    pub fn request(&self) -> &RequestParts {
        &self.request
    }

    pub fn remaining_segments(&self) -> &[String] {
        self.request
            .segments
            .get(self.segment..)
            .unwrap_or_default()
    }

    pub fn remaining_query(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().map(|&idx| {
            let (key, value) = &self.request.query[idx];
            (key.as_str(), value.as_str())
        })
    }

    pub fn fragment(&self) -> Option<&str> {
        if self.fragment {
            self.request.fragment.as_deref()
        } else {
            None
        }
    }

    pub fn method(&self) -> Option<&str> {
        self.method.then_some(self.request.method.as_str())
    }

    pub fn remaining_headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|&idx| {
            let (key, value) = &self.request.headers[idx];
            (key.as_str(), value.as_str())
        })
    }

    pub fn is_exhausted(&self, slot: Category) -> bool {
        match slot {
            Category::Segment => self.segment >= self.request.segments.len(),
            Category::Query => self.query.is_empty(),
            Category::Fragment => self.fragment().is_none(),
            Category::Method => !self.method,
            Category::Header => self.headers.is_empty(),
        }
    }

    /// Captured parameters in the order they were matched.
    pub fn params(&self) -> Vec<CapturedParam> {
        let mut out: Vec<CapturedParam> = self
            .captures
            .iter()
            .map(|cell| (cell.name.to_string(), cell.value.clone()))
            .collect();
        out.reverse();
        out
    }

    /// Most recent capture recorded under `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find(|cell| &*cell.name == name)
            .map(|cell| cell.value.as_str())
    }

    pub(crate) fn peek(&self, slot: Category) -> Option<&str> {
        match slot {
            Category::Segment => self.remaining_segments().first().map(String::as_str),
            Category::Fragment => self.fragment(),
            Category::Method => self.method(),
            Category::Query | Category::Header => None,
        }
    }

    pub(crate) fn advance(&self, slot: Category, capture: Option<&Arc<str>>) -> MatchState {
        let mut next = self.clone();
        if let (Some(name), Some(token)) = (capture, self.peek(slot)) {
            next.captures = self.captures.push(name, token.to_string());
        }
        match slot {
            Category::Segment => next.segment += 1,
            Category::Fragment => next.fragment = false,
            Category::Method => next.method = false,
            Category::Query | Category::Header => {}
        }
        next
    }

    pub(crate) fn advance_segments(&self, count: usize, capture: Option<&Arc<str>>) -> MatchState {
        let mut next = self.clone();
        let end = (self.segment + count).min(self.request.segments.len());
        if let Some(name) = capture {
            let value = self.request.segments[self.segment.min(end)..end].join("/");
            next.captures = self.captures.push(name, value);
        }
        next.segment = end;
        next
    }

    /// Positions, within the remaining pairs of `slot`, of every pair whose
    /// key and value pass the tests.
    pub(crate) fn matching_pairs(
        &self,
        slot: Category,
        key: &Test,
        value: &Test,
    ) -> SmallVec<[usize; 4]> {
        let Some((pairs, remaining)) = self.pairs(slot) else {
            return SmallVec::new();
        };
        remaining
            .iter()
            .enumerate()
            .filter(|&(_, &idx)| {
                let (k, v) = &pairs[idx];
                key.accepts(k) && value.accepts(v)
            })
            .map(|(position, _)| position)
            .collect()
    }

    pub(crate) fn take_pair(
        &self,
        slot: Category,
        position: usize,
        capture: Option<&Arc<str>>,
    ) -> MatchState {
        let mut next = self.clone();
        let remaining = match slot {
            Category::Query => &mut next.query,
            Category::Header => &mut next.headers,
            _ => return next,
        };
        if position >= remaining.len() {
            return next;
        }
        let idx = remaining.remove(position);

        if let Some(name) = capture {
            let pairs = match slot {
                Category::Query => &self.request.query,
                _ => &self.request.headers,
            };
            next.captures = self.captures.push(name, pairs[idx].1.clone());
        }
        next
    }

    fn pairs(&self, slot: Category) -> Option<(&[(String, String)], &[usize])> {
        match slot {
            Category::Query => Some((&self.request.query, &self.query)),
            Category::Header => Some((&self.request.headers, &self.headers)),
            _ => None,
        }
    }
}
