use crate::enums::Category;
use crate::pattern::{NodeKind, PatternNode};
use crate::route::ANY_METHOD;

#[derive(Debug, Default)]
struct TraceParts<'a> {
    segments: Vec<&'a str>,
    query: Vec<(&'a str, Option<&'a str>)>,
    fragment: Option<&'a str>,
    method: Option<&'a str>,
    headers: Vec<(&'a str, Option<&'a str>)>,
}

impl<'a> TraceParts<'a> {
    fn push(&mut self, node: &'a PatternNode) {
        match (&node.kind, node.category) {
            (NodeKind::Null, _) => {}
            (NodeKind::Pair { key, value }, Category::Query) => {
                self.query
                    .push((key.raw.as_str(), value.as_ref().map(|v| v.raw.as_str())));
            }
            (NodeKind::Pair { key, value }, _) => {
                self.headers
                    .push((key.raw.as_str(), value.as_ref().map(|v| v.raw.as_str())));
            }
            (_, Category::Segment) => self.segments.push(node.raw.as_str()),
            (_, Category::Query) => self.query.push((node.raw.as_str(), None)),
            (_, Category::Fragment) => self.fragment = Some(node.raw.as_str()),
            (_, Category::Method) => self.method = Some(node.raw.as_str()),
            (_, Category::Header) => self.headers.push((node.raw.as_str(), None)),
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();

        if let Some(method) = self.method {
            out.push_str(if method == ANY_METHOD { "ALL" } else { method });
            out.push(' ');
        }

        let path = self.segments.join("/");
        out.push_str(if path.is_empty() { "/" } else { &path });

        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&join_pairs(&self.query, "=", "&"));
        }

        if let Some(fragment) = self.fragment {
            out.push('#');
            out.push_str(fragment);
        }

        if !self.headers.is_empty() {
            out.push_str(" {");
            out.push_str(&join_pairs(&self.headers, ": ", ", "));
            out.push('}');
        }

        out
    }
}

fn join_pairs(pairs: &[(&str, Option<&str>)], assign: &str, separator: &str) -> String {
    pairs
        .iter()
        .map(|(key, value)| match value {
            Some(value) => format!("{key}{assign}{value}"),
            None => (*key).to_string(),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Human-readable form of a route: `METHOD PATH?QUERY#FRAGMENT {header: value}`.
pub fn format_trace<'a>(nodes: impl IntoIterator<Item = &'a PatternNode>) -> String {
    let mut parts = TraceParts::default();
    for node in nodes {
        parts.push(node);
    }
    parts.render()
}
