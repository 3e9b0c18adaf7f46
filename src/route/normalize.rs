use serde_json::Value;
use std::sync::Arc;

use super::{RouteNode, RouteSpec};
use crate::enums::Category;
use crate::errors::{RouterError, RouterResult};
use crate::pattern::{
    NodeKind, PatternNode, parse_header_key, parse_header_value, parse_method, parse_route,
};
use crate::router::RouterOptions;
use crate::types::{Endpoint, RouteIndex};

pub const ANY_METHOD: &str = "*";

type HeaderConstraint = (String, Option<String>);

/// Expands one route into its ordered node sequence: path/query/fragment
/// nodes, the method node, one pair per header constraint and the handler.
pub fn normalize<H, M>(
    spec: RouteSpec<H, M>,
    order: RouteIndex,
    options: &RouterOptions,
) -> RouterResult<Vec<RouteNode<H, M>>> {
    tracing::event!(tracing::Level::TRACE, operation="normalize", url=%spec.url, order=order as u64);

    let RouteSpec {
        url,
        method,
        headers,
        handler,
        middleware,
    } = spec;

    let mut patterns = parse_route(&url).map_err(|err| RouterError::pattern(&url, err))?;

    let method = method.as_deref().unwrap_or(ANY_METHOD);
    patterns.push(parse_method(method).map_err(|err| RouterError::pattern(method, err))?);

    for (key, value) in header_constraints(headers.as_ref())? {
        patterns.push(header_pair(&key, value.as_deref())?);
    }

    if options.trim {
        trim_trailing_slash(&mut patterns);
    }

    let mut sequence: Vec<RouteNode<H, M>> = patterns
        .into_iter()
        .map(|mut node| {
            node.set_order(order);
            RouteNode::Pattern(node)
        })
        .collect();
    sequence.push(RouteNode::Handler(Arc::new(Endpoint::new(
        handler, middleware, order,
    ))));

    Ok(sequence)
}

// `/foo/` parses to `"", foo, "", null`; drop the empty segment in front of
// the null unless it is the leading one.
fn trim_trailing_slash(nodes: &mut Vec<PatternNode>) {
    let Some(end) = nodes
        .iter()
        .position(|node| node.category == Category::Segment && node.is_null())
    else {
        return;
    };

    if end > 1 && nodes[end - 1].is_empty_literal() {
        nodes.remove(end - 1);
    }
}

fn header_constraints(headers: Option<&Value>) -> RouterResult<Vec<HeaderConstraint>> {
    let mut out = Vec::new();
    match headers {
        None => {}
        Some(Value::Array(items)) => {
            for item in items {
                collect_header(item, &mut out)?;
            }
        }
        Some(item) => collect_header(item, &mut out)?,
    }
    Ok(out)
}

fn collect_header(item: &Value, out: &mut Vec<HeaderConstraint>) -> RouterResult<()> {
    match item {
        Value::String(name) => out.push((name.clone(), None)),
        Value::Object(map) => {
            for (name, value) in map {
                match value {
                    Value::String(pattern) => out.push((name.clone(), Some(pattern.clone()))),
                    other => {
                        return Err(RouterError::InvalidHeaderSpec {
                            found: describe_json(other),
                        });
                    }
                }
            }
        }
        other => {
            return Err(RouterError::InvalidHeaderSpec {
                found: describe_json(other),
            });
        }
    }
    Ok(())
}

fn header_pair(key: &str, value: Option<&str>) -> RouterResult<PatternNode> {
    let key_node = parse_header_key(key).map_err(|err| RouterError::pattern(key, err))?;
    let value_node = value
        .map(|pattern| {
            parse_header_value(pattern).map_err(|err| RouterError::pattern(pattern, err))
        })
        .transpose()?;

    let raw = match value {
        Some(pattern) => format!("{key}: {pattern}"),
        None => key.to_string(),
    };

    Ok(PatternNode::new(
        Category::Header,
        NodeKind::Pair {
            key: Box::new(key_node),
            value: value_node.map(Box::new),
        },
        raw,
    ))
}

fn describe_json(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    format!("{kind} `{value}`")
}
