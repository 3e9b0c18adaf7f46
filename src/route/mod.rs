mod normalize;
mod spec;

pub use normalize::{ANY_METHOD, normalize};
pub use spec::RouteSpec;

use crate::pattern::PatternNode;
use crate::types::{Endpoint, RouteIndex};
use std::sync::Arc;

/// Element of a normalized route: pattern nodes followed by exactly one
/// handler node.
#[derive(Debug)]
pub enum RouteNode<H, M = ()> {
    Pattern(PatternNode),
    Handler(Arc<Endpoint<H, M>>),
}

impl<H, M> RouteNode<H, M> {
    pub fn order(&self) -> RouteIndex {
        match self {
            RouteNode::Pattern(node) => node.order,
            RouteNode::Handler(endpoint) => endpoint.order,
        }
    }

    pub fn as_pattern(&self) -> Option<&PatternNode> {
        match self {
            RouteNode::Pattern(node) => Some(node),
            RouteNode::Handler(_) => None,
        }
    }

    pub fn is_handler(&self) -> bool {
        matches!(self, RouteNode::Handler(_))
    }
}
