mod merge;
mod trace;

pub(crate) use merge::merge_routes;
pub use trace::format_trace;

use crate::route::RouteNode;

pub(crate) type NodeId = usize;

#[derive(Debug)]
pub(crate) struct TrieNode<H, M> {
    pub(crate) node: RouteNode<H, M>,
    // Only walked to render traces.
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Merged route table. Nodes live in an arena and refer to each other by
/// index; the whole structure is dropped once the matcher is compiled.
#[derive(Debug)]
pub(crate) struct Trie<H, M> {
    pub(crate) nodes: Vec<TrieNode<H, M>>,
    pub(crate) roots: Vec<NodeId>,
}

impl<H, M> Trie<H, M> {
    pub(crate) fn node(&self, id: NodeId) -> &TrieNode<H, M> {
        &self.nodes[id]
    }

    pub(crate) fn trace(&self, id: NodeId) -> String {
        trace_chain(&self.nodes, Some(id), std::iter::empty())
    }

    /// Handler nodes in depth-first, specificity order.
    pub(crate) fn handlers(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.node.is_handler() {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}

/// Renders the route made of `parent`'s ancestry followed by `rest`.
pub(crate) fn trace_chain<'a, H: 'a, M: 'a>(
    nodes: &'a [TrieNode<H, M>],
    parent: Option<NodeId>,
    rest: impl IntoIterator<Item = &'a RouteNode<H, M>>,
) -> String {
    let mut chain = Vec::new();
    let mut cursor = parent;
    while let Some(id) = cursor {
        chain.push(&nodes[id].node);
        cursor = nodes[id].parent;
    }
    chain.reverse();
    format_trace(
        chain
            .into_iter()
            .chain(rest)
            .filter_map(RouteNode::as_pattern),
    )
}
