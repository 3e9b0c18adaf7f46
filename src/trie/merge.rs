use std::cmp::Ordering;

use super::{NodeId, Trie, TrieNode, trace_chain};
use crate::errors::{RouterError, RouterResult};
use crate::pattern::{pattern_mergeable, pattern_mergeable_ignore_case, pattern_rank};
use crate::route::RouteNode;
use crate::router::RouterOptions;

type Sequence<H, M> = Vec<RouteNode<H, M>>;

struct Group<H, M> {
    head: RouteNode<H, M>,
    tails: Vec<Sequence<H, M>>,
}

impl<H, M> Group<H, M> {
    /// Head followed by the first route folded into this group.
    fn representative(&self) -> impl Iterator<Item = &RouteNode<H, M>> {
        std::iter::once(&self.head).chain(self.tails.first().into_iter().flatten())
    }
}

#[tracing::instrument(level = "trace", skip_all, fields(routes = routes.len() as u64))]
pub(crate) fn merge_routes<H, M>(
    routes: Vec<Sequence<H, M>>,
    options: &RouterOptions,
) -> RouterResult<Trie<H, M>> {
    let mut nodes = Vec::new();
    let roots = merge_level(&mut nodes, routes, None, options)?;
    Ok(Trie { nodes, roots })
}

/// Lexicographic specificity order over whole sequences. Handlers rank after
/// every pattern so a route that keeps constraining sorts first.
pub(crate) fn compare_sequences<H, M>(a: &[RouteNode<H, M>], b: &[RouteNode<H, M>]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| node_rank(x).cmp(&node_rank(y)))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn node_rank<H, M>(node: &RouteNode<H, M>) -> (u8, u8, u8) {
    match node {
        RouteNode::Pattern(pattern) => pattern_rank(pattern),
        RouteNode::Handler(_) => (u8::MAX, 0, 0),
    }
}

// Handlers are compatible with each other so that two routes reaching the
// same handler position are reported as duplicates.
fn mergeable<H, M>(a: &RouteNode<H, M>, b: &RouteNode<H, M>, fold_case: bool) -> bool {
    match (a, b) {
        (RouteNode::Handler(_), RouteNode::Handler(_)) => true,
        (RouteNode::Pattern(x), RouteNode::Pattern(y)) => {
            if fold_case {
                pattern_mergeable_ignore_case(x, y)
            } else {
                pattern_mergeable(x, y)
            }
        }
        _ => false,
    }
}

fn merge_level<H, M>(
    nodes: &mut Vec<TrieNode<H, M>>,
    mut sequences: Vec<Sequence<H, M>>,
    parent: Option<NodeId>,
    options: &RouterOptions,
) -> RouterResult<Vec<NodeId>> {
    sequences.sort_by(|a, b| compare_sequences(a, b));

    // Phase one: group sequences by a shared head.
    let mut groups: Vec<Group<H, M>> = Vec::new();
    for mut sequence in sequences {
        let Some(head) = sequence.first() else {
            continue;
        };

        let found = groups
            .iter()
            .position(|group| mergeable(&group.head, head, false));

        if found.is_none() && options.case_insensitive {
            if let Some(group) = groups
                .iter()
                .find(|group| mergeable(&group.head, head, true))
            {
                return Err(RouterError::CaseConflict {
                    route: trace_chain(nodes.as_slice(), parent, sequence.iter()),
                    existing: trace_chain(nodes.as_slice(), parent, group.representative()),
                });
            }
        }

        if sequence.len() == 1 {
            if let Some(index) = found {
                return Err(RouterError::DuplicateRoute {
                    route: trace_chain(nodes.as_slice(), parent, groups[index].representative()),
                });
            }
        }

        let tail = sequence.split_off(1);
        let Some(head) = sequence.pop() else {
            continue;
        };

        match found {
            Some(index) => groups[index].tails.push(tail),
            None => groups.push(Group {
                head,
                tails: if tail.is_empty() { Vec::new() } else { vec![tail] },
            }),
        }
    }

    // Phase two: allocate each node once, then merge its children under it.
    let mut ids = Vec::with_capacity(groups.len());
    for group in groups {
        let id = nodes.len();
        nodes.push(TrieNode {
            node: group.head,
            parent,
            children: Vec::new(),
        });
        let children = merge_level(nodes, group.tails, Some(id), options)?;
        nodes[id].children = children;
        ids.push(id);
    }

    tracing::event!(tracing::Level::TRACE, operation="merge", parent_id=?parent, nodes=ids.len() as u64);
    Ok(ids)
}
