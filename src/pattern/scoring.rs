use super::ast::{NodeKind, PatternNode};

// Unconstrained pair values accept the empty string too, so they sit just
// below an explicit variable.
const UNCONSTRAINED_VALUE_RANK: u8 = 3;

/// Absolute < Conditional < Variable < Null < Glob; lower is more specific.
pub fn kind_rank(kind: &NodeKind) -> u8 {
    match kind {
        NodeKind::Absolute { .. } => 0,
        NodeKind::Conditional { .. } => 1,
        NodeKind::Variable { .. } => 2,
        NodeKind::Null => 3,
        NodeKind::Glob { .. } => 4,
        NodeKind::Pair { key, .. } => kind_rank(&key.kind),
    }
}

pub fn pattern_rank(node: &PatternNode) -> (u8, u8, u8) {
    let value_rank = match &node.kind {
        NodeKind::Pair { value, .. } => value
            .as_ref()
            .map(|value| kind_rank(&value.kind))
            .unwrap_or(UNCONSTRAINED_VALUE_RANK),
        _ => 0,
    };
    (node.category as u8, kind_rank(&node.kind), value_rank)
}

/// Whether two nodes test exactly the same thing and can share a trie node.
pub fn pattern_mergeable(a: &PatternNode, b: &PatternNode) -> bool {
    compatible(a, b, false)
}

/// Same as [`pattern_mergeable`] with every piece of text lower-cased first.
pub fn pattern_mergeable_ignore_case(a: &PatternNode, b: &PatternNode) -> bool {
    compatible(a, b, true)
}

fn compatible(a: &PatternNode, b: &PatternNode, fold: bool) -> bool {
    if a.category != b.category {
        return false;
    }
    match (&a.kind, &b.kind) {
        (NodeKind::Null, NodeKind::Null) => true,
        (NodeKind::Absolute { text: ta }, NodeKind::Absolute { text: tb }) => {
            text_eq(ta, tb, fold)
        }
        (
            NodeKind::Conditional {
                name: na,
                source: sa,
            },
            NodeKind::Conditional {
                name: nb,
                source: sb,
            },
        )
        | (
            NodeKind::Variable {
                name: na,
                source: sa,
            },
            NodeKind::Variable {
                name: nb,
                source: sb,
            },
        ) => option_eq(na.as_deref(), nb.as_deref(), fold) && text_eq(sa, sb, fold),
        (
            NodeKind::Glob {
                name: na,
                source: sa,
            },
            NodeKind::Glob {
                name: nb,
                source: sb,
            },
        ) => {
            option_eq(na.as_deref(), nb.as_deref(), fold)
                && option_eq(sa.as_deref(), sb.as_deref(), fold)
        }
        (
            NodeKind::Pair {
                key: ka,
                value: va,
            },
            NodeKind::Pair {
                key: kb,
                value: vb,
            },
        ) => {
            compatible(ka, kb, fold)
                && match (va, vb) {
                    (None, None) => true,
                    (Some(va), Some(vb)) => compatible(va, vb, fold),
                    _ => false,
                }
        }
        _ => false,
    }
}

fn text_eq(a: &str, b: &str, fold: bool) -> bool {
    if fold {
        a.to_lowercase() == b.to_lowercase()
    } else {
        a == b
    }
}

fn option_eq(a: Option<&str>, b: Option<&str>, fold: bool) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => text_eq(a, b, fold),
        _ => false,
    }
}
