use crate::enums::Category;
use crate::types::RouteIndex;

pub const DEFAULT_SEGMENT_PATTERN: &str = "[^/]+";
pub const DEFAULT_VALUE_PATTERN: &str = ".+";
pub const ANY_PATTERN: &str = ".*";

/// One token of a parsed route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternNode {
    pub category: Category,
    pub kind: NodeKind,
    /// Text the node was parsed from; only used to render traces.
    pub raw: String,
    pub order: RouteIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// End of the category's token stream.
    Null,
    Absolute {
        text: String,
    },
    Conditional {
        name: Option<String>,
        source: String,
    },
    Variable {
        name: Option<String>,
        source: String,
    },
    Glob {
        name: Option<String>,
        source: Option<String>,
    },
    /// Key/value constraint. A missing value accepts anything.
    Pair {
        key: Box<PatternNode>,
        value: Option<Box<PatternNode>>,
    },
}

impl PatternNode {
    pub fn new(category: Category, kind: NodeKind, raw: impl Into<String>) -> Self {
        Self {
            category,
            kind,
            raw: raw.into(),
            order: 0,
        }
    }

    pub fn null(category: Category) -> Self {
        Self::new(category, NodeKind::Null, "")
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind, NodeKind::Null)
    }

    pub fn is_empty_literal(&self) -> bool {
        matches!(&self.kind, NodeKind::Absolute { text } if text.is_empty())
    }

    pub fn set_order(&mut self, order: RouteIndex) {
        self.order = order;
        if let NodeKind::Pair { key, value } = &mut self.kind {
            key.set_order(order);
            if let Some(value) = value {
                value.set_order(order);
            }
        }
    }

    /// Name under which a matched token is captured, if any.
    pub fn capture_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Conditional { name, .. } | NodeKind::Variable { name, .. } => {
                name.as_deref()
            }
            NodeKind::Glob { name, .. } => Some(name.as_deref().unwrap_or("*")),
            _ => None,
        }
    }
}
