use hashbrown::HashMap as FastHashMap;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

use super::{Matcher, Test};
use crate::enums::Category;
use crate::errors::{RouterError, RouterResult};
use crate::pattern::{ANY_PATTERN, NodeKind, PatternError, PatternNode, anchored};
use crate::route::RouteNode;
use crate::router::RouterOptions;
use crate::trie::{NodeId, Trie};

/// Lowers a merged trie into a combinator graph. Identical regex sources are
/// compiled once and shared between nodes.
pub(crate) struct Compiler<'o> {
    options: &'o RouterOptions,
    regex_cache: FastHashMap<Box<str>, Arc<Regex>>,
}

impl<'o> Compiler<'o> {
    pub(crate) fn new(options: &'o RouterOptions) -> Self {
        Self {
            options,
            regex_cache: FastHashMap::new(),
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(nodes = trie.nodes.len() as u64))]
    pub(crate) fn compile<H, M>(&mut self, trie: &Trie<H, M>) -> RouterResult<Matcher<H, M>> {
        let root = self.compile_forest(trie, &trie.roots)?;
        tracing::event!(
            tracing::Level::TRACE,
            operation = "compile",
            regexes = self.regex_cache.len() as u64
        );
        Ok(root)
    }

    fn compile_forest<H, M>(
        &mut self,
        trie: &Trie<H, M>,
        ids: &[NodeId],
    ) -> RouterResult<Matcher<H, M>> {
        let alternatives = ids
            .iter()
            .map(|&id| self.compile_node(trie, id))
            .collect::<RouterResult<Vec<_>>>()?;
        Ok(Matcher::choice(alternatives))
    }

    fn compile_node<H, M>(&mut self, trie: &Trie<H, M>, id: NodeId) -> RouterResult<Matcher<H, M>> {
        let entry = trie.node(id);
        let pattern = match &entry.node {
            RouteNode::Handler(endpoint) => return Ok(Matcher::Terminal(Arc::clone(endpoint))),
            RouteNode::Pattern(pattern) => pattern,
        };

        let children = if entry.children.is_empty() {
            None
        } else {
            Some(self.compile_forest(trie, &entry.children)?)
        };

        let own = match &pattern.kind {
            NodeKind::Null => {
                let end = Matcher::Satisfy(pattern.category);
                if self.options.trim && pattern.category == Category::Segment {
                    Matcher::Absorb {
                        slot: Category::Segment,
                        test: Test::Equals("".into()),
                    }
                    .then(end)
                } else {
                    end
                }
            }
            NodeKind::Glob { .. } => {
                // The run has to see its continuation to give segments back.
                let next = children.unwrap_or_else(|| Matcher::Choice(Vec::new()));
                return Ok(Matcher::SegmentsRun {
                    test: self.test(pattern)?,
                    capture: pattern.capture_name().map(Arc::from),
                    next: Box::new(next),
                });
            }
            NodeKind::Pair { key, value } => {
                // Same as a glob: another candidate pair is tried when the
                // continuation fails.
                let next = children.unwrap_or_else(|| Matcher::Choice(Vec::new()));
                return Ok(Matcher::Pair {
                    slot: pattern.category,
                    key: self.test(key)?,
                    value: match value {
                        Some(value) => self.test(value)?,
                        None => Test::Any,
                    },
                    capture: value
                        .as_deref()
                        .and_then(PatternNode::capture_name)
                        .map(Arc::from),
                    next: Box::new(next),
                });
            }
            NodeKind::Absolute { .. } | NodeKind::Conditional { .. } | NodeKind::Variable { .. } => {
                Matcher::Token {
                    slot: pattern.category,
                    test: self.test(pattern)?,
                    capture: pattern.capture_name().map(Arc::from),
                }
            }
        };

        Ok(match children {
            Some(next) => own.then(next),
            None => own,
        })
    }

    fn test(&mut self, node: &PatternNode) -> RouterResult<Test> {
        let source = match &node.kind {
            NodeKind::Absolute { text } => {
                return Ok(if self.options.case_insensitive {
                    Test::EqualsIgnoreCase(text.to_lowercase().into())
                } else {
                    Test::Equals(text.as_str().into())
                });
            }
            NodeKind::Conditional { source, .. } | NodeKind::Variable { source, .. } => source,
            NodeKind::Glob {
                source: Some(source),
                ..
            } => source,
            NodeKind::Glob { source: None, .. } | NodeKind::Null | NodeKind::Pair { .. } => {
                return Ok(Test::Any);
            }
        };

        if source == ANY_PATTERN {
            return Ok(Test::Any);
        }
        self.regex(source, &node.raw).map(Test::Regex)
    }

    fn regex(&mut self, source: &str, raw: &str) -> RouterResult<Arc<Regex>> {
        if let Some(cached) = self.regex_cache.get(source) {
            return Ok(Arc::clone(cached));
        }

        let regex = RegexBuilder::new(&anchored(source))
            .case_insensitive(self.options.case_insensitive)
            .build()
            .map_err(|err| {
                RouterError::pattern(
                    raw,
                    PatternError::RegexInvalid {
                        source_text: source.to_string(),
                        error: err.to_string(),
                        column: 1,
                    },
                )
            })?;

        let regex = Arc::new(regex);
        self.regex_cache.insert(source.into(), Arc::clone(&regex));
        Ok(regex)
    }
}
