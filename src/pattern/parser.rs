use regex::Regex;

use crate::enums::Category;
use crate::pattern::ast::{
    ANY_PATTERN, DEFAULT_SEGMENT_PATTERN, DEFAULT_VALUE_PATTERN, NodeKind, PatternNode,
};
use crate::pattern::{PatternError, PatternResult};

const PATH_TERMINATORS: &[char] = &['/', '?', '#'];
const QUERY_KEY_TERMINATORS: &[char] = &['=', '&', '#'];
const QUERY_VALUE_TERMINATORS: &[char] = &['&', '#'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRule {
    Route,
    Method,
    HeaderKey,
    HeaderValue,
}

pub fn parse(pattern: &str, rule: StartRule) -> PatternResult<Vec<PatternNode>> {
    match rule {
        StartRule::Route => parse_route(pattern),
        StartRule::Method => parse_method(pattern).map(|node| vec![node]),
        StartRule::HeaderKey => parse_header_key(pattern).map(|node| vec![node]),
        StartRule::HeaderValue => parse_header_value(pattern).map(|node| vec![node]),
    }
}

/// Parses `path[?query][#fragment]`. The path is split on `/` the same way
/// request paths are, so `/a` yields an empty leading segment followed by `a`,
/// and is closed by a null segment node.
#[tracing::instrument(level = "trace", fields(pattern=%pattern))]
pub fn parse_route(pattern: &str) -> PatternResult<Vec<PatternNode>> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }
    PatternParser::new(pattern).parse_route()
}

pub fn parse_method(pattern: &str) -> PatternResult<PatternNode> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }
    if pattern == "*" {
        return Ok(any_node(Category::Method, pattern));
    }

    let kind = if let Some(inner) = pattern.strip_prefix('[') {
        let Some(source) = inner.strip_suffix(']') else {
            return Err(PatternError::UnterminatedGroup { column: 1 });
        };
        if source.is_empty() {
            return Err(PatternError::EmptyGroup { column: 1 });
        }
        validate_regex(source, 2)?;
        NodeKind::Conditional {
            name: None,
            source: source.to_string(),
        }
    } else if pattern.starts_with('(') {
        let mut parser = PatternParser::new(pattern);
        let source = parser.parse_group()?;
        parser.expect_end()?;
        NodeKind::Conditional { name: None, source }
    } else {
        for (idx, ch) in pattern.char_indices() {
            if !(is_method_char(ch) || ch == '|') {
                return Err(PatternError::UnexpectedCharacter {
                    found: ch,
                    column: idx + 1,
                });
            }
        }
        if let Some(idx) = find_empty_alternative(pattern) {
            return Err(PatternError::EmptyGroup { column: idx + 1 });
        }
        if pattern.contains('|') {
            NodeKind::Conditional {
                name: None,
                source: pattern.to_string(),
            }
        } else {
            NodeKind::Absolute {
                text: pattern.to_string(),
            }
        }
    };

    Ok(PatternNode::new(Category::Method, kind, pattern))
}

pub fn parse_header_key(pattern: &str) -> PatternResult<PatternNode> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }

    let kind = if pattern.starts_with('(') {
        let mut parser = PatternParser::new(pattern);
        let source = parser.parse_group()?;
        parser.expect_end()?;
        NodeKind::Conditional { name: None, source }
    } else {
        for (idx, ch) in pattern.char_indices() {
            if !is_token_char(ch) {
                return Err(PatternError::UnexpectedCharacter {
                    found: ch,
                    column: idx + 1,
                });
            }
        }
        NodeKind::Absolute {
            text: pattern.to_string(),
        }
    };

    Ok(PatternNode::new(Category::Header, kind, pattern))
}

/// Header values are literals unless they contain regex metacharacters, in
/// which case the whole text is the expression. `*` accepts any value.
pub fn parse_header_value(pattern: &str) -> PatternResult<PatternNode> {
    if pattern == "*" {
        return Ok(any_node(Category::Header, pattern));
    }

    let kind = if regex::escape(pattern) == pattern {
        NodeKind::Absolute {
            text: pattern.to_string(),
        }
    } else {
        validate_regex(pattern, 1)?;
        NodeKind::Conditional {
            name: None,
            source: pattern.to_string(),
        }
    };

    Ok(PatternNode::new(Category::Header, kind, pattern))
}

pub fn anchored(source: &str) -> String {
    format!("^(?:{})$", source)
}

fn validate_regex(source: &str, column: usize) -> PatternResult<()> {
    Regex::new(&anchored(source))
        .map(|_| ())
        .map_err(|err| PatternError::RegexInvalid {
            source_text: source.to_string(),
            error: err.to_string(),
            column,
        })
}

fn any_node(category: Category, raw: &str) -> PatternNode {
    PatternNode::new(
        category,
        NodeKind::Variable {
            name: None,
            source: ANY_PATTERN.to_string(),
        },
        raw,
    )
}

fn default_pattern(category: Category) -> &'static str {
    match category {
        Category::Segment => DEFAULT_SEGMENT_PATTERN,
        _ => DEFAULT_VALUE_PATTERN,
    }
}

fn is_method_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
        )
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn find_empty_alternative(pattern: &str) -> Option<usize> {
    let mut start = 0usize;
    for (idx, ch) in pattern.char_indices() {
        if ch == '|' {
            if idx == start {
                return Some(idx);
            }
            start = idx + 1;
        }
    }
    if start == pattern.len() {
        Some(start.saturating_sub(1))
    } else {
        None
    }
}

struct PatternParser<'a> {
    pattern: &'a str,
    chars: Vec<(usize, char)>,
    index: usize,
}

impl<'a> PatternParser<'a> {
    fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            chars: pattern.char_indices().collect(),
            index: 0,
        }
    }

    fn parse_route(&mut self) -> PatternResult<Vec<PatternNode>> {
        if self.peek() != Some('/') {
            return Err(PatternError::MissingLeadingSlash { column: 1 });
        }

        let mut nodes = Vec::new();
        loop {
            nodes.push(self.parse_element(Category::Segment, PATH_TERMINATORS, true)?);
            if self.peek() == Some('/') {
                self.next();
            } else {
                break;
            }
        }
        nodes.push(PatternNode::null(Category::Segment));

        if self.peek() == Some('?') {
            self.next();
            loop {
                nodes.push(self.parse_query_pair()?);
                if self.peek() == Some('&') {
                    self.next();
                } else {
                    break;
                }
            }
        }

        if self.peek() == Some('#') {
            self.next();
            nodes.push(self.parse_element(Category::Fragment, &[], false)?);
        }

        self.expect_end()?;
        Ok(nodes)
    }

    fn parse_element(
        &mut self,
        category: Category,
        terminators: &[char],
        allow_glob: bool,
    ) -> PatternResult<PatternNode> {
        let start = self.current_byte_index();
        let kind = match self.peek() {
            Some('*') if allow_glob => self.parse_glob(terminators)?,
            Some(':') => self.parse_parameter(category, terminators)?,
            Some('(') => {
                let source = self.parse_group()?;
                self.expect_boundary(terminators)?;
                NodeKind::Conditional { name: None, source }
            }
            _ => NodeKind::Absolute {
                text: self.parse_literal(terminators)?,
            },
        };
        Ok(PatternNode::new(category, kind, self.slice_from(start)))
    }

    fn parse_query_pair(&mut self) -> PatternResult<PatternNode> {
        let start = self.current_byte_index();
        let key_column = self.column();

        let key_kind = if self.peek() == Some('(') {
            let source = self.parse_group()?;
            self.expect_boundary(QUERY_KEY_TERMINATORS)?;
            NodeKind::Conditional { name: None, source }
        } else {
            let text = self.parse_literal(QUERY_KEY_TERMINATORS)?;
            if text.is_empty() {
                return Err(PatternError::EmptyKey { column: key_column });
            }
            NodeKind::Absolute { text }
        };
        let key = PatternNode::new(Category::Query, key_kind, self.slice_from(start));

        let value = if self.peek() == Some('=') {
            self.next();
            Some(Box::new(self.parse_element(
                Category::Query,
                QUERY_VALUE_TERMINATORS,
                false,
            )?))
        } else {
            None
        };

        Ok(PatternNode::new(
            Category::Query,
            NodeKind::Pair {
                key: Box::new(key),
                value,
            },
            self.slice_from(start),
        ))
    }

    fn parse_glob(&mut self, terminators: &[char]) -> PatternResult<NodeKind> {
        let column = self.column();
        self.expect('*');

        let name = if self.peek().is_some_and(is_name_char) {
            Some(self.parse_name(column)?)
        } else {
            None
        };
        let source = if self.peek() == Some('(') {
            Some(self.parse_group()?)
        } else {
            None
        };

        if !self.at_boundary(terminators) {
            return Err(PatternError::GlobNotWholeSegment {
                column: self.column(),
            });
        }

        Ok(NodeKind::Glob { name, source })
    }

    fn parse_parameter(
        &mut self,
        category: Category,
        terminators: &[char],
    ) -> PatternResult<NodeKind> {
        let column = self.column();
        self.expect(':');
        let name = self.parse_name(column)?;

        let kind = if self.peek() == Some('(') {
            NodeKind::Conditional {
                name: Some(name),
                source: self.parse_group()?,
            }
        } else {
            NodeKind::Variable {
                name: Some(name),
                source: default_pattern(category).to_string(),
            }
        };

        self.expect_boundary(terminators)?;
        Ok(kind)
    }

    fn parse_name(&mut self, column: usize) -> PatternResult<String> {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if is_name_char(ch) {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }

        match name.chars().next() {
            None => Err(PatternError::ParameterMissingName { column }),
            Some(first) if !(first.is_ascii_alphabetic() || first == '_') => {
                Err(PatternError::ParameterInvalidStart {
                    found: first,
                    name,
                    column,
                })
            }
            Some(_) => Ok(name),
        }
    }

    fn parse_group(&mut self) -> PatternResult<String> {
        let column = self.column();
        self.expect('(');
        let mut depth = 1usize;
        let mut source = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '\\' => {
                    let escaped = self.consume_escape_char()?;
                    source.push('\\');
                    source.push(escaped);
                    continue;
                }
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.next();
                        if source.is_empty() {
                            return Err(PatternError::EmptyGroup { column });
                        }
                        validate_regex(&source, column)?;
                        return Ok(source);
                    }
                }
                _ => {}
            }
            source.push(ch);
            self.next();
        }

        Err(PatternError::UnterminatedGroup { column })
    }

    fn parse_literal(&mut self, terminators: &[char]) -> PatternResult<String> {
        let mut literal = String::new();
        while let Some(ch) = self.peek() {
            if terminators.contains(&ch) {
                break;
            }
            match ch {
                '\\' => literal.push(self.consume_escape_char()?),
                '(' | ')' => {
                    return Err(PatternError::UnexpectedCharacter {
                        found: ch,
                        column: self.column(),
                    });
                }
                _ => {
                    literal.push(ch);
                    self.next();
                }
            }
        }
        Ok(literal)
    }

    fn at_boundary(&self, terminators: &[char]) -> bool {
        match self.peek() {
            None => true,
            Some(ch) => terminators.contains(&ch),
        }
    }

    fn expect_boundary(&self, terminators: &[char]) -> PatternResult<()> {
        if self.at_boundary(terminators) {
            Ok(())
        } else {
            Err(PatternError::MixedParameterLiteralSyntax {
                column: self.column(),
            })
        }
    }

    fn expect_end(&self) -> PatternResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(found) => Err(PatternError::UnexpectedCharacter {
                found,
                column: self.column(),
            }),
        }
    }

    fn expect(&mut self, expected: char) {
        let actual = self.next();
        debug_assert_eq!(Some(expected), actual);
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|(_, ch)| *ch)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.index += 1;
        }
        ch
    }

    fn current_byte_index(&self) -> usize {
        self.chars
            .get(self.index)
            .map(|(idx, _)| *idx)
            .unwrap_or(self.pattern.len())
    }

    fn column(&self) -> usize {
        self.current_byte_index() + 1
    }

    fn slice_from(&self, start: usize) -> &'a str {
        &self.pattern[start..self.current_byte_index()]
    }

    fn consume_escape_char(&mut self) -> PatternResult<char> {
        let column = self.column();
        self.expect('\\');
        self.next()
            .ok_or(PatternError::LoneEscapeCharacter { column })
    }
}
