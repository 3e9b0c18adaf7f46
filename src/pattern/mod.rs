mod ast;
mod error;
mod parser;
mod scoring;

pub use ast::{
    ANY_PATTERN, DEFAULT_SEGMENT_PATTERN, DEFAULT_VALUE_PATTERN, NodeKind, PatternNode,
};
pub use error::{PatternError, PatternResult};
pub use parser::{
    StartRule, anchored, parse, parse_header_key, parse_header_value, parse_method, parse_route,
};
pub use scoring::{kind_rank, pattern_mergeable, pattern_mergeable_ignore_case, pattern_rank};
