use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,
    #[error("route pattern must start with '/' at column {column}")]
    MissingLeadingSlash { column: usize },
    #[error("unexpected character '{found}' at column {column}")]
    UnexpectedCharacter { found: char, column: usize },
    #[error("group opened at column {column} is never closed")]
    UnterminatedGroup { column: usize },
    #[error("group at column {column} is empty")]
    EmptyGroup { column: usize },
    #[error("key at column {column} is empty")]
    EmptyKey { column: usize },
    #[error("parameter at column {column} is missing a name")]
    ParameterMissingName { column: usize },
    #[error(
        "parameter name '{name}' must start with an alphabetic character or underscore (found '{found}') at column {column}"
    )]
    ParameterInvalidStart {
        name: String,
        found: char,
        column: usize,
    },
    #[error("segment mixes parameter and literal syntax at column {column}")]
    MixedParameterLiteralSyntax { column: usize },
    #[error("glob must span a whole segment (literal found at column {column})")]
    GlobNotWholeSegment { column: usize },
    #[error("dangling escape character at column {column}")]
    LoneEscapeCharacter { column: usize },
    #[error("invalid regular expression '{source_text}' at column {column}: {error}")]
    RegexInvalid {
        source_text: String,
        error: String,
        column: usize,
    },
}

impl PatternError {
    /// One-based column where parsing stopped, when the failure has one.
    pub fn column(&self) -> Option<usize> {
        match self {
            PatternError::Empty => None,
            PatternError::MissingLeadingSlash { column }
            | PatternError::UnexpectedCharacter { column, .. }
            | PatternError::UnterminatedGroup { column }
            | PatternError::EmptyGroup { column }
            | PatternError::EmptyKey { column }
            | PatternError::ParameterMissingName { column }
            | PatternError::ParameterInvalidStart { column, .. }
            | PatternError::MixedParameterLiteralSyntax { column }
            | PatternError::GlobNotWholeSegment { column }
            | PatternError::LoneEscapeCharacter { column }
            | PatternError::RegexInvalid { column, .. } => Some(*column),
        }
    }
}

pub type PatternResult<T> = Result<T, PatternError>;
