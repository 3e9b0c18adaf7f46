use crate::pattern::PatternError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("in pattern `{pattern}`, {source}")]
    PatternSyntax {
        pattern: String,
        column: Option<usize>,
        source: PatternError,
    },
    #[error("header must be a string, an object or an array of those (found {found})")]
    InvalidHeaderSpec { found: String },
    #[error("duplicate route `{route}`")]
    DuplicateRoute { route: String },
    #[error("case conflict `{route}` vs `{existing}`")]
    CaseConflict { route: String, existing: String },
    #[error("router is sealed; cannot add route '{url}'")]
    AddWhileSealed { url: String },
    #[error("router is sealed; cannot add {count} routes in bulk")]
    BulkAddWhileSealed { count: usize },
    #[error("router is already sealed")]
    AlreadySealed,
    #[error("router is not sealed; cannot perform route lookup")]
    FindWhileMutable,
    #[error("router is not sealed; compiled matcher is unavailable")]
    CompiledUnavailable,
}

impl RouterError {
    pub(crate) fn pattern(pattern: &str, source: PatternError) -> Self {
        RouterError::PatternSyntax {
            pattern: pattern.to_string(),
            column: source.column(),
            source,
        }
    }
}

pub type RouterResult<T> = Result<T, RouterError>;
