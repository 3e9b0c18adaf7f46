pub mod enums;
pub mod errors;
pub mod matcher;
pub mod pattern;
pub mod route;
pub mod router;
mod trie;
pub mod types;

pub use enums::Category;
pub use errors::{RouterError, RouterResult};
pub use matcher::{MatchOutcome, MatchState, Matcher, RequestParts, RouteMatch, Test};
pub use pattern::{PatternError, PatternNode};
pub use route::{ANY_METHOD, RouteNode, RouteSpec};
pub use router::{CompiledRouter, Router, RouterOptions, RouterOptionsBuilder, build};
pub use trie::format_trace;
pub use types::{CapturedParam, Endpoint, RouteIndex};
