mod combinator;
mod compile;
mod engine;
mod state;

pub use combinator::{Matcher, Test};
pub(crate) use compile::Compiler;
pub use engine::{MatchOutcome, RouteMatch};
pub use state::{MatchState, RequestParts};
