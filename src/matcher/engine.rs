use std::sync::Arc;

use super::{Matcher, MatchState};
use crate::types::{CapturedParam, Endpoint};

/// Result of one matcher step: the state after consumption and, once a
/// terminal was reached, its endpoint.
#[derive(Debug)]
pub(crate) struct Step<'m, H, M> {
    endpoint: Option<&'m Arc<Endpoint<H, M>>>,
    state: MatchState,
}

impl<'m, H, M> Step<'m, H, M> {
    fn bare(state: MatchState) -> Self {
        Step {
            endpoint: None,
            state,
        }
    }
}

impl<H, M> Matcher<H, M> {
    /// Runs the graph against `state`, returning the first terminal reached
    /// in specificity order.
    pub fn execute(&self, state: &MatchState) -> MatchOutcome<H, M> {
        match self.run(state) {
            Some(Step {
                endpoint: Some(endpoint),
                state,
            }) => MatchOutcome::Matched(RouteMatch {
                endpoint: Arc::clone(endpoint),
                state,
            }),
            _ => MatchOutcome::NotMatched,
        }
    }

    pub(crate) fn run(&self, state: &MatchState) -> Option<Step<'_, H, M>> {
        match self {
            Matcher::Satisfy(slot) => state
                .is_exhausted(*slot)
                .then(|| Step::bare(state.clone())),
            Matcher::Token {
                slot,
                test,
                capture,
            } => {
                let token = state.peek(*slot)?;
                if !test.accepts(token) {
                    return None;
                }
                Some(Step::bare(state.advance(*slot, capture.as_ref())))
            }
            Matcher::Absorb { slot, test } => match state.peek(*slot) {
                None => Some(Step::bare(state.clone())),
                Some(token) if test.accepts(token) => {
                    Some(Step::bare(state.advance(*slot, None)))
                }
                Some(_) => None,
            },
            Matcher::Pair {
                slot,
                key,
                value,
                capture,
                next,
            } => state
                .matching_pairs(*slot, key, value)
                .into_iter()
                .find_map(|position| {
                    next.run(&state.take_pair(*slot, position, capture.as_ref()))
                }),
            Matcher::Sequence(first, next) => {
                let step = first.run(state)?;
                next.run(&step.state)
            }
            Matcher::Choice(alternatives) => alternatives.iter().find_map(|alt| alt.run(state)),
            Matcher::SegmentsRun {
                test,
                capture,
                next,
            } => {
                let longest = state
                    .remaining_segments()
                    .iter()
                    .take_while(|segment| test.accepts(segment))
                    .count();
                (0..=longest).rev().find_map(|take| {
                    next.run(&state.advance_segments(take, capture.as_ref()))
                })
            }
            Matcher::Terminal(endpoint) => Some(Step {
                endpoint: Some(endpoint),
                state: state.clone(),
            }),
        }
    }
}

#[derive(Debug)]
pub enum MatchOutcome<H, M = ()> {
    Matched(RouteMatch<H, M>),
    NotMatched,
}

impl<H, M> MatchOutcome<H, M> {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }

    pub fn as_match(&self) -> Option<&RouteMatch<H, M>> {
        match self {
            MatchOutcome::Matched(found) => Some(found),
            MatchOutcome::NotMatched => None,
        }
    }

    pub fn into_match(self) -> Option<RouteMatch<H, M>> {
        match self {
            MatchOutcome::Matched(found) => Some(found),
            MatchOutcome::NotMatched => None,
        }
    }

    pub fn handler(&self) -> Option<&H> {
        self.as_match().map(RouteMatch::handler)
    }
}

/// A successful match: the endpoint reached and the final state.
#[derive(Debug)]
pub struct RouteMatch<H, M = ()> {
    endpoint: Arc<Endpoint<H, M>>,
    state: MatchState,
}

impl<H, M> RouteMatch<H, M> {
    pub fn handler(&self) -> &H {
        &self.endpoint.handler
    }

    pub fn middleware(&self) -> Option<&M> {
        self.endpoint.middleware.as_ref()
    }

    /// Declaration index of the matched route.
    pub fn order(&self) -> usize {
        self.endpoint.order
    }

    pub fn endpoint(&self) -> &Arc<Endpoint<H, M>> {
        &self.endpoint
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn params(&self) -> Vec<CapturedParam> {
        self.state.params()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.state.param(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Category;
    use crate::matcher::{RequestParts, Test};

    fn endpoint(handler: &'static str, order: usize) -> Arc<Endpoint<&'static str>> {
        Arc::new(Endpoint::new(handler, None, order))
    }

    fn literal(text: &str) -> Matcher<&'static str> {
        Matcher::Token {
            slot: Category::Segment,
            test: Test::Equals(text.into()),
            capture: None,
        }
    }

    fn end(handler: &'static str) -> Matcher<&'static str> {
        Matcher::Satisfy(Category::Segment).then(Matcher::Terminal(endpoint(handler, 0)))
    }

    fn state(path: &str) -> MatchState {
        MatchState::new(RequestParts::new("GET").path(path))
    }

    #[test]
    fn choice_backtracks_after_failed_alternative() {
        let matcher = literal("").then(Matcher::choice(vec![
            literal("users").then(literal("me")).then(end("me")),
            literal("users").then(end("list")),
        ]));

        let outcome = matcher.execute(&state("/users"));
        assert_eq!(outcome.handler(), Some(&"list"));
    }

    #[test]
    fn segments_run_gives_back_until_tail_matches() {
        let matcher = literal("").then(Matcher::SegmentsRun {
            test: Test::Any,
            capture: Some(Arc::from("*")),
            next: Box::new(literal("edit").then(end("edit"))),
        });

        let found = matcher
            .execute(&state("/a/b/edit"))
            .into_match()
            .expect("should match");
        assert_eq!(found.param("*"), Some("a/b"));
    }

    #[test]
    fn segments_run_stops_at_rejected_segment() {
        let digits = regex::Regex::new("^[0-9]+$").expect("regex");
        let matcher = literal("").then(Matcher::SegmentsRun {
            test: Test::Regex(Arc::new(digits)),
            capture: Some(Arc::from("ids")),
            next: Box::new(end("ids")),
        });

        assert!(matcher.execute(&state("/1/2/3")).is_matched());
        assert!(!matcher.execute(&state("/1/x/3")).is_matched());
    }

    #[test]
    fn pair_retries_next_candidate_when_tail_fails() {
        let key = || Test::Equals("a".into());
        let matcher = Matcher::Pair {
            slot: Category::Query,
            key: key(),
            value: Test::Any,
            capture: Some(Arc::from("x")),
            next: Box::new(Matcher::Pair {
                slot: Category::Query,
                key: key(),
                value: Test::Equals("1".into()),
                capture: None,
                next: Box::new(Matcher::Terminal(endpoint("pairs", 0))),
            }),
        };

        let request = RequestParts::new("GET")
            .query_pair("a", "1")
            .query_pair("a", "2");
        let found = matcher
            .execute(&MatchState::new(request))
            .into_match()
            .expect("second assignment should match");
        assert_eq!(found.param("x"), Some("2"));
        assert!(found.state().remaining_query().next().is_none());
    }

    #[test]
    fn absorb_passes_through_when_exhausted() {
        let matcher = literal("")
            .then(literal("foo"))
            .then(Matcher::Absorb {
                slot: Category::Segment,
                test: Test::Equals("".into()),
            })
            .then(end("foo"));

        assert!(matcher.execute(&state("/foo")).is_matched());
        assert!(matcher.execute(&state("/foo/")).is_matched());
        assert!(!matcher.execute(&state("/foo/bar")).is_matched());
    }

    #[test]
    fn failed_match_leaves_input_untouched() {
        let matcher = literal("").then(literal("nope")).then(end("nope"));
        let input = state("/users");
        assert!(!matcher.execute(&input).is_matched());
        assert_eq!(input.remaining_segments().len(), 2);
    }
}
