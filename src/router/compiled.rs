use super::RouterOptions;
use crate::errors::RouterResult;
use crate::matcher::{Compiler, MatchOutcome, MatchState, Matcher, RouteMatch};
use crate::route::{RouteSpec, normalize};
use crate::trie::merge_routes;

/// Immutable result of [`build`]. Matching only reads the graph, so one
/// instance can serve any number of threads.
#[derive(Debug)]
pub struct CompiledRouter<H, M = ()> {
    root: Matcher<H, M>,
    routes: Vec<String>,
    options: RouterOptions,
}

/// Normalizes, merges and compiles `routes` into a matcher. Routes are
/// indexed in iteration order; that index breaks specificity ties.
#[tracing::instrument(
    level = "trace",
    skip_all,
    fields(trim = options.trim, case_insensitive = options.case_insensitive)
)]
pub fn build<H, M, I>(routes: I, options: &RouterOptions) -> RouterResult<CompiledRouter<H, M>>
where
    I: IntoIterator<Item = RouteSpec<H, M>>,
{
    let sequences = routes
        .into_iter()
        .enumerate()
        .map(|(order, spec)| normalize(spec, order, options))
        .collect::<RouterResult<Vec<_>>>()?;

    let trie = merge_routes(sequences, options)?;
    let routes: Vec<String> = trie
        .handlers()
        .into_iter()
        .map(|id| trie.trace(id))
        .collect();

    if options.debug {
        for route in &routes {
            tracing::debug!(route = %route, "declared route");
        }
    }

    let root = Compiler::new(options).compile(&trie)?;
    tracing::event!(
        tracing::Level::TRACE,
        operation = "build",
        routes = routes.len() as u64
    );

    Ok(CompiledRouter {
        root,
        routes,
        options: *options,
    })
}

impl<H, M> CompiledRouter<H, M> {
    pub fn find(&self, state: &MatchState) -> MatchOutcome<H, M> {
        let outcome = self.root.execute(state);
        tracing::event!(
            tracing::Level::TRACE,
            operation = "find",
            matched = outcome.is_matched()
        );
        outcome
    }

    /// Parses `uri` into path, query and fragment and matches it together
    /// with `method` and `headers`.
    pub fn find_request<I, K, V>(&self, method: &str, uri: &str, headers: I) -> MatchOutcome<H, M>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.find(&MatchState::from_request(method, uri, headers))
    }

    /// Continuation-style entry point: exactly one of the callbacks runs.
    pub fn dispatch<R>(
        &self,
        state: &MatchState,
        on_match: impl FnOnce(RouteMatch<H, M>) -> R,
        on_miss: impl FnOnce() -> R,
    ) -> R {
        match self.find(state) {
            MatchOutcome::Matched(found) => on_match(found),
            MatchOutcome::NotMatched => on_miss(),
        }
    }

    /// Trace of every route in the order the matcher tries them.
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub fn matcher(&self) -> &Matcher<H, M> {
        &self.root
    }
}
