use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

use super::{CompiledRouter, RouterOptions, build};
use crate::errors::{RouterError, RouterResult};
use crate::matcher::{MatchOutcome, MatchState};
use crate::route::RouteSpec;
use crate::types::RouteIndex;

#[derive(Debug)]
struct RouterState<H, M> {
    pending: Vec<RouteSpec<H, M>>,
    compiled: OnceLock<Arc<CompiledRouter<H, M>>>,
}

/// Two-phase router: collect routes, then [`Router::seal`] them into a
/// compiled matcher that serves lookups.
#[derive(Debug)]
pub struct Router<H, M = ()> {
    options: RouterOptions,
    inner: RwLock<RouterState<H, M>>,
}

impl<H, M> Router<H, M> {
    pub fn new(options: Option<RouterOptions>) -> Self {
        Self {
            options: options.unwrap_or_default(),
            inner: RwLock::new(RouterState {
                pending: Vec::new(),
                compiled: OnceLock::new(),
            }),
        }
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub fn add(&self, spec: RouteSpec<H, M>) -> RouterResult<RouteIndex> {
        let mut guard = self.inner.write();

        if guard.compiled.get().is_some() {
            return Err(RouterError::AddWhileSealed { url: spec.url });
        }

        guard.pending.push(spec);
        Ok(guard.pending.len() - 1)
    }

    pub fn add_bulk<I>(&self, entries: I) -> RouterResult<Vec<RouteIndex>>
    where
        I: IntoIterator<Item = RouteSpec<H, M>>,
    {
        let mut guard = self.inner.write();

        if guard.compiled.get().is_some() {
            let count = entries.into_iter().count();
            return Err(RouterError::BulkAddWhileSealed { count });
        }

        let start = guard.pending.len();
        guard.pending.extend(entries);
        Ok((start..guard.pending.len()).collect())
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.read().compiled.get().is_some()
    }

    pub fn find(&self, state: &MatchState) -> RouterResult<MatchOutcome<H, M>> {
        let guard = self.inner.read();

        match guard.compiled.get() {
            Some(compiled) => Ok(compiled.find(state)),
            None => Err(RouterError::FindWhileMutable),
        }
    }

    pub fn find_request<I, K, V>(
        &self,
        method: &str,
        uri: &str,
        headers: I,
    ) -> RouterResult<MatchOutcome<H, M>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.find(&MatchState::from_request(method, uri, headers))
    }

    pub fn compiled(&self) -> RouterResult<Arc<CompiledRouter<H, M>>> {
        let guard = self.inner.read();

        match guard.compiled.get() {
            Some(compiled) => Ok(Arc::clone(compiled)),
            None => Err(RouterError::CompiledUnavailable),
        }
    }
}

impl<H: Clone, M: Clone> Router<H, M> {
    /// Compiles the pending routes. When compilation fails the pending table
    /// is kept and the router stays unsealed.
    pub fn seal(&self) -> RouterResult<()> {
        let mut guard = self.inner.write();

        if guard.compiled.get().is_some() {
            return Err(RouterError::AlreadySealed);
        }

        let compiled = build(guard.pending.iter().cloned(), &self.options)?;
        guard.pending.clear();
        let _ = guard.compiled.set(Arc::new(compiled));
        Ok(())
    }
}
