use super::{CaseContext, CaseResult};
use crate::errors::Error;
use crate::registry::{Registry, SuiteBody, WrappedTest};
use log::debug;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A case as recorded by the suite.
#[derive(Debug, Clone)]
pub struct RegisteredCase {
    pub title: String,
    pub test: WrappedTest<CaseContext, CaseResult>,
    /// Registered through `skip`; the host must not call it.
    pub skipped: bool,
    /// Registered while an exclusive suite body was running.
    pub exclusive: bool,
}

#[derive(Default)]
struct SuiteState {
    cases: Vec<RegisteredCase>,
    pending: VecDeque<(String, SuiteBody)>,
    exclusive_suites: usize,
    in_exclusive: bool,
}

/// In-process registry that records cases in registration order.
#[derive(Default)]
pub struct Suite {
    state: Mutex<SuiteState>,
}

/// Marks registrations as exclusive until dropped, including on unwind.
struct ExclusiveScope<'a> {
    suite: &'a Suite,
}

impl<'a> ExclusiveScope<'a> {
    fn enter(suite: &'a Suite) -> Self {
        suite.state().in_exclusive = true;
        Self { suite }
    }
}

impl Drop for ExclusiveScope<'_> {
    fn drop(&mut self) {
        self.suite.state().in_exclusive = false;
    }
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SuiteState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, title: String, test: WrappedTest<CaseContext, CaseResult>, skipped: bool) {
        let mut state = self.state();
        let exclusive = state.in_exclusive;
        debug!("suite recorded {title:?} (skipped: {skipped}, exclusive: {exclusive})");
        state.cases.push(RegisteredCase {
            title,
            test,
            skipped,
            exclusive,
        });
    }

    /// Titles of every registered case, in registration order.
    pub fn titles(&self) -> Vec<String> {
        self.state().cases.iter().map(|c| c.title.clone()).collect()
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.state().cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every registered case, in registration order.
    pub fn cases(&self) -> Vec<RegisteredCase> {
        self.state().cases.clone()
    }

    /// Number of exclusive suites registered so far, expanded or not.
    pub fn exclusive_suites(&self) -> usize {
        self.state().exclusive_suites
    }

    /// Exclusive suites whose bodies have not run yet.
    pub fn pending_suites(&self) -> usize {
        self.state().pending.len()
    }

    fn next_pending(&self) -> Option<(String, SuiteBody)> {
        self.state().pending.pop_front()
    }

    /// Runs deferred exclusive-suite bodies, oldest first. Cases they register are
    /// exclusive.
    ///
    /// Bodies run without the suite lock held, so they may register freely. When a
    /// body fails, the suites after it stay pending for the next call.
    pub fn expand_suites(&self) -> Result<(), Error> {
        while let Some((title, body)) = self.next_pending() {
            debug!("expanding exclusive suite {title:?}");
            let _scope = ExclusiveScope::enter(self);
            body()?;
        }
        Ok(())
    }

    /// Expands exclusive suites, then returns the cases a host should consider.
    ///
    /// When any exclusive suite exists only exclusive cases are returned. Skipped
    /// cases are included with their flag set.
    pub fn selected(&self) -> Result<Vec<RegisteredCase>, Error> {
        self.expand_suites()?;
        let state = self.state();
        let only = state.exclusive_suites > 0;
        Ok(state
            .cases
            .iter()
            .filter(|case| !only || case.exclusive)
            .cloned()
            .collect())
    }
}

impl Registry for Suite {
    type Context = CaseContext;
    type Output = CaseResult;

    fn it(&self, title: String, test: WrappedTest<CaseContext, CaseResult>) -> Result<(), Error> {
        self.record(title, test, false);
        Ok(())
    }

    fn skip(&self, title: String, test: WrappedTest<CaseContext, CaseResult>) -> Result<(), Error> {
        self.record(title, test, true);
        Ok(())
    }

    fn only_suite(&self, title: String, suite: SuiteBody) -> Result<(), Error> {
        let mut state = self.state();
        state.exclusive_suites += 1;
        state.pending.push_back((title, suite));
        Ok(())
    }
}
