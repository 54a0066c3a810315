//! Shared helpers for integration tests.
//!
//! `Recorder` is a registry that records every call verbatim, so tests can inspect
//! titles, variants and the wrapped tests without a real host.

#![allow(dead_code)]

use each_case::{Arg, Error, Registry, SuiteBody, WrappedTest};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Which registry entry point was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    It,
    Skip,
    OnlySuite,
}

pub struct Recorder<C, R> {
    calls: Mutex<Vec<(Call, String)>>,
    tests: Mutex<Vec<WrappedTest<C, R>>>,
    suites: Mutex<Vec<SuiteBody>>,
    supports_variants: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<C, R> Recorder<C, R> {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            tests: Mutex::new(Vec::new()),
            suites: Mutex::new(Vec::new()),
            supports_variants: true,
        }
    }

    /// A recorder that only offers the plain `it` entry point.
    pub fn plain_only() -> Self {
        Self {
            supports_variants: false,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<(Call, String)> {
        lock(&self.calls).clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, title)| title).collect()
    }

    pub fn tests(&self) -> Vec<WrappedTest<C, R>> {
        lock(&self.tests).clone()
    }

    /// Runs every deferred exclusive-suite body recorded so far.
    pub fn run_suites(&self) -> Result<(), Error> {
        let suites = std::mem::take(&mut *lock(&self.suites));
        for suite in suites {
            suite()?;
        }
        Ok(())
    }
}

impl<C: 'static, R: 'static> Registry for Recorder<C, R> {
    type Context = C;
    type Output = R;

    fn it(&self, title: String, test: WrappedTest<C, R>) -> Result<(), Error> {
        lock(&self.calls).push((Call::It, title));
        lock(&self.tests).push(test);
        Ok(())
    }

    fn skip(&self, title: String, test: WrappedTest<C, R>) -> Result<(), Error> {
        if !self.supports_variants {
            return Err(Error::UnsupportedVariant { variant: "skip" });
        }
        lock(&self.calls).push((Call::Skip, title));
        lock(&self.tests).push(test);
        Ok(())
    }

    fn only_suite(&self, title: String, suite: SuiteBody) -> Result<(), Error> {
        if !self.supports_variants {
            return Err(Error::UnsupportedVariant { variant: "only" });
        }
        lock(&self.calls).push((Call::OnlySuite, title));
        lock(&self.suites).push(suite);
        Ok(())
    }
}

/// Renders an argument list as short labels: values by display, `cb`, `undefined`.
pub fn labels(args: &[Arg]) -> Vec<String> {
    args.iter()
        .map(|arg| match arg {
            Arg::Value(v) => v.to_string(),
            Arg::Done(_) => "cb".to_string(),
            Arg::Undefined => "undefined".to_string(),
        })
        .collect()
}
