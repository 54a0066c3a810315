//! # Host Registries
//!
//! A [`Registry`] is the host test framework's registration primitive: it accepts a
//! title and a [`WrappedTest`] and registers one test case. The `skip` and exclusive
//! suite variants are optional; hosts that lack them keep the default methods, which
//! report [`Error::UnsupportedVariant`].
//!
//! Registries are handed to the engine explicitly (`each_with`) or through the
//! process-wide slot in [`crate::ambient`].

use crate::args::{Arg, Done};
use crate::arity::{Invocation, Mode};
use crate::body::TestBody;
use crate::errors::Error;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Deferred body of an exclusive suite, run by the host if and when it runs the suite.
pub type SuiteBody = Box<dyn FnOnce() -> Result<(), Error> + Send>;

/// A registry shared between the engine and deferred suite bodies.
pub type SharedRegistry<C, R> = Arc<dyn Registry<Context = C, Output = R>>;

/// Registration primitive of a host test framework.
pub trait Registry: Send + Sync {
    /// Invocation context the host passes to every test (`this`).
    type Context: 'static;
    /// What test bodies return to the host.
    type Output: 'static;

    /// Registers a test case.
    fn it(&self, title: String, test: WrappedTest<Self::Context, Self::Output>) -> Result<(), Error>;

    /// Registers a test case that the host must not run.
    fn skip(
        &self,
        _title: String,
        _test: WrappedTest<Self::Context, Self::Output>,
    ) -> Result<(), Error> {
        Err(Error::UnsupportedVariant { variant: "skip" })
    }

    /// Registers an exclusive suite: when the host runs it, only exclusive tests run.
    fn only_suite(&self, _title: String, _suite: SuiteBody) -> Result<(), Error> {
        Err(Error::UnsupportedVariant { variant: "only" })
    }
}

/// One generated test case, ready for the host to call.
pub struct WrappedTest<C, R> {
    invocation: Invocation,
    body: TestBody<C, R>,
}

impl<C, R> WrappedTest<C, R> {
    pub fn new(invocation: Invocation, body: TestBody<C, R>) -> Self {
        Self { invocation, body }
    }

    /// True when the body runs in async mode and wants the host's completion callback.
    pub fn expects_done(&self) -> bool {
        self.invocation.mode() == Mode::Async
    }

    /// The row's normalized values.
    pub fn values(&self) -> &[Value] {
        self.invocation.values()
    }

    /// The exact arguments the body would receive for the given callback.
    pub fn arguments(&self, done: Option<Done>) -> Vec<Arg> {
        self.invocation.arguments(done)
    }

    /// Runs the test body with the host's context and completion callback, returning
    /// the body's result unchanged.
    pub fn call(&self, ctx: &mut C, done: Option<Done>) -> R {
        self.body.invoke(ctx, self.invocation.arguments(done))
    }
}

impl<C, R> Clone for WrappedTest<C, R> {
    fn clone(&self) -> Self {
        Self {
            invocation: self.invocation.clone(),
            body: self.body.clone(),
        }
    }
}

impl<C, R> fmt::Debug for WrappedTest<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedTest")
            .field("invocation", &self.invocation)
            .field("body", &self.body)
            .finish()
    }
}
