//! Test bodies and their declared arity.
//!
//! A body receives the host's invocation context as `&mut C` followed by its
//! positional [`Arg`]s, and returns whatever the host expects (`R`) unchanged.
//!
//! Closures taking `&mut C` and zero to eight `Arg` parameters convert into a
//! [`TestBody`] through [`IntoTestBody`]; their parameter count is the arity used by
//! [`crate::arity::infer_mode`]. Bodies that want the raw argument list use
//! [`TestBody::new`] (explicit arity) or [`TestBody::variadic`] (no arity).

use crate::args::Arg;
use std::fmt;
use std::sync::Arc;

type BodyFn<C, R> = dyn Fn(&mut C, Vec<Arg>) -> R + Send + Sync;

/// A user test function with a fixed declared parameter count.
pub struct TestBody<C, R> {
    arity: Option<usize>,
    call: Arc<BodyFn<C, R>>,
}

impl<C, R> TestBody<C, R> {
    /// A body over the raw argument list that declares `arity` parameters.
    ///
    /// ```rust
    /// use each_case::{Arg, TestBody};
    /// let body: TestBody<(), usize> = TestBody::new(2, |_ctx, args: Vec<Arg>| args.len());
    /// assert_eq!(body.arity(), Some(2));
    /// ```
    pub fn new<F>(arity: usize, f: F) -> Self
    where
        F: Fn(&mut C, Vec<Arg>) -> R + Send + Sync + 'static,
    {
        Self {
            arity: Some(arity),
            call: Arc::new(f),
        }
    }

    /// A body with no declared arity; always runs in sync mode unless overridden.
    pub fn variadic<F>(f: F) -> Self
    where
        F: Fn(&mut C, Vec<Arg>) -> R + Send + Sync + 'static,
    {
        Self {
            arity: None,
            call: Arc::new(f),
        }
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    /// Calls the body, passing the context through and returning its result as is.
    pub fn invoke(&self, ctx: &mut C, args: Vec<Arg>) -> R {
        (self.call)(ctx, args)
    }
}

impl<C, R> Clone for TestBody<C, R> {
    fn clone(&self) -> Self {
        Self {
            arity: self.arity,
            call: Arc::clone(&self.call),
        }
    }
}

impl<C, R> fmt::Debug for TestBody<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestBody")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Conversion into a [`TestBody`]. `Marker` only disambiguates closure arities.
pub trait IntoTestBody<C, R, Marker> {
    fn into_test_body(self) -> TestBody<C, R>;
}

/// Marker for bodies that are already [`TestBody`] values.
pub enum Explicit {}

impl<C, R> IntoTestBody<C, R, Explicit> for TestBody<C, R> {
    fn into_test_body(self) -> TestBody<C, R> {
        self
    }
}

macro_rules! arg_ty {
    ($_name:ident) => {
        Arg
    };
}

macro_rules! impl_into_test_body {
    ($arity:expr; $($arg:ident),+) => {
        impl<C, R, F> IntoTestBody<C, R, fn($(arg_ty!($arg)),+)> for F
        where
            F: Fn(&mut C, $(arg_ty!($arg)),+) -> R + Send + Sync + 'static,
        {
            fn into_test_body(self) -> TestBody<C, R> {
                TestBody::new($arity, move |ctx: &mut C, args: Vec<Arg>| {
                    let mut args = args.into_iter();
                    $(let $arg = args.next().unwrap_or_default();)+
                    self(ctx, $($arg),+)
                })
            }
        }
    };
}

impl<C, R, F> IntoTestBody<C, R, fn()> for F
where
    F: Fn(&mut C) -> R + Send + Sync + 'static,
{
    fn into_test_body(self) -> TestBody<C, R> {
        TestBody::new(0, move |ctx: &mut C, _args: Vec<Arg>| self(ctx))
    }
}

impl_into_test_body!(1; a1);
impl_into_test_body!(2; a1, a2);
impl_into_test_body!(3; a1, a2, a3);
impl_into_test_body!(4; a1, a2, a3, a4);
impl_into_test_body!(5; a1, a2, a3, a4, a5);
impl_into_test_body!(6; a1, a2, a3, a4, a5, a6);
impl_into_test_body!(7; a1, a2, a3, a4, a5, a6, a7);
impl_into_test_body!(8; a1, a2, a3, a4, a5, a6, a7, a8);
