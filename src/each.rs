//! # Parameterized Registration
//!
//! [`each`] and [`each_with`] turn a parameter set into a registrar. Each registrar
//! call ([`Each::it`], [`Each::only`], [`Each::skip`]) registers one test case per
//! row with the host registry.
//!
//! ## Usage Workflow
//! ```rust
//! use each_case::{each_with, harness::Suite, Arg, CaseContext, CaseResult};
//! use std::sync::Arc;
//!
//! let suite = Arc::new(Suite::new());
//! each_with(vec![vec![1, 2, 3], vec![2, 2, 4]], suite.clone())
//!     .it("adds %d + %d = %d", |_: &mut CaseContext, a: Arg, b: Arg, sum: Arg| -> CaseResult {
//!         assert_eq!(a.as_number().unwrap() + b.as_number().unwrap(), sum.as_number().unwrap());
//!         Ok(())
//!     })
//!     .unwrap();
//! assert_eq!(suite.titles(), ["adds 1 + 2 = 3", "adds 2 + 2 = 4"]);
//! for case in suite.selected().unwrap() {
//!     let mut ctx = CaseContext::new(case.title.as_str());
//!     case.test.call(&mut ctx, None).unwrap();
//! }
//! ```

use crate::ambient;
use crate::arity;
use crate::body::{IntoTestBody, TestBody};
use crate::errors::Error;
use crate::options::{EachOptions, ModeHint, Truncation};
use crate::registry::{Registry, SharedRegistry, WrappedTest};
use crate::row::Row;
use crate::title::TitleTemplate;
use log::debug;
use std::sync::Arc;

/// Which registration call each generated case goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Plain,
    Skip,
}

/// A parameter set bound to a registry (explicit or ambient).
pub struct Each<C, R> {
    rows: Vec<Row>,
    registry: Option<SharedRegistry<C, R>>,
    options: EachOptions,
}

/// Builds a registrar over `rows` that registers with the ambient registry.
///
/// The ambient registry is looked up when `it`, `only` or `skip` is called, and a
/// missing registry is reported by that call.
pub fn each<C, R, I, T>(rows: I) -> Each<C, R>
where
    C: 'static,
    R: 'static,
    I: IntoIterator<Item = T>,
    T: Into<Row>,
{
    Each {
        rows: rows.into_iter().map(Into::into).collect(),
        registry: None,
        options: EachOptions::default(),
    }
}

/// Builds a registrar over `rows` that registers with `registry`.
pub fn each_with<G, I, T>(rows: I, registry: Arc<G>) -> Each<G::Context, G::Output>
where
    G: Registry + 'static,
    I: IntoIterator<Item = T>,
    T: Into<Row>,
{
    let shared: SharedRegistry<G::Context, G::Output> = registry;
    Each {
        rows: rows.into_iter().map(Into::into).collect(),
        registry: Some(shared),
        options: EachOptions::default(),
    }
}

impl<C: 'static, R: 'static> Each<C, R> {
    pub fn options(mut self, options: EachOptions) -> Self {
        self.options = options;
        self
    }

    /// Overrides the test body's declared arity.
    pub fn arity(mut self, arity: usize) -> Self {
        self.options.arity = Some(arity);
        self
    }

    pub fn mode(mut self, mode: ModeHint) -> Self {
        self.options.mode = mode;
        self
    }

    pub fn truncation(mut self, truncation: Truncation) -> Self {
        self.options.truncation = truncation;
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Registers one test case per row.
    pub fn it<M>(
        &self,
        title: impl Into<TitleTemplate>,
        body: impl IntoTestBody<C, R, M>,
    ) -> Result<(), Error> {
        let registry = self.registry()?;
        register_rows(
            &*registry,
            &self.rows,
            &title.into(),
            &body.into_test_body(),
            &self.options,
            Variant::Plain,
        )
    }

    /// Registers one skipped test case per row; bodies are never invoked.
    pub fn skip<M>(
        &self,
        title: impl Into<TitleTemplate>,
        body: impl IntoTestBody<C, R, M>,
    ) -> Result<(), Error> {
        let registry = self.registry()?;
        register_rows(
            &*registry,
            &self.rows,
            &title.into(),
            &body.into_test_body(),
            &self.options,
            Variant::Skip,
        )
    }

    /// Registers a single untitled exclusive suite. When the host runs it, the suite
    /// registers one ordinary test case per row, exactly like [`Each::it`].
    pub fn only<M>(
        &self,
        title: impl Into<TitleTemplate>,
        body: impl IntoTestBody<C, R, M>,
    ) -> Result<(), Error> {
        let registry = self.registry()?;
        let inner = Arc::clone(&registry);
        let rows = self.rows.clone();
        let template = title.into();
        let body = body.into_test_body();
        let options = self.options.clone();
        registry.only_suite(
            String::new(),
            Box::new(move || {
                register_rows(
                    &*inner,
                    &rows,
                    &template,
                    &body,
                    &options,
                    Variant::Plain,
                )
            }),
        )
    }

    fn registry(&self) -> Result<SharedRegistry<C, R>, Error> {
        match &self.registry {
            Some(registry) => Ok(Arc::clone(registry)),
            None => ambient::resolve(),
        }
    }
}

fn register_rows<C: 'static, R: 'static>(
    registry: &dyn Registry<Context = C, Output = R>,
    rows: &[Row],
    template: &TitleTemplate,
    body: &TestBody<C, R>,
    options: &EachOptions,
    variant: Variant,
) -> Result<(), Error> {
    let arity = options.effective_arity(body.arity());
    let resolution = arity::resolve(rows, arity, options)?;
    for (index, invocation) in resolution.plans.into_iter().enumerate() {
        let title = template.render(invocation.values());
        debug!("registering case {index} {title:?} ({variant:?})");
        let test = WrappedTest::new(invocation, body.clone());
        match variant {
            Variant::Plain => registry.it(title, test)?,
            Variant::Skip => registry.skip(title, test)?,
        }
    }
    Ok(())
}
