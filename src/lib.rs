//! # each-case
//!
//! Parameterized test generation: one registered test case per parameter row, each
//! titled from the row and called with the row's values.
//!
//! The engine sits between a host's registration primitive (a [`Registry`]) and a
//! user test body. It normalizes rows ([`row`]), picks sync or async invocation and
//! shapes the arguments ([`arity`]), renders titles ([`title`]) and hands each
//! `(title, WrappedTest)` pair to the registry ([`each`]). [`harness::Suite`] is a
//! ready-made recording registry.

pub use crate::args::{Arg, Done};
pub use crate::arity::Mode;
pub use crate::body::{IntoTestBody, TestBody};
pub use crate::each::{each, each_with, Each};
pub use crate::errors::Error;
pub use crate::harness::{CaseContext, CaseResult};
pub use crate::options::{EachOptions, ModeHint, Truncation};
pub use crate::registry::{Registry, SharedRegistry, SuiteBody, WrappedTest};
pub use crate::row::Row;
pub use crate::title::TitleTemplate;
pub use crate::value::Value;

pub mod ambient;
pub mod args;
pub mod arity;
pub mod body;
pub mod each;
pub mod errors;
pub mod harness;
pub mod options;
pub mod registry;
pub mod row;
pub mod title;
pub mod value;
