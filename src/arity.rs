//! # Arity Resolution
//!
//! Decides, once per registrar call, whether test bodies run in sync or async mode,
//! and shapes each row's final argument list.
//!
//! ## Inference rule
//!
//! With `max_len` the length of the longest normalized row and `arity` the body's
//! declared parameter count, the mode is **async** exactly when
//! `arity - max_len == 1`: the body declares one slot past the longest row, and that
//! slot is reserved for the host's completion callback. Every other case is sync,
//! including an unknown arity. The decision is global, so rows of different lengths
//! all see the same mode.
//!
//! ## Argument shapes
//!
//! - async: `values ++ [done] ++ undefined * (arity - len - 1)`
//! - sync: `values` truncated or padded with undefined to exactly `arity`
//!   (unchanged when the arity is zero or unknown)

use crate::args::{Arg, Done};
use crate::errors::Error;
use crate::options::{EachOptions, ModeHint, Truncation};
use crate::row::Row;
use crate::value::Value;
use log::{debug, warn};

/// Invocation mode shared by every row of a registrar call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sync,
    Async,
}

/// The resolved call shape of one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    values: Vec<Value>,
    mode: Mode,
    arity: Option<usize>,
}

impl Invocation {
    pub fn new(values: Vec<Value>, mode: Mode, arity: Option<usize>) -> Self {
        Self {
            values,
            mode,
            arity,
        }
    }

    /// The row's normalized values, without padding or callback.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    /// Builds the final argument list, placing `done` in the callback slot when the
    /// mode is async. A missing `done` leaves that slot undefined.
    pub fn arguments(&self, done: Option<Done>) -> Vec<Arg> {
        let mut args: Vec<Arg> = self.values.iter().cloned().map(Arg::Value).collect();
        match self.mode {
            Mode::Async => {
                args.push(done.map_or(Arg::Undefined, Arg::Done));
                if let Some(arity) = self.arity {
                    pad(&mut args, arity);
                }
            }
            Mode::Sync => match self.arity {
                Some(arity) if arity > 0 => {
                    args.truncate(arity);
                    pad(&mut args, arity);
                }
                _ => {}
            },
        }
        args
    }
}

fn pad(args: &mut Vec<Arg>, arity: usize) {
    if args.len() < arity {
        args.resize(arity, Arg::Undefined);
    }
}

/// Result of resolving a whole parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub mode: Mode,
    pub plans: Vec<Invocation>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Length of the longest normalized row, 0 for an empty set.
pub fn longest_row(rows: &[Row]) -> usize {
    rows.iter().map(Row::len).max().unwrap_or(0)
}

/// Applies the inference rule to a declared arity and the longest row.
///
/// ```rust
/// use each_case::arity::{infer_mode, Mode};
/// assert_eq!(infer_mode(Some(4), 3), Mode::Async);
/// assert_eq!(infer_mode(Some(4), 4), Mode::Sync);
/// assert_eq!(infer_mode(Some(5), 3), Mode::Sync);
/// assert_eq!(infer_mode(None, 3), Mode::Sync);
/// ```
pub fn infer_mode(arity: Option<usize>, max_len: usize) -> Mode {
    match arity.and_then(|a| a.checked_sub(max_len)) {
        Some(1) => Mode::Async,
        _ => Mode::Sync,
    }
}

/// Resolves the mode and per-row invocations for a parameter set.
pub fn resolve(
    rows: &[Row],
    arity: Option<usize>,
    options: &EachOptions,
) -> Result<Resolution, Error> {
    let max_len = longest_row(rows);
    let mode = match options.mode {
        ModeHint::Infer => infer_mode(arity, max_len),
        ModeHint::Sync => Mode::Sync,
        ModeHint::Async => Mode::Async,
    };
    debug!(
        "resolved {} rows in {:?} mode (arity {:?}, longest row {})",
        rows.len(),
        mode,
        arity,
        max_len
    );

    if mode == Mode::Sync {
        if let Some(limit) = arity.filter(|a| *a > 0) {
            check_truncation(rows, limit, options.truncation)?;
        }
    }

    let plans = rows
        .iter()
        .map(|row| Invocation::new(row.normalize(), mode, arity))
        .collect();
    Ok(Resolution { mode, plans })
}

fn check_truncation(rows: &[Row], arity: usize, policy: Truncation) -> Result<(), Error> {
    for (index, row) in rows.iter().enumerate() {
        let len = row.len();
        if len <= arity {
            continue;
        }
        match policy {
            Truncation::Silent => {
                warn!("row {index} has {len} values; the test body takes {arity}, extra values dropped")
            }
            Truncation::Reject => {
                return Err(Error::RowTooLong {
                    row: index,
                    len,
                    arity,
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rows(data: Vec<Vec<i32>>) -> Vec<Row> {
        data.into_iter().map(Row::from).collect()
    }

    fn shape(args: &[Arg]) -> Vec<String> {
        args.iter()
            .map(|a| match a {
                Arg::Value(v) => v.to_string(),
                Arg::Done(_) => "cb".to_string(),
                Arg::Undefined => "undefined".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_async_slot_follows_each_row() {
        let set = rows(vec![vec![1, 2], vec![3, 4, 5], vec![6]]);
        let resolution = resolve(&set, Some(4), &EachOptions::default()).expect("resolves");
        assert_eq!(resolution.mode, Mode::Async);
        let done = Done::new(|| {});
        let shapes: Vec<_> = resolution
            .plans
            .iter()
            .map(|p| shape(&p.arguments(Some(done.clone()))))
            .collect();
        assert_eq!(shapes[0], ["1", "2", "cb", "undefined"]);
        assert_eq!(shapes[1], ["3", "4", "5", "cb"]);
        assert_eq!(shapes[2], ["6", "cb", "undefined", "undefined"]);
    }

    #[test]
    fn test_sync_pads_to_arity() {
        let set = rows(vec![vec![1, 2], vec![3, 4, 5, 6], vec![7]]);
        let resolution = resolve(&set, Some(4), &EachOptions::default()).expect("resolves");
        assert_eq!(resolution.mode, Mode::Sync);
        let shapes: Vec<_> = resolution
            .plans
            .iter()
            .map(|p| shape(&p.arguments(None)))
            .collect();
        assert_eq!(shapes[0], ["1", "2", "undefined", "undefined"]);
        assert_eq!(shapes[1], ["3", "4", "5", "6"]);
        assert_eq!(shapes[2], ["7", "undefined", "undefined", "undefined"]);
    }

    #[test]
    fn test_sync_truncates_silently_by_default() {
        let set = rows(vec![vec![1, 2, 3], vec![4]]);
        let resolution = resolve(&set, Some(2), &EachOptions::default()).expect("resolves");
        assert_eq!(resolution.mode, Mode::Sync);
        assert_eq!(shape(&resolution.plans[0].arguments(None)), ["1", "2"]);
    }

    #[test]
    fn test_reject_truncation_reports_first_long_row() {
        let set = rows(vec![vec![1], vec![1, 2, 3], vec![1, 2, 3, 4]]);
        let options = EachOptions::default().with_truncation(Truncation::Reject);
        let err = resolve(&set, Some(2), &options).expect_err("row 1 is too long");
        assert_eq!(
            err,
            Error::RowTooLong {
                row: 1,
                len: 3,
                arity: 2
            }
        );
    }

    #[test]
    fn test_unknown_or_zero_arity_passes_values_through() {
        let set = rows(vec![vec![1, 2, 3]]);
        for arity in [None, Some(0)] {
            let resolution = resolve(&set, arity, &EachOptions::default()).expect("resolves");
            assert_eq!(resolution.mode, Mode::Sync);
            assert_eq!(shape(&resolution.plans[0].arguments(None)), ["1", "2", "3"]);
        }
    }

    #[test]
    fn test_empty_set_has_no_plans() {
        let resolution = resolve(&[], Some(1), &EachOptions::default()).expect("resolves");
        assert!(resolution.is_empty());
        assert_eq!(longest_row(&[]), 0);
    }

    #[test]
    fn test_forced_async_without_arity_appends_slot() {
        let set = rows(vec![vec![1]]);
        let options = EachOptions::default().with_mode(ModeHint::Async);
        let resolution = resolve(&set, None, &options).expect("resolves");
        let done = Done::new(|| {});
        assert_eq!(shape(&resolution.plans[0].arguments(Some(done))), ["1", "cb"]);
        assert_eq!(shape(&resolution.plans[0].arguments(None)), ["1", "undefined"]);
    }

    #[test]
    fn test_forced_sync_overrides_inference() {
        let set = rows(vec![vec![1]]);
        let options = EachOptions::default().with_mode(ModeHint::Sync);
        let resolution = resolve(&set, Some(2), &options).expect("resolves");
        assert_eq!(resolution.mode, Mode::Sync);
        assert_eq!(shape(&resolution.plans[0].arguments(None)), ["1", "undefined"]);
    }

    /// `None` stands for a scalar row, `Some(n)` for a sequence of `n` values.
    fn mixed_rows(shapes: &[Option<usize>]) -> Vec<Row> {
        shapes
            .iter()
            .map(|shape| match shape {
                Some(n) => Row::from(vec![0; *n]),
                None => Row::Scalar(Value::from(0)),
            })
            .collect()
    }

    fn row_shapes() -> impl Strategy<Value = Vec<Option<usize>>> {
        prop::collection::vec(prop::option::of(0usize..6), 1..6)
    }

    proptest! {
        #[test]
        fn sync_arguments_always_match_arity(shapes in row_shapes(), arity in 1usize..8) {
            let set = mixed_rows(&shapes);
            let max_len = longest_row(&set);
            prop_assume!(arity != max_len + 1);
            let resolution = resolve(&set, Some(arity), &EachOptions::default()).unwrap();
            prop_assert_eq!(resolution.mode, Mode::Sync);
            for plan in &resolution.plans {
                prop_assert_eq!(plan.arguments(None).len(), arity);
            }
        }

        #[test]
        fn async_callback_sits_after_row_values(shapes in row_shapes()) {
            let set = mixed_rows(&shapes);
            let arity = longest_row(&set) + 1;
            let resolution = resolve(&set, Some(arity), &EachOptions::default()).unwrap();
            prop_assert_eq!(resolution.mode, Mode::Async);
            let done = Done::new(|| {});
            for (plan, row) in resolution.plans.iter().zip(&set) {
                let len = row.len();
                let args = plan.arguments(Some(done.clone()));
                prop_assert_eq!(args.len(), arity);
                prop_assert!(args[len].done().is_some());
                prop_assert!(args[len + 1..].iter().all(Arg::is_undefined));
            }
        }

        #[test]
        fn scalar_row_matches_one_value_sequence(
            shapes in row_shapes(),
            slot in 0usize..6,
            arity in 0usize..8,
        ) {
            let mut scalar = mixed_rows(&shapes);
            let index = slot % scalar.len();
            scalar[index] = Row::Scalar(Value::from(7));
            let mut sequence = scalar.clone();
            sequence[index] = Row::from(vec![7]);

            let options = EachOptions::default();
            let from_scalar = resolve(&scalar, Some(arity), &options).unwrap();
            let from_sequence = resolve(&sequence, Some(arity), &options).unwrap();
            prop_assert_eq!(from_scalar.mode, from_sequence.mode);
            let done = Done::new(|| {});
            for (a, b) in from_scalar.plans.iter().zip(&from_sequence.plans) {
                prop_assert_eq!(a.arguments(Some(done.clone())), b.arguments(Some(done.clone())));
            }
        }
    }
}
