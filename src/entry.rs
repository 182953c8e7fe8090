//! Per-query subscription state.

use std::sync::Mutex;

use crate::evaluator::{Expression, Filter};
use crate::policy::UpdatePolicy;
use crate::sequence::{Range, Sequence, SequencedValue};

/// A subscription entry's lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Initializing,
    Committed,
}

/// The mutable fields of an entry, guarded by a single mutex (`entryLock`
/// in the design). Invariant I2/I3: `write_log` is only appended to while
/// `phase == Initializing`, and is empty for the rest of the entry's life
/// once `Commit` drains it.
pub(crate) struct EntryState<I, O> {
    pub(crate) phase: Phase,
    pub(crate) previous_value: Option<O>,
    pub(crate) write_log: Vec<SequencedValue<I>>,
}

/// A live per-query record owned by the registry.
///
/// Shared between the all-entries set and (while initializing) the
/// initializing index; wrap in `Arc` to model that shared ownership.
pub struct SubscriptionEntry<I, O, C> {
    pub id: i32,
    pub client: C,
    pub range: Range,
    pub update_policy: UpdatePolicy,
    filter: Box<Filter<I>>,
    expression: Box<Expression<I, O>>,
    pub(crate) state: Mutex<EntryState<I, O>>,
}

impl<I, O, C> SubscriptionEntry<I, O, C> {
    pub(crate) fn new(
        id: i32,
        client: C,
        range: Range,
        filter: Box<Filter<I>>,
        update_policy: UpdatePolicy,
        expression: Box<Expression<I, O>>,
    ) -> Self {
        Self {
            id,
            client,
            range,
            update_policy,
            filter,
            expression,
            state: Mutex::new(EntryState {
                phase: Phase::Initializing,
                previous_value: None,
                write_log: Vec::new(),
            }),
        }
    }

    /// Whether `sequence` falls within this entry's range.
    pub(crate) fn in_range(&self, sequence: Sequence) -> bool {
        self.range.contains(sequence)
    }

    /// Tests the filter, treating a failure as "does not pass" (spec §4.1.4:
    /// "exceptions from the filter are treated as false").
    pub(crate) fn passes_filter(&self, input: &I) -> bool {
        self.filter.eval(input).unwrap_or(false)
    }

    /// Evaluates the expression.
    pub(crate) fn evaluate(&self, input: &I) -> Result<O, crate::error::EvalError> {
        self.expression.eval(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    fn make_entry(range: Range) -> SubscriptionEntry<i64, i64, u64> {
        SubscriptionEntry::new(
            1,
            42,
            range,
            Box::new(|_: &i64| Ok(true)),
            UpdatePolicy::All,
            Box::new(|x: &i64| Ok(x * 2)),
        )
    }

    #[test]
    fn filter_exception_is_treated_as_false() {
        let entry = SubscriptionEntry::new(
            1,
            42,
            Range::new(0, u64::MAX),
            Box::new(|_: &i64| -> Result<bool, EvalError> { Err(EvalError::new("boom")) }),
            UpdatePolicy::All,
            Box::new(|x: &i64| Ok(*x)),
        );
        assert!(!entry.passes_filter(&1));
    }

    #[test]
    fn in_range_and_evaluate() {
        let entry = make_entry(Range::new(0, 10));
        assert!(entry.in_range(5));
        assert!(!entry.in_range(11));
        assert_eq!(entry.evaluate(&3).unwrap(), 6);
    }
}
