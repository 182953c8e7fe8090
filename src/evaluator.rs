//! Evaluator: the caller-provided `I -> O` or `I -> bool` function.
//!
//! The engine never inspects an evaluator's internal structure — it only
//! calls it with one input at a time and handles the fallible outcome.

use crate::error::EvalError;

/// A pure, possibly-fallible function from an input to an output.
///
/// Implemented for any `Fn(&I) -> Result<O, EvalError>` closure, so callers
/// rarely need to implement this trait by hand.
pub trait Evaluator<I, O>: Send + Sync {
    fn eval(&self, input: &I) -> Result<O, EvalError>;
}

impl<I, O, F> Evaluator<I, O> for F
where
    F: Fn(&I) -> Result<O, EvalError> + Send + Sync,
{
    fn eval(&self, input: &I) -> Result<O, EvalError> {
        self(input)
    }
}

/// A filter is an evaluator producing a boolean.
pub type Filter<I> = dyn Evaluator<I, bool>;

/// An expression is an evaluator producing the query's output type.
pub type Expression<I, O> = dyn Evaluator<I, O>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_implements_evaluator() {
        let doubling: fn(&i32) -> Result<i32, EvalError> = |x| Ok(x * 2);
        assert_eq!(doubling.eval(&5).unwrap(), 10);
    }

    #[test]
    fn closure_can_fail() {
        let always_fails: fn(&i32) -> Result<i32, EvalError> =
            |_| Err(EvalError::new("no value defined"));
        assert!(always_fails.eval(&5).is_err());
    }
}
