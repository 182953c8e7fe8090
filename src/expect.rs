//! `Expect<T>` — a uniform value-or-captured-failure carrier.
//!
//! Mirrors the role of `Beam::Expect<T>` in the original design: filter
//! results, evaluator results, and callback payloads are routed through this
//! type rather than entangling control flow with error flow across a
//! scheduling boundary.

use crate::error::EvalError;

/// Either a value or a captured evaluation failure.
#[derive(Debug, Clone)]
pub enum Expect<T> {
    Value(T),
    Exception(EvalError),
}

impl<T> Expect<T> {
    /// Wraps a value.
    pub fn value(value: T) -> Self {
        Expect::Value(value)
    }

    /// Wraps a captured failure.
    pub fn exception(error: EvalError) -> Self {
        Expect::Exception(error)
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Expect::Value(_))
    }

    pub fn is_exception(&self) -> bool {
        matches!(self, Expect::Exception(_))
    }

    /// Returns the value, or the captured failure as an `Err`.
    pub fn get(self) -> Result<T, EvalError> {
        match self {
            Expect::Value(v) => Ok(v),
            Expect::Exception(e) => Err(e),
        }
    }

    /// Calls `f`, storing its value on success or its error on failure.
    /// Never propagates — this is the Rust analogue of `Beam::Expect::Try`,
    /// which never lets the callee's exception escape.
    pub fn try_from<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, EvalError>,
    {
        match f() {
            Ok(value) => Expect::Value(value),
            Err(error) => Expect::Exception(error),
        }
    }
}

impl<T: Default> Default for Expect<T> {
    fn default() -> Self {
        Expect::Value(T::default())
    }
}

impl<T> From<Result<T, EvalError>> for Expect<T> {
    fn from(result: Result<T, EvalError>) -> Self {
        match result {
            Ok(value) => Expect::Value(value),
            Err(error) => Expect::Exception(error),
        }
    }
}

impl<T> From<Expect<T>> for Result<T, EvalError> {
    fn from(expect: Expect<T>) -> Self {
        expect.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_captures_ok() {
        let expect = Expect::<i32>::try_from(|| Ok(42));
        assert!(expect.is_value());
        assert_eq!(expect.get().unwrap(), 42);
    }

    #[test]
    fn try_from_captures_err() {
        let expect = Expect::<i32>::try_from(|| Err(EvalError::new("boom")));
        assert!(expect.is_exception());
        assert!(expect.get().is_err());
    }

    #[test]
    fn default_wraps_default_value() {
        let expect: Expect<i32> = Expect::default();
        assert_eq!(expect.get().unwrap(), 0);
    }
}
