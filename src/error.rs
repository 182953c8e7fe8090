//! Error types surfaced by the subscription engine.
//!
//! Two tiers, matching two different conventions already present in the
//! pack: evaluator failures stay close to the teacher's plain `String`
//! errors (they're single-input, single-attempt failures logged and
//! dropped, never returned to a caller), while [`RegistryError`] is a typed
//! `thiserror` enum for the handful of outcomes a caller must react to.

use thiserror::Error;

/// A filter or expression evaluation failure for a single input.
///
/// Never propagated to the client — see [`RegistryError`] for the errors
/// that are. Carries a message only, in the teacher's style of plain
/// string errors for internal, per-call failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalError(pub String);

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for EvalError {}

/// Errors the registry reports back to the caller.
///
/// `EvaluatorFailure` and `StaleCommit` from the design's error table are
/// not variants here — both are silent dispositions (logged, not
/// surfaced), per spec. `SendFailure` is the caller's own callback failing,
/// which the registry never catches.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// `Initialize` was called with a `(client, id)` pair already in use.
    #[error("query already exists for this client")]
    DuplicateQuery,
}
