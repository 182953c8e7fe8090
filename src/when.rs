//! Conditional task executor: runs an inner task the first time a
//! condition reactor yields `true`.
//!
//! This is an explicit finite state machine rather than a reactor
//! combinator — the registry core makes no assumption about an async
//! runtime or fiber scheduler (see [`crate::registry`]), so the executor
//! is driven by discrete events the caller observes and feeds in, with no
//! internal threading of its own.

use crate::error::EvalError;

/// How a [`WhenTask`] (or its inner task) finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Complete,
    Failed,
    Canceled,
}

/// A [`WhenTask`]'s lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Waiting on the condition reactor.
    Initial,
    /// The condition fired; the inner task is being created.
    StartedInner,
    /// The inner task is running.
    Running,
    /// Absorbing.
    Terminal(Termination),
}

impl State {
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Terminal(_))
    }
}

/// Drives a conditional task's lifecycle.
///
/// `WhenTask` owns no I/O and starts nothing itself — callers feed it
/// condition and inner-task events, and act on the transitions it reports.
/// `on_condition` returning `true` is the caller's cue to construct and
/// execute the inner task, then call [`WhenTask::inner_started`].
#[derive(Debug, Clone, Copy)]
pub struct WhenTask {
    state: State,
}

impl Default for WhenTask {
    fn default() -> Self {
        Self::new()
    }
}

impl WhenTask {
    pub fn new() -> Self {
        Self { state: State::Initial }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Feeds one value from the condition reactor. Returns `true` when the
    /// caller should now create and execute the inner task. A no-op once
    /// past `Initial`.
    pub fn on_condition(&mut self, condition: Result<bool, EvalError>) -> bool {
        if self.state != State::Initial {
            return false;
        }
        match condition {
            Ok(true) => {
                self.state = State::StartedInner;
                true
            }
            Ok(false) => false,
            Err(_) => {
                self.state = State::Terminal(Termination::Failed);
                false
            }
        }
    }

    /// The condition reactor's stream ended without ever yielding `true`.
    pub fn on_condition_complete(&mut self) {
        if self.state == State::Initial {
            self.state = State::Terminal(Termination::Complete);
        }
    }

    /// Confirms the inner task named by a prior `on_condition() == true` has
    /// been created and is now executing.
    pub fn inner_started(&mut self) {
        if self.state == State::StartedInner {
            self.state = State::Running;
        }
    }

    /// The inner task reached a terminal state.
    pub fn on_inner_terminal(&mut self, termination: Termination) {
        if self.state == State::Running {
            self.state = State::Terminal(termination);
        }
    }

    /// Cancels the task. A no-op once already terminal; cancels the inner
    /// task too if one is running (left to the caller — this only updates
    /// the state).
    pub fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.state = State::Terminal(Termination::Canceled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_initial() {
        let task = WhenTask::new();
        assert_eq!(task.state(), State::Initial);
        assert!(!task.is_terminal());
    }

    #[test]
    fn condition_true_requests_inner_start() {
        let mut task = WhenTask::new();
        assert!(task.on_condition(Ok(true)));
        assert_eq!(task.state(), State::StartedInner);
        task.inner_started();
        assert_eq!(task.state(), State::Running);
    }

    #[test]
    fn condition_false_stays_initial() {
        let mut task = WhenTask::new();
        assert!(!task.on_condition(Ok(false)));
        assert_eq!(task.state(), State::Initial);
    }

    #[test]
    fn condition_exception_fails() {
        let mut task = WhenTask::new();
        assert!(!task.on_condition(Err(EvalError::new("boom"))));
        assert_eq!(task.state(), State::Terminal(Termination::Failed));
    }

    #[test]
    fn condition_stream_end_completes() {
        let mut task = WhenTask::new();
        task.on_condition_complete();
        assert_eq!(task.state(), State::Terminal(Termination::Complete));
    }

    #[test]
    fn inner_failure_propagates_as_failed() {
        let mut task = WhenTask::new();
        task.on_condition(Ok(true));
        task.inner_started();
        task.on_inner_terminal(Termination::Failed);
        assert_eq!(task.state(), State::Terminal(Termination::Failed));
    }

    #[test]
    fn inner_other_terminal_propagates_as_is() {
        let mut task = WhenTask::new();
        task.on_condition(Ok(true));
        task.inner_started();
        task.on_inner_terminal(Termination::Complete);
        assert_eq!(task.state(), State::Terminal(Termination::Complete));
    }

    #[test]
    fn cancel_from_initial() {
        let mut task = WhenTask::new();
        task.cancel();
        assert_eq!(task.state(), State::Terminal(Termination::Canceled));
    }

    #[test]
    fn cancel_from_running() {
        let mut task = WhenTask::new();
        task.on_condition(Ok(true));
        task.inner_started();
        task.cancel();
        assert_eq!(task.state(), State::Terminal(Termination::Canceled));
    }

    #[test]
    fn terminal_states_are_absorbing() {
        let mut task = WhenTask::new();
        task.cancel();
        assert!(!task.on_condition(Ok(true)));
        task.on_condition_complete();
        task.inner_started();
        task.on_inner_terminal(Termination::Complete);
        assert_eq!(task.state(), State::Terminal(Termination::Canceled));
    }
}
