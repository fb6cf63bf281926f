//! Submission lifecycle for a single feedback form.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};

/// Where a form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Waiting for input.
    #[default]
    Idle,
    /// A write is in flight.
    Submitting,
    /// The last write was stored.
    Success,
    /// The last write failed. Transient; the form drops back to `Idle`.
    Failed,
}

impl SubmissionState {
    /// Returns `true` while a write is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Label for the submit button.
    #[must_use]
    pub fn button_label(&self) -> &'static str {
        if self.is_pending() {
            "Submitting..."
        } else {
            "Submit"
        }
    }

    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle | Self::Success, Self::Submitting)
                | (Self::Submitting, Self::Success | Self::Failed)
                | (Self::Failed, Self::Idle)
        )
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Enforces the submit cycle `Idle -> Submitting -> (Success | Failed)`,
/// with `Failed -> Idle`, and keeps a log of every state entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionMachine {
    state: SubmissionState,
    log: Vec<SubmissionState>,
}

impl Default for SubmissionMachine {
    fn default() -> Self {
        Self {
            state: SubmissionState::Idle,
            log: vec![SubmissionState::Idle],
        }
    }
}

impl SubmissionMachine {
    /// A machine in `Idle`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Every state entered since creation (or the last [`clear_log`](Self::clear_log)),
    /// starting with the state at that time.
    #[must_use]
    pub fn log(&self) -> &[SubmissionState] {
        &self.log
    }

    /// Forget the log, keeping only the current state.
    pub fn clear_log(&mut self) {
        self.log.clear();
        self.log.push(self.state);
    }

    /// Enter `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if a write is already in flight
    /// or the previous failure was not acknowledged.
    pub fn begin(&mut self) -> Result<()> {
        self.transition(SubmissionState::Submitting)
    }

    /// Enter `Success`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless `Submitting`.
    pub fn succeed(&mut self) -> Result<()> {
        self.transition(SubmissionState::Success)
    }

    /// Enter `Failed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless `Submitting`.
    pub fn fail(&mut self) -> Result<()> {
        self.transition(SubmissionState::Failed)
    }

    /// Return from `Failed` to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless `Failed`.
    pub fn acknowledge(&mut self) -> Result<()> {
        self.transition(SubmissionState::Idle)
    }

    fn transition(&mut self, next: SubmissionState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(Error::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        trace!("Submission {} -> {}", self.state, next);
        self.state = next;
        self.log.push(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::SubmissionState::{Failed, Idle, Submitting, Success};

    #[test]
    fn test_starts_idle() {
        let machine = SubmissionMachine::new();
        assert_eq!(machine.state(), Idle);
        assert_eq!(machine.log(), &[Idle]);
    }

    #[test]
    fn test_success_path() {
        let mut machine = SubmissionMachine::new();
        machine.begin().unwrap();
        assert!(machine.state().is_pending());
        machine.succeed().unwrap();
        assert_eq!(machine.log(), &[Idle, Submitting, Success]);
    }

    #[test]
    fn test_failure_path_returns_to_idle() {
        let mut machine = SubmissionMachine::new();
        machine.begin().unwrap();
        machine.fail().unwrap();
        machine.acknowledge().unwrap();
        assert_eq!(machine.log(), &[Idle, Submitting, Failed, Idle]);
    }

    #[test]
    fn test_resubmit_after_success() {
        let mut machine = SubmissionMachine::new();
        machine.begin().unwrap();
        machine.succeed().unwrap();
        assert!(machine.begin().is_ok());
    }

    #[test]
    fn test_double_begin_rejected() {
        let mut machine = SubmissionMachine::new();
        machine.begin().unwrap();
        let err = machine.begin().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition {
                from: Submitting,
                to: Submitting
            }
        ));
    }

    #[test]
    fn test_cannot_succeed_from_idle() {
        let mut machine = SubmissionMachine::new();
        assert!(machine.succeed().is_err());
        assert!(machine.fail().is_err());
        assert!(machine.acknowledge().is_err());
        assert_eq!(machine.log(), &[Idle]);
    }

    #[test]
    fn test_failed_must_acknowledge_before_begin() {
        let mut machine = SubmissionMachine::new();
        machine.begin().unwrap();
        machine.fail().unwrap();
        assert!(machine.begin().is_err());
    }

    #[test]
    fn test_clear_log_keeps_current() {
        let mut machine = SubmissionMachine::new();
        machine.begin().unwrap();
        machine.succeed().unwrap();
        machine.clear_log();
        assert_eq!(machine.log(), &[Success]);
    }

    #[test]
    fn test_button_label() {
        assert_eq!(Submitting.button_label(), "Submitting...");
        assert_eq!(Idle.button_label(), "Submit");
    }

    #[test]
    fn test_display() {
        assert_eq!(Failed.to_string(), "failed");
        assert_eq!(Success.to_string(), "success");
    }
}
