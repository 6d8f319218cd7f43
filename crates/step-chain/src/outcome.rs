//! A slot for the failure of the action under test.
//!
//! When a scenario checks that an action does or does not fail, the `WHEN`
//! step captures the action's outcome and a later `THEN` step asserts on it.

use std::cell::RefCell;

use crate::failure::{StepFailure, StepReturn, run_body};

/// Holds the failure, if any, of the most recently captured action.
///
/// # Examples
///
/// ```
/// use step_chain::{RecordingReporter, ThrownError, given};
///
/// let thrown = ThrownError::new();
/// let mut reporter = RecordingReporter::new("refuses unknown parcels");
///
/// given("a depot", || {})
///     .when("an unknown parcel is collected", || {
///         thrown.capture(|| Err::<(), _>("unknown parcel"));
///     })
///     .then("collection is refused", || {
///         assert_eq!(thrown.message().as_deref(), Some("unknown parcel"));
///     })
///     .execute(&mut reporter)?;
/// # Ok::<(), step_chain::AggregateFailure>(())
/// ```
#[derive(Debug, Default)]
pub struct ThrownError {
    failure: RefCell<Option<StepFailure>>,
}

impl ThrownError {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action`, storing its failure and discarding any earlier one.
    pub fn capture<F, R>(&self, action: F)
    where
        F: FnOnce() -> R,
        R: StepReturn,
    {
        let outcome = run_body(|| action().into_step_result()).err();
        self.failure.replace(outcome);
    }

    /// Returns `true` when the last captured action succeeded, or nothing
    /// was captured.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.failure.borrow().is_none()
    }

    /// Message of the captured failure.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.failure.borrow().as_ref().map(StepFailure::message)
    }

    /// Take the captured failure, leaving the slot empty.
    #[must_use]
    pub fn take(&self) -> Option<StepFailure> {
        self.failure.take()
    }

    /// Panic if a failure was captured.
    ///
    /// # Panics
    ///
    /// Panics with the captured failure's kind and message.
    #[track_caller]
    pub fn assert_none(&self) {
        if let Some(failure) = self.failure.borrow().as_ref() {
            panic!(
                "expected no error to be raised, got {}: {failure}",
                failure.kind_name()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let thrown = ThrownError::new();
        assert!(thrown.is_none());
        thrown.assert_none();
    }

    #[test]
    fn captures_panics_and_errors() {
        let thrown = ThrownError::new();
        thrown.capture(|| assert_eq!(1, 2, "totals differ"));
        assert!(!thrown.is_none());
        assert!(
            thrown
                .message()
                .is_some_and(|message| message.contains("totals differ"))
        );

        thrown.capture(|| Err::<(), _>("refused"));
        assert_eq!(thrown.message().as_deref(), Some("refused"));
    }

    #[test]
    fn later_success_clears_the_slot() {
        let thrown = ThrownError::new();
        thrown.capture(|| Err::<(), _>("refused"));
        thrown.capture(|| ());
        assert!(thrown.is_none());
    }

    #[test]
    fn take_empties_the_slot() {
        let thrown = ThrownError::new();
        thrown.capture(|| Err::<(), _>("refused"));
        let taken = thrown.take();
        assert!(taken.is_some_and(|failure| failure.kind_name() == "&str"));
        assert!(thrown.is_none());
    }

    #[test]
    #[should_panic(expected = "expected no error to be raised, got &str: refused")]
    fn assert_none_reports_the_failure() {
        let thrown = ThrownError::new();
        thrown.capture(|| Err::<(), _>("refused"));
        thrown.assert_none();
    }
}
