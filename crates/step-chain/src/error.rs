//! Errors raised while building or executing a step chain.
//!
//! Building a chain through the staged API cannot fail; [`ChainError`] is
//! only returned by the runtime-validated constructors. [`AggregateFailure`]
//! is the single error a chain ever surfaces from
//! [`Then::execute`](crate::Then::execute).

use std::fmt;

use thiserror::Error;

use crate::failure::StepFailure;
use crate::keyword::{Stage, StepKind};

/// Errors raised synchronously while constructing a chain.
///
/// # Examples
///
/// ```
/// use step_chain::{ChainError, StepKind, StepNode};
///
/// let err = StepNode::new(StepKind::And, "an orphan", || {}, None)
///     .err()
///     .unwrap_or_else(|| panic!("an AND without predecessor must be rejected"));
/// assert_eq!(err, ChainError::OrphanConjunction);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ChainError {
    /// An `AND` step was declared with no prior step.
    #[error("cannot use AND without a prior step")]
    OrphanConjunction,
    /// A primary step kind was declared after a stage it may not follow.
    #[error("{kind} cannot follow {}", describe_predecessor(.after))]
    OutOfOrder {
        /// Kind of the rejected step.
        kind: StepKind,
        /// Stage of the predecessor, if any.
        after: Option<Stage>,
    },
    /// A node was converted into a stage view it does not belong to.
    #[error("expected a step in the {expected} stage but found one in the {found} stage")]
    WrongStage {
        /// Stage required by the requested view.
        expected: Stage,
        /// Stage of the supplied node.
        found: Stage,
    },
}

fn describe_predecessor(after: &Option<Stage>) -> String {
    after.map_or_else(
        || "the start of a chain".to_string(),
        |stage| format!("the {stage} stage"),
    )
}

/// One failing step as reported by an [`AggregateFailure`].
#[derive(Debug)]
pub struct FailedStep {
    kind: StepKind,
    description: String,
    failure: StepFailure,
}

impl FailedStep {
    pub(crate) fn new(kind: StepKind, description: String, failure: StepFailure) -> Self {
        Self {
            kind,
            description,
            failure,
        }
    }

    /// Kind of the step whose body failed.
    #[must_use]
    pub const fn kind(&self) -> StepKind {
        self.kind
    }

    /// Description the step was declared with.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The captured failure.
    #[must_use]
    pub const fn failure(&self) -> &StepFailure {
        &self.failure
    }

    /// Consume the record, returning the captured failure.
    #[must_use]
    pub fn into_failure(self) -> StepFailure {
        self.failure
    }
}

impl fmt::Display for FailedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.description, self.failure)
    }
}

/// Every step failure collected across one executed chain.
///
/// Failures are ordered as the steps were declared, root first. The
/// collection is never empty: a chain without failures returns `Ok(())`.
#[derive(Debug)]
pub struct AggregateFailure {
    test_name: String,
    failures: Vec<FailedStep>,
}

impl AggregateFailure {
    pub(crate) fn new(test_name: String, failures: Vec<FailedStep>) -> Self {
        debug_assert!(!failures.is_empty(), "aggregate requires a failure");
        Self {
            test_name,
            failures,
        }
    }

    /// Display name of the test the chain ran in.
    #[must_use]
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// Failing steps in declaration order.
    #[must_use]
    pub fn failures(&self) -> &[FailedStep] {
        &self.failures
    }

    /// The earliest failing step.
    #[must_use]
    pub fn first(&self) -> Option<&FailedStep> {
        self.failures.first()
    }

    /// Number of failing steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Always `false`; present for API symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Consume the aggregate, returning the failing steps.
    #[must_use]
    pub fn into_failures(self) -> Vec<FailedStep> {
        self.failures
    }
}

impl fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} step(s) failed in '{}'",
            self.failures.len(),
            self.test_name
        )?;
        for failed in &self.failures {
            write!(f, "; {failed}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.first()
            .map(|failed| failed.failure() as &(dyn std::error::Error + 'static))
    }
}
