//! Staged builder views over a chain.
//!
//! [`Given`], [`When`] and [`Then`] wrap the last [`StepNode`] of a chain and
//! expose only the operations legal after a step in that stage. Calling
//! `when` before `given`, `then` twice or `execute` before `then` does not
//! compile.

use crate::error::{AggregateFailure, ChainError};
use crate::failure::StepReturn;
use crate::keyword::{Stage, StepKind};
use crate::layout;
use crate::node::StepNode;
use crate::reporter::{ConsoleReporter, LOG_TARGET, Reporter};

/// Start a chain with its first `GIVEN` step.
///
/// Nothing runs until [`Then::execute`] is called.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use step_chain::{RecordingReporter, given};
///
/// let parcels = Cell::new(0);
/// let mut reporter = RecordingReporter::new("parcel counting");
///
/// given("an empty depot", || parcels.set(0))
///     .when("two parcels arrive", || parcels.set(parcels.get() + 2))
///     .then("the depot holds two parcels", || assert_eq!(parcels.get(), 2))
///     .execute(&mut reporter)?;
///
/// assert!(reporter.lines().contains(&"\tWHEN two parcels arrive".to_string()));
/// # Ok::<(), step_chain::AggregateFailure>(())
/// ```
pub fn given<'a, F, R>(description: impl Into<String>, body: F) -> Given<'a>
where
    F: FnOnce() -> R + 'a,
    R: StepReturn,
{
    Given {
        node: StepNode::root(description, body),
    }
}

macro_rules! stage_view {
    ($name:ident, $stage:expr) => {
        impl<'a> $name<'a> {
            /// Borrow the last node of the chain.
            #[must_use]
            pub fn node(&self) -> &StepNode<'a> {
                &self.node
            }

            /// Unwrap the last node of the chain.
            #[must_use]
            pub fn into_node(self) -> StepNode<'a> {
                self.node
            }
        }

        impl<'a> TryFrom<StepNode<'a>> for $name<'a> {
            type Error = ChainError;

            fn try_from(node: StepNode<'a>) -> Result<Self, Self::Error> {
                if node.stage() == $stage {
                    Ok(Self { node })
                } else {
                    Err(ChainError::WrongStage {
                        expected: $stage,
                        found: node.stage(),
                    })
                }
            }
        }
    };
}

/// A chain whose last step is in the `Given` stage.
#[derive(Debug)]
#[must_use = "a chain does nothing until it is executed"]
pub struct Given<'a> {
    node: StepNode<'a>,
}

impl<'a> Given<'a> {
    /// Add another precondition.
    pub fn and<F, R>(self, description: impl Into<String>, body: F) -> Self
    where
        F: FnOnce() -> R + 'a,
        R: StepReturn,
    {
        Self {
            node: self
                .node
                .link(StepKind::And, Stage::Given, description, body),
        }
    }

    /// Declare the action under test.
    pub fn when<F, R>(self, description: impl Into<String>, body: F) -> When<'a>
    where
        F: FnOnce() -> R + 'a,
        R: StepReturn,
    {
        When {
            node: self
                .node
                .link(StepKind::When, Stage::When, description, body),
        }
    }
}

stage_view!(Given, Stage::Given);

/// A chain whose last step is in the `When` stage.
#[derive(Debug)]
#[must_use = "a chain does nothing until it is executed"]
pub struct When<'a> {
    node: StepNode<'a>,
}

impl<'a> When<'a> {
    /// Add another action.
    pub fn and<F, R>(self, description: impl Into<String>, body: F) -> Self
    where
        F: FnOnce() -> R + 'a,
        R: StepReturn,
    {
        Self {
            node: self
                .node
                .link(StepKind::And, Stage::When, description, body),
        }
    }

    /// Declare the first expected outcome.
    pub fn then<F, R>(self, description: impl Into<String>, body: F) -> Then<'a>
    where
        F: FnOnce() -> R + 'a,
        R: StepReturn,
    {
        Then {
            node: self
                .node
                .link(StepKind::Then, Stage::Then, description, body),
        }
    }
}

stage_view!(When, Stage::When);

/// A chain whose last step is in the `Then` stage; the only view that can
/// be executed.
#[derive(Debug)]
#[must_use = "a chain does nothing until it is executed"]
pub struct Then<'a> {
    node: StepNode<'a>,
}

impl<'a> Then<'a> {
    /// Add another expected outcome.
    pub fn and<F, R>(self, description: impl Into<String>, body: F) -> Self
    where
        F: FnOnce() -> R + 'a,
        R: StepReturn,
    {
        Self {
            node: self
                .node
                .link(StepKind::And, Stage::Then, description, body),
        }
    }

    /// Run every step in declaration order and report the outcome.
    ///
    /// Writes a header naming the test, one line per step (failing steps
    /// carry a `-- FAIL` marker) and a closing verdict. Every step runs even
    /// when an earlier one failed.
    ///
    /// # Errors
    ///
    /// Returns an [`AggregateFailure`] holding every step failure, in
    /// declaration order, when at least one step body panicked or returned
    /// an error. All output has been written by then.
    pub fn execute<R: Reporter + ?Sized>(self, reporter: &mut R) -> Result<(), AggregateFailure> {
        let test_name = reporter.test_name().to_owned();
        let separator = layout::separator();

        reporter.write_line(&separator);
        reporter.write_line(&layout::test_line(&test_name));
        reporter.write_line(&separator);

        let mut node = self.node;
        node.run(reporter);
        let failures = node.into_failed_steps();

        reporter.write_line("");
        let Some(first) = failures.first() else {
            reporter.write_line(layout::PASS_BANNER);
            reporter.write_line(&separator);
            log::debug!(target: LOG_TARGET, "chain passed: {test_name}");
            return Ok(());
        };
        reporter.write_line(&layout::fail_banner(first.failure()));
        reporter.write_line(&separator);
        log::warn!(
            target: LOG_TARGET,
            "chain failed: {test_name}: {} failing step(s)",
            failures.len()
        );
        Err(AggregateFailure::new(test_name, failures))
    }

    /// Execute the chain, printing to the test's captured standard output
    /// under the current test's name.
    ///
    /// # Errors
    ///
    /// As for [`execute`](Self::execute).
    pub fn execute_to_console(self) -> Result<(), AggregateFailure> {
        self.execute(&mut ConsoleReporter::for_current_test())
    }
}

stage_view!(Then, Stage::Then);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::RecordingReporter;

    #[test]
    fn stages_track_their_stage() {
        let chain = given("a", || {}).and("b", || {});
        assert_eq!(chain.node().stage(), Stage::Given);
        let chain = chain.when("c", || {}).and("d", || {});
        assert_eq!(chain.node().stage(), Stage::When);
        let chain = chain.then("e", || {}).and("f", || {});
        assert_eq!(chain.node().stage(), Stage::Then);
        assert_eq!(chain.node().kind(), StepKind::And);
        assert_eq!(chain.node().len(), 6);
    }

    #[test]
    fn dynamic_nodes_convert_only_into_their_stage() {
        let node = given("a", || {}).when("b", || {}).into_node();
        let Err(err) = Then::try_from(node) else {
            panic!("a WHEN node must not become a Then view");
        };
        assert_eq!(
            err,
            ChainError::WrongStage {
                expected: Stage::Then,
                found: Stage::When,
            }
        );
    }

    #[test]
    fn passing_chain_ends_with_pass_banner() {
        let mut reporter = RecordingReporter::new("passes");
        let result = given("a", || {})
            .when("b", || {})
            .then("c", || {})
            .execute(&mut reporter);
        assert!(result.is_ok());
        let lines = reporter.into_lines();
        assert_eq!(lines.len(), 3 + 3 + 3);
        assert_eq!(lines.get(1).map(String::as_str), Some("TEST :\tpasses"));
        assert_eq!(
            lines.iter().rev().nth(1).map(String::as_str),
            Some(layout::PASS_BANNER)
        );
    }
}
