//! Step nodes and deferred chain execution.
//!
//! Each [`StepNode`] owns the node it was chained from. Running the last node
//! of a chain executes every step from the root onwards, exactly once and in
//! declaration order. A failing body is recorded on its own node and never
//! reaches the nodes chained after it.
//!
//! Chains built from scripts can be arbitrarily long, so every walk over the
//! predecessor links (running, collecting failures, dropping) is a loop
//! rather than a recursion.

use std::fmt;

use crate::error::{ChainError, FailedStep};
use crate::failure::{StepFailure, StepReturn, run_body};
use crate::keyword::{Stage, StepKind};
use crate::layout;
use crate::reporter::{LOG_TARGET, Reporter};

type StepBody<'a> = Box<dyn FnOnce() -> Result<(), StepFailure> + 'a>;

fn boxed<'a, F, R>(body: F) -> StepBody<'a>
where
    F: FnOnce() -> R + 'a,
    R: StepReturn,
{
    Box::new(move || body().into_step_result())
}

/// One declared step and the failures captured while running it.
pub struct StepNode<'a> {
    kind: StepKind,
    stage: Stage,
    description: String,
    body: Option<StepBody<'a>>,
    predecessor: Option<Box<StepNode<'a>>>,
    indent_level: usize,
    failures: Vec<StepFailure>,
}

impl<'a> StepNode<'a> {
    /// Build a node after validating that `kind` may follow `predecessor`.
    ///
    /// The staged builder returned by [`given`](crate::given) never needs
    /// this check; use it when step kinds are only known at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OrphanConjunction`] for an `And` without a
    /// predecessor and [`ChainError::OutOfOrder`] when `kind` may not follow
    /// the predecessor's stage.
    ///
    /// # Examples
    ///
    /// ```
    /// use step_chain::{Stage, StepKind, StepNode};
    ///
    /// let root = StepNode::new(StepKind::Given, "a parcel", || {}, None)?;
    /// let next = StepNode::new(StepKind::And, "a label", || {}, Some(root))?;
    /// assert_eq!(next.stage(), Stage::Given);
    /// # Ok::<(), step_chain::ChainError>(())
    /// ```
    pub fn new<F, R>(
        kind: StepKind,
        description: impl Into<String>,
        body: F,
        predecessor: Option<Self>,
    ) -> Result<Self, ChainError>
    where
        F: FnOnce() -> R + 'a,
        R: StepReturn,
    {
        let stage = kind.resolve(predecessor.as_ref().map(Self::stage))?;
        Ok(Self::assemble(
            kind,
            stage,
            description.into(),
            boxed(body),
            predecessor.map(Box::new),
        ))
    }

    pub(crate) fn root<F, R>(description: impl Into<String>, body: F) -> Self
    where
        F: FnOnce() -> R + 'a,
        R: StepReturn,
    {
        Self::assemble(
            StepKind::Given,
            Stage::Given,
            description.into(),
            boxed(body),
            None,
        )
    }

    /// Chain a step whose legality the caller's type already guarantees.
    pub(crate) fn link<F, R>(
        self,
        kind: StepKind,
        stage: Stage,
        description: impl Into<String>,
        body: F,
    ) -> Self
    where
        F: FnOnce() -> R + 'a,
        R: StepReturn,
    {
        debug_assert_eq!(kind.resolve(Some(self.stage)), Ok(stage));
        Self::assemble(
            kind,
            stage,
            description.into(),
            boxed(body),
            Some(Box::new(self)),
        )
    }

    fn assemble(
        kind: StepKind,
        stage: Stage,
        description: String,
        body: StepBody<'a>,
        predecessor: Option<Box<Self>>,
    ) -> Self {
        Self {
            kind,
            stage,
            description,
            body: Some(body),
            predecessor,
            indent_level: layout::indent_level(kind),
            failures: Vec::new(),
        }
    }

    /// Kind the step was declared with.
    #[must_use]
    pub const fn kind(&self) -> StepKind {
        self.kind
    }

    /// Stage the step belongs to.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Description the step was declared with.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Indentation level of the step's line.
    #[must_use]
    pub const fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// The step this one was chained from.
    #[must_use]
    pub fn predecessor(&self) -> Option<&Self> {
        self.predecessor.as_deref()
    }

    /// Failures captured while running this step's own body.
    #[must_use]
    pub fn failures(&self) -> &[StepFailure] {
        &self.failures
    }

    /// This node followed by each predecessor up to the root.
    pub fn ancestry(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |node| node.predecessor())
    }

    /// Number of steps in the chain ending at this node.
    #[expect(
        clippy::len_without_is_empty,
        reason = "a chain always holds the node it is viewed from"
    )]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ancestry().count()
    }

    /// Run every step from the root up to and including this one.
    pub(crate) fn run<R: Reporter + ?Sized>(&mut self, reporter: &mut R) {
        let mut ancestors = self.detach_ancestors();
        for node in ancestors.iter_mut().rev() {
            node.run_own(reporter);
        }
        self.run_own(reporter);
        self.predecessor = ancestors
            .into_iter()
            .rev()
            .reduce(|predecessor, mut node| {
                node.predecessor = Some(predecessor);
                node
            });
    }

    fn run_own<R: Reporter + ?Sized>(&mut self, reporter: &mut R) {
        let mut line = layout::step_line(self.kind, self.indent_level, &self.description);
        if let Some(body) = self.body.take() {
            log::debug!(target: LOG_TARGET, "running step: {} {}", self.kind, self.description);
            match run_body(body) {
                Ok(()) => {
                    log::debug!(target: LOG_TARGET, "step passed: {} {}", self.kind, self.description);
                }
                Err(failure) => {
                    log::warn!(
                        target: LOG_TARGET,
                        "step failed: {} {}: {failure}",
                        self.kind,
                        self.description
                    );
                    layout::mark_failed(&mut line, &failure);
                    self.failures.push(failure);
                }
            }
        }
        reporter.write_line(&line);
    }

    /// Unlink every predecessor, nearest first. The root comes last.
    fn detach_ancestors(&mut self) -> Vec<Box<Self>> {
        let mut ancestors = Vec::new();
        let mut next = self.predecessor.take();
        while let Some(mut node) = next {
            next = node.predecessor.take();
            ancestors.push(node);
        }
        ancestors
    }

    /// Take every captured failure from the chain, root first.
    pub(crate) fn into_failed_steps(mut self) -> Vec<FailedStep> {
        let ancestors = self.detach_ancestors();
        let mut failed = Vec::new();
        for mut node in ancestors.into_iter().rev() {
            failed.extend(node.take_failed_steps());
        }
        failed.extend(self.take_failed_steps());
        failed
    }

    fn take_failed_steps(&mut self) -> Vec<FailedStep> {
        std::mem::take(&mut self.failures)
            .into_iter()
            .map(|failure| FailedStep::new(self.kind, self.description.clone(), failure))
            .collect()
    }
}

impl Drop for StepNode<'_> {
    fn drop(&mut self) {
        drop(self.detach_ancestors());
    }
}

impl fmt::Debug for StepNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepNode")
            .field("kind", &self.kind)
            .field("stage", &self.stage)
            .field("description", &self.description)
            .field("pending", &self.body.is_some())
            .field(
                "predecessor",
                &self.predecessor().map(StepNode::description),
            )
            .field("indent_level", &self.indent_level)
            .field("failures", &self.failures)
            .finish()
    }
}
