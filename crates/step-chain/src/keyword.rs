//! Step kinds and the stage state machine.
//!
//! [`StepKind`] tags each declared step. [`Stage`] is the builder role a step
//! belongs to: primary kinds open their own stage while `And` stays in the
//! stage of the step it was chained from.

use std::fmt;
use std::str::FromStr;

use crate::error::ChainError;

/// Keyword used to categorise a declared step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Arrange preconditions for the scenario.
    Given,
    /// Perform the action under test.
    When,
    /// Assert the expected outcome.
    Then,
    /// Additional step sharing the stage of the previous one.
    And,
}

impl StepKind {
    /// Return the keyword as it appears in step lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use step_chain::StepKind;
    ///
    /// assert_eq!(StepKind::Given.as_str(), "GIVEN");
    /// assert_eq!(StepKind::And.as_str(), "AND");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "GIVEN",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::And => "AND",
        }
    }

    /// Returns `true` for the `And` conjunction.
    #[must_use]
    pub const fn is_conjunction(self) -> bool {
        matches!(self, Self::And)
    }

    /// Resolve the stage a step of this kind lands in when chained after a
    /// step in `previous`.
    ///
    /// `None` means there is no predecessor. The legal sequence is
    /// `GIVEN AND* [WHEN AND* [THEN AND*]]`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OrphanConjunction`] for an `And` with no
    /// predecessor and [`ChainError::OutOfOrder`] when a primary kind does
    /// not follow the stage it requires.
    ///
    /// # Examples
    ///
    /// ```
    /// use step_chain::{Stage, StepKind};
    ///
    /// assert_eq!(StepKind::Given.resolve(None), Ok(Stage::Given));
    /// assert_eq!(StepKind::And.resolve(Some(Stage::When)), Ok(Stage::When));
    /// assert!(StepKind::Then.resolve(Some(Stage::Given)).is_err());
    /// ```
    pub fn resolve(self, previous: Option<Stage>) -> Result<Stage, ChainError> {
        match (self, previous) {
            (Self::And, Some(stage)) => Ok(stage),
            (Self::And, None) => Err(ChainError::OrphanConjunction),
            (Self::Given, None) => Ok(Stage::Given),
            (Self::When, Some(Stage::Given)) => Ok(Stage::When),
            (Self::Then, Some(Stage::When)) => Ok(Stage::Then),
            (kind, after) => Err(ChainError::OutOfOrder { kind, after }),
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`StepKind`] from a string fails.
///
/// Contains the unrecognised keyword text for diagnostic purposes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid step kind: {0}")]
pub struct StepKindParseError(pub String);

impl FromStr for StepKind {
    type Err = StepKindParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("given") {
            Ok(Self::Given)
        } else if trimmed.eq_ignore_ascii_case("when") {
            Ok(Self::When)
        } else if trimmed.eq_ignore_ascii_case("then") {
            Ok(Self::Then)
        } else if trimmed.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else {
            Err(StepKindParseError(trimmed.to_string()))
        }
    }
}

impl TryFrom<&str> for StepKind {
    type Error = StepKindParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Builder role of a step: which kinds may follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Preconditions; may be followed by `And` or `When`.
    Given,
    /// Actions; may be followed by `And` or `Then`.
    When,
    /// Assertions; may be followed by `And` or executed.
    Then,
}

impl Stage {
    /// Name of the stage for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::When => "when",
            Self::Then => "then",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[expect(clippy::expect_used, reason = "test helper with descriptive failures")]
    fn parse_kind(input: &str) -> StepKind {
        input
            .parse()
            .expect("test input should parse to a valid step kind")
    }

    #[rstest]
    #[case("Given", StepKind::Given)]
    #[case("given", StepKind::Given)]
    #[case(" WhEn ", StepKind::When)]
    #[case("THEN", StepKind::Then)]
    #[case(" and", StepKind::And)]
    fn parses_case_insensitively(#[case] input: &str, #[case] expected: StepKind) {
        assert_eq!(parse_kind(input), expected);
    }

    #[test]
    fn rejects_unknown_kind() {
        let Err(err) = StepKind::try_from("but") else {
            panic!("expected parse error for unsupported keyword");
        };
        assert_eq!(err.0, "but");
        assert_eq!(err.to_string(), "invalid step kind: but");
    }

    #[rstest]
    #[case(StepKind::Given, None, Stage::Given)]
    #[case(StepKind::And, Some(Stage::Given), Stage::Given)]
    #[case(StepKind::When, Some(Stage::Given), Stage::When)]
    #[case(StepKind::And, Some(Stage::When), Stage::When)]
    #[case(StepKind::Then, Some(Stage::When), Stage::Then)]
    #[case(StepKind::And, Some(Stage::Then), Stage::Then)]
    fn resolves_legal_sequences(
        #[case] kind: StepKind,
        #[case] previous: Option<Stage>,
        #[case] expected: Stage,
    ) {
        assert_eq!(kind.resolve(previous), Ok(expected));
    }

    #[rstest]
    #[case(StepKind::Given, Some(Stage::Given))]
    #[case(StepKind::Given, Some(Stage::Then))]
    #[case(StepKind::When, None)]
    #[case(StepKind::When, Some(Stage::When))]
    #[case(StepKind::When, Some(Stage::Then))]
    #[case(StepKind::Then, None)]
    #[case(StepKind::Then, Some(Stage::Given))]
    #[case(StepKind::Then, Some(Stage::Then))]
    fn rejects_out_of_order_kinds(#[case] kind: StepKind, #[case] previous: Option<Stage>) {
        assert_eq!(
            kind.resolve(previous),
            Err(ChainError::OutOfOrder {
                kind,
                after: previous
            })
        );
    }

    #[test]
    fn conjunction_without_predecessor_is_orphaned() {
        assert_eq!(
            StepKind::And.resolve(None),
            Err(ChainError::OrphanConjunction)
        );
    }

    #[test]
    fn renders_upper_case() {
        let rendered: Vec<_> = [
            StepKind::Given,
            StepKind::When,
            StepKind::Then,
            StepKind::And,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(rendered, ["GIVEN", "WHEN", "THEN", "AND"]);
    }
}
