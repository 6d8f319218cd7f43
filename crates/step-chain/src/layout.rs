//! Text layout of step and banner lines.

use crate::failure::StepFailure;
use crate::keyword::StepKind;

/// Indentation level of `GIVEN`, `WHEN` and `THEN` lines.
pub const BASE_INDENT: usize = 1;

/// Width of the separator line written around a chain's output.
pub const SEPARATOR_WIDTH: usize = 80;

const INDENT_UNIT: char = '\t';

/// Indentation level for a step of `kind`.
///
/// `AND` lines nest one level under their stage.
#[must_use]
pub const fn indent_level(kind: StepKind) -> usize {
    if kind.is_conjunction() {
        BASE_INDENT + 1
    } else {
        BASE_INDENT
    }
}

/// Render the line announcing a step.
///
/// # Examples
///
/// ```
/// use step_chain::StepKind;
/// use step_chain::layout::step_line;
///
/// assert_eq!(step_line(StepKind::And, 2, "a second parcel"), "\t\tAND a second parcel");
/// ```
#[must_use]
pub fn step_line(kind: StepKind, indent_level: usize, description: &str) -> String {
    let mut line: String = std::iter::repeat_n(INDENT_UNIT, indent_level).collect();
    line.push_str(kind.as_str());
    line.push(' ');
    line.push_str(description);
    line
}

/// Append the failure marker for `failure` to a step line.
pub fn mark_failed(line: &mut String, failure: &StepFailure) {
    line.push_str("\t-- FAIL - ");
    line.push_str(failure.kind_name());
}

/// The separator written before and after a chain's output.
#[must_use]
pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// The line naming the test a chain runs in.
#[must_use]
pub fn test_line(test_name: &str) -> String {
    format!("TEST :\t{test_name}")
}

/// The closing verdict for a chain without failures.
pub const PASS_BANNER: &str = "--- PASS.";

/// The closing verdict for a failing chain, quoting the first failure.
#[must_use]
pub fn fail_banner(first: &StepFailure) -> String {
    format!("--- FAIL: {first}")
}
