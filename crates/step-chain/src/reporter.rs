//! Sinks for the lines a chain writes while it executes.
//!
//! A [`Reporter`] receives every step and banner line in order and supplies
//! the display name of the test the chain runs in.

use crate::test_name::current_test_name;

/// Log target used for chain output.
pub const LOG_TARGET: &str = "step_chain";

/// Destination for chain output.
///
/// # Examples
///
/// ```
/// use step_chain::Reporter;
///
/// struct Collect(Vec<String>);
///
/// impl Reporter for Collect {
///     fn write_line(&mut self, line: &str) {
///         self.0.push(line.to_owned());
///     }
///
///     fn test_name(&self) -> &str {
///         "collects lines"
///     }
/// }
/// ```
pub trait Reporter {
    /// Write one line of output.
    fn write_line(&mut self, line: &str);

    /// Human-readable name of the current test.
    fn test_name(&self) -> &str;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }

    fn test_name(&self) -> &str {
        (**self).test_name()
    }
}

/// Writes lines to standard output through `println!`, so the test harness
/// captures them and shows them only for failing tests.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    test_name: String,
}

impl ConsoleReporter {
    /// Create a reporter for the named test.
    #[must_use]
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
        }
    }

    /// Create a reporter named after the test running on this thread.
    #[must_use]
    pub fn for_current_test() -> Self {
        Self::new(current_test_name())
    }
}

impl Reporter for ConsoleReporter {
    #[expect(
        clippy::print_stdout,
        reason = "console output is captured by the test harness"
    )]
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }

    fn test_name(&self) -> &str {
        &self.test_name
    }
}

/// Forwards lines to the `log` facade at `info` level.
#[derive(Debug, Clone)]
pub struct LogReporter {
    test_name: String,
}

impl LogReporter {
    /// Create a reporter for the named test.
    #[must_use]
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
        }
    }

    /// Create a reporter named after the test running on this thread.
    #[must_use]
    pub fn for_current_test() -> Self {
        Self::new(current_test_name())
    }
}

impl Reporter for LogReporter {
    fn write_line(&mut self, line: &str) {
        log::info!(target: LOG_TARGET, "{line}");
    }

    fn test_name(&self) -> &str {
        &self.test_name
    }
}

/// Keeps every line in memory.
///
/// # Examples
///
/// ```
/// use step_chain::{RecordingReporter, Reporter};
///
/// let mut reporter = RecordingReporter::new("records lines");
/// reporter.write_line("\tGIVEN a parcel");
/// assert_eq!(reporter.lines(), ["\tGIVEN a parcel"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    test_name: String,
    lines: Vec<String>,
}

impl RecordingReporter {
    /// Create an empty recorder for the named test.
    #[must_use]
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            lines: Vec::new(),
        }
    }

    /// Lines written so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the recorder, returning the written lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl Reporter for RecordingReporter {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }

    fn test_name(&self) -> &str {
        &self.test_name
    }
}
