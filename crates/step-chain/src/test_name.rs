//! Human-readable test names.
//!
//! The standard test harness names each test thread after the test's path,
//! for example `checkout::tests::parcel_is_delivered`. These helpers turn
//! that into the display name written in a chain's header.

use std::sync::LazyLock;

use regex::Regex;

/// Name used when no test name can be derived.
pub const UNKNOWN_TEST: &str = "<unknown>";

static ACRONYM_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| compile(r"(\p{Lu})(\p{Lu}\p{Ll})"));
static WORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| compile(r"([\p{Ll}\p{Nd}])(\p{Lu})"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|error| panic!("test name pattern `{pattern}` must compile: {error}"))
}

/// Turn a test identifier into words.
///
/// Only the last path segment is kept, underscores become spaces and
/// camel-case boundaries are split.
///
/// # Examples
///
/// ```
/// use step_chain::humanize_test_name;
///
/// assert_eq!(humanize_test_name("tests::parcel_is_delivered"), "parcel is delivered");
/// assert_eq!(humanize_test_name("ItShouldDoTheThing"), "It Should Do The Thing");
/// ```
#[must_use]
pub fn humanize_test_name(raw: &str) -> String {
    let segment = raw.rsplit("::").next().unwrap_or(raw).replace('_', " ");
    let split = ACRONYM_BOUNDARY.replace_all(&segment, "$1 $2");
    let split = WORD_BOUNDARY.replace_all(&split, "$1 $2");
    split.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Display name of the test running on the current thread.
///
/// Falls back to [`UNKNOWN_TEST`] when the thread is unnamed or is the main
/// thread.
#[must_use]
pub fn current_test_name() -> String {
    std::thread::current()
        .name()
        .filter(|name| *name != "main")
        .map(humanize_test_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_TEST.to_string())
}
