//! Fluent Given/When/Then step chains for tests.
//!
//! A chain is declared with [`given`] and extended through the staged views
//! [`Given`], [`When`] and [`Then`], which only expose the steps that may
//! legally follow. Nothing runs until [`Then::execute`]; then every step runs
//! once, in declaration order, and its description is written to a
//! [`Reporter`]. A failing step does not stop the chain: every failure is
//! collected and returned together as one [`AggregateFailure`].
//!
//! ```
//! use std::cell::RefCell;
//! use step_chain::{RecordingReporter, given};
//!
//! let shelf = RefCell::new(Vec::new());
//! let mut reporter = RecordingReporter::new("shelving parcels");
//!
//! given("an empty shelf", || shelf.borrow_mut().clear())
//!     .and("a parcel labelled A", || {})
//!     .when("the parcel is shelved", || shelf.borrow_mut().push("A"))
//!     .then("the shelf holds it", || assert_eq!(*shelf.borrow(), ["A"]))
//!     .execute(&mut reporter)?;
//! # Ok::<(), step_chain::AggregateFailure>(())
//! ```

mod error;
mod failure;
mod keyword;
pub mod layout;
mod node;
mod outcome;
mod reporter;
mod stage;
mod test_name;

pub use error::{AggregateFailure, ChainError, FailedStep};
pub use failure::{BoxError, StepFailure, StepReturn, panic_message};
pub use keyword::{Stage, StepKind, StepKindParseError};
pub use node::StepNode;
pub use outcome::ThrownError;
pub use reporter::{ConsoleReporter, LOG_TARGET, LogReporter, RecordingReporter, Reporter};
pub use stage::{Given, Then, When, given};
pub use test_name::{UNKNOWN_TEST, current_test_name, humanize_test_name};
