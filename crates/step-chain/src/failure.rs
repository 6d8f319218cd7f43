//! Capturing step body failures.
//!
//! Step bodies fail either by panicking (as `assert!` does) or by returning
//! an `Err`. Both are folded into a [`StepFailure`] so the chain can record
//! them on the failing node and carry on.

use std::any::{Any, type_name};
use std::borrow::Cow;
use std::error::Error;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Boxed error type accepted from fallible step bodies.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A failure captured while running one step body.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StepFailure {
    /// The body panicked.
    #[error("{message}")]
    Panicked {
        /// Rendered panic payload.
        message: String,
    },
    /// The body returned an error.
    #[error("{error}")]
    Returned {
        /// Short name of the returned error's type.
        kind: Cow<'static, str>,
        /// The returned error.
        #[source]
        error: BoxError,
    },
}

impl StepFailure {
    /// Short name of the failure kind used in failure markers.
    ///
    /// Panics report `panic`; returned errors report the last path segment
    /// of their type name. An error already boxed as [`BoxError`] has lost
    /// its static type, so its name is read from the leading identifier of
    /// its `Debug` rendering instead. For enum errors that is the variant
    /// name, and boxed strings report `String`.
    ///
    /// # Examples
    ///
    /// ```
    /// use step_chain::StepFailure;
    ///
    /// let failure = StepFailure::Panicked { message: "boom".into() };
    /// assert_eq!(failure.kind_name(), "panic");
    /// ```
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Panicked { .. } => "panic",
            Self::Returned { kind, .. } => kind.as_ref(),
        }
    }

    /// Human-readable failure message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Borrow the returned error, if the body returned one.
    #[must_use]
    pub fn returned_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::Returned { error, .. } => Some(error.as_ref()),
            Self::Panicked { .. } => None,
        }
    }

    /// Wrap an error returned by a step body.
    pub fn returned<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        let full = type_name::<E>();
        let error = error.into();
        let kind = if full.starts_with("alloc::boxed::Box<") {
            Cow::Owned(boxed_error_name(error.as_ref()))
        } else {
            Cow::Borrowed(short_type_name(full))
        };
        Self::Returned { kind, error }
    }
}

/// Best-effort type name of an error known only as a trait object.
fn boxed_error_name(error: &(dyn Error + Send + Sync + 'static)) -> String {
    let rendered = format!("{error:?}");
    if rendered.starts_with('"') {
        return "String".to_owned();
    }
    let name: String = rendered
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        "Box".to_owned()
    } else {
        name
    }
}

/// Strip module paths and generic arguments from a type name.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Return values a step body may produce.
///
/// Implemented for `()` and for `Result<(), E>` where `E` converts into a
/// boxed error, so `&str`, `String` and any `std::error::Error` type work.
pub trait StepReturn {
    /// Classify the body's return value.
    ///
    /// # Errors
    ///
    /// Returns [`StepFailure::Returned`] when the body returned an `Err`.
    fn into_step_result(self) -> Result<(), StepFailure>;
}

impl StepReturn for () {
    fn into_step_result(self) -> Result<(), StepFailure> {
        Ok(())
    }
}

impl<E> StepReturn for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_step_result(self) -> Result<(), StepFailure> {
        self.map_err(StepFailure::returned)
    }
}

/// Run a step body, converting panics and returned errors into a
/// [`StepFailure`].
pub(crate) fn run_body<F>(body: F) -> Result<(), StepFailure>
where
    F: FnOnce() -> Result<(), StepFailure>,
{
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result,
        Err(payload) => Err(StepFailure::Panicked {
            message: panic_message(payload.as_ref()),
        }),
    }
}

/// Extracts a panic payload into a human-readable message.
///
/// Attempts to downcast common primitives before falling back to an opaque
/// description.
///
/// # Examples
/// ```
/// use step_chain::panic_message;
///
/// let Err(err) = std::panic::catch_unwind(|| panic!("boom")) else {
///     panic!("expected panic");
/// };
/// assert_eq!(panic_message(err.as_ref()), "boom");
/// ```
#[must_use]
pub fn panic_message(e: &(dyn Any + Send)) -> String {
    macro_rules! try_downcast {
        ($($ty:ty),* $(,)?) => {
            $(
                if let Some(val) = e.downcast_ref::<$ty>() {
                    return val.to_string();
                }
            )*
        };
    }

    try_downcast!(&str, String, i32, u32, i64, u64, isize, usize);
    format!("non-string panic payload (TypeId({:?}))", e.type_id())
}
