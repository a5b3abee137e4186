//! Argument checks run before a request is built.
//!
//! Every write operation validates its input with these helpers so that a
//! malformed call fails locally with an [`ArgumentError`] and never reaches
//! the network.

use crate::error::{ArgumentError, Result};

/// Inputs that can check their own mandatory fields.
pub trait Validate {
    /// Check mandatory fields.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] naming the first field that is missing or malformed.
    fn validate(&self) -> Result<()>;
}

/// Values that can be blank: absent, empty, or whitespace only.
pub trait Blank {
    /// Whether the value carries no content.
    fn is_blank(&self) -> bool;
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Blank::is_blank)
    }
}

/// Fail with `message` unless `condition` holds.
///
/// # Errors
///
/// Returns an [`ArgumentError`] carrying `message` when `condition` is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ArgumentError::new(message))
    }
}

/// Fail with `message` if `condition` holds.
///
/// # Errors
///
/// Returns an [`ArgumentError`] carrying `message` when `condition` is true.
pub fn refute(condition: bool, message: impl Into<String>) -> Result<()> {
    ensure(!condition, message)
}

/// Fail if `value` is blank.
///
/// # Errors
///
/// Returns an [`ArgumentError`] of the form `"<field> can't be blank"`.
pub fn refute_blank<T: Blank + ?Sized>(value: &T, field: &str) -> Result<()> {
    refute(value.is_blank(), format!("{field} can't be blank"))
}
