use thiserror::Error;

use crate::api::Descriptor;
use crate::model::ErrorCode;

/// Behaviour every table entry provides to the parsing engine.
///
/// The built-in kinds (see [`Arg`](crate::Arg)) implement this, and a custom kind may be plugged into a table via [`Arg::custom`](crate::Arg::custom).
/// Each method receives the entry's [`Descriptor`] so implementations need not duplicate it.
pub trait Capture {
    /// Clear all matches from a previous parse.
    fn reset(&mut self);

    /// Whether the parser may hand tokens to this entry at all.
    fn can_scan(&self) -> bool {
        true
    }

    /// Consume one match of this entry.
    /// The `token` is `None` when the option was matched without a value (ex: a switch, or an omitted optional value).
    fn scan(&mut self, descriptor: &Descriptor, token: Option<&str>) -> Result<(), ErrorCode>;

    /// Validate the entry once all tokens have been scanned.
    fn check(&self, descriptor: &Descriptor) -> Result<(), ErrorCode>;

    /// Render a single error, previously returned by `scan` or `check`, as a message for the user.
    fn render_error(
        &self,
        descriptor: &Descriptor,
        code: ErrorCode,
        token: Option<&str>,
        program: &str,
    ) -> String;

    /// The number of times this entry has been matched in the current parse.
    fn count(&self) -> usize;
}

/// Storage for an entry could not be allocated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot reserve storage for {requested} values.")]
pub struct AllocError {
    pub(crate) requested: usize,
}

// Allocates exactly `capacity` slots up front, so that the storage never grows during a parse.
pub(crate) fn fixed_capacity<T: Clone>(capacity: usize, fill: T) -> Result<Vec<T>, AllocError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(capacity)
        .map_err(|_| AllocError {
            requested: capacity,
        })?;
    values.resize(capacity, fill);
    Ok(values)
}
