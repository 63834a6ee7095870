//! Traits which, typically, may be imported without concern: `use argtable::prelude::*`.

// Needs to be imported in order to implement a custom entry kind.
pub use crate::api::Capture;
pub use crate::parser::UserInterface;
