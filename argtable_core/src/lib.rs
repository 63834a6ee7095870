//! Core module for `argtable`.
//! See [documentation root](https://docs.rs/argtable/latest/argtable/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;
mod scanner;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{option_syntax, ArgTable, ConfigError, ConsoleInterface, UserInterface};

#[cfg(feature = "unit_test")]
pub use parser::InMemoryInterface;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
