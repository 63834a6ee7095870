use bitflags::bitflags;

bitflags! {
    /// Modifier flags carried by every [`Descriptor`](crate::Descriptor).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ArgFlags: u8 {
        /// Marks the entry which terminates the table (and owns the error log).
        const TERMINATOR = 0b0000_0001;
        /// The option requires a value (ex: `-n 5` or `--num=5`).
        const HAS_VALUE = 0b0000_0010;
        /// The option accepts, but does not require, a value (ex: `-n5` or `--num=5` vs. `-n`).
        const HAS_OPTIONAL_VALUE = 0b0000_0100;
    }
}

impl Default for ArgFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// The reason an error was recorded in the [`ErrorLog`](crate::ErrorLog).
///
/// The first group is produced by the typed entries (via scan/check).
/// The second group is structural, and is always attributed to the terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The entry was matched fewer than its minimum number of times.
    MinCount,
    /// The entry was matched more than its maximum number of times.
    MaxCount,
    /// The token could not be converted to the entry's type.
    InvalidValue,
    /// The token converted to a number outside the entry's range.
    Overflow,
    /// The error log is full; records beyond this point were discarded.
    TooManyErrors,
    /// Storage for the parse could not be allocated.
    OutOfMemory,
    /// A positional token was not accepted by any entry.
    UnexpectedArgument,
    /// A `--long` option is unknown, ambiguous, or was given a value it does not take.
    InvalidLongOption,
    /// An option which requires a value was not given one.
    MissingArgument,
    /// A `-s` short option is unknown.
    InvalidShortOption(char),
    /// An error code specific to a custom [`Capture`](crate::prelude::Capture) implementation.
    Custom(u32),
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The entry to which an [`ErrorRecord`](crate::ErrorRecord) is attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The table entry at this index.
    Entry(usize),
    /// The table's terminating entry.
    Terminator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default() {
        let flags = ArgFlags::default();
        assert!(flags.is_empty());
        assert!(!flags.contains(ArgFlags::TERMINATOR));
    }

    #[test]
    fn error_code_display() {
        assert_eq!(ErrorCode::MinCount.to_string(), "MinCount");
        assert_eq!(
            ErrorCode::InvalidShortOption('x').to_string(),
            "InvalidShortOption('x')"
        );
    }
}
