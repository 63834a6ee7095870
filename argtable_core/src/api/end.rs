use crate::api::capture::*;
use crate::api::Descriptor;
use crate::model::{ErrorCode, Origin};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A single error recorded during a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    code: ErrorCode,
    origin: Origin,
    token: Option<String>,
}

impl ErrorRecord {
    fn new(origin: Origin, code: ErrorCode, token: Option<&str>) -> Self {
        Self {
            code,
            origin,
            token: token.map(String::from),
        }
    }

    /// What went wrong.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The entry this error is attributed to.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// The offending token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// The terminating entry of a table, which collects the errors of each parse.
///
/// The log holds at most `capacity` records.
/// Once full, any further error replaces the final record with [`ErrorCode::TooManyErrors`].
#[derive(Debug, Clone)]
pub struct ErrorLog {
    records: Vec<ErrorRecord>,
    capacity: usize,
}

impl ErrorLog {
    pub(crate) fn new(capacity: usize) -> Result<Self, AllocError> {
        let mut records = Vec::new();
        records
            .try_reserve_exact(capacity)
            .map_err(|_| AllocError {
                requested: capacity,
            })?;
        Ok(Self { records, capacity })
    }

    pub(crate) fn register(&mut self, origin: Origin, code: ErrorCode, token: Option<&str>) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registering {code} against {origin:?} (token: {token:?}).");
        }

        if self.records.len() < self.capacity {
            self.records.push(ErrorRecord::new(origin, code, token));
        } else if let Some(last) = self.records.last_mut() {
            *last = ErrorRecord::new(Origin::Terminator, ErrorCode::TooManyErrors, None);
        }
    }

    /// The errors of the current parse, in the order they were found.
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// The maximum number of records this log holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Capture for ErrorLog {
    fn reset(&mut self) {
        self.records.clear();
    }

    fn can_scan(&self) -> bool {
        false
    }

    fn scan(&mut self, _descriptor: &Descriptor, _token: Option<&str>) -> Result<(), ErrorCode> {
        Ok(())
    }

    fn check(&self, _descriptor: &Descriptor) -> Result<(), ErrorCode> {
        Ok(())
    }

    fn render_error(
        &self,
        _descriptor: &Descriptor,
        code: ErrorCode,
        token: Option<&str>,
        program: &str,
    ) -> String {
        let token = token.unwrap_or_default();

        match code {
            ErrorCode::TooManyErrors => format!("{program}: too many errors to display"),
            ErrorCode::OutOfMemory => format!("{program}: insufficient memory"),
            ErrorCode::UnexpectedArgument => format!("{program}: unexpected argument \"{token}\""),
            ErrorCode::MissingArgument => {
                format!("{program}: option \"{token}\" requires an argument")
            }
            ErrorCode::InvalidLongOption => format!("{program}: invalid option \"{token}\""),
            ErrorCode::InvalidShortOption(option) => {
                format!("{program}: invalid option \"-{option}\"")
            }
            _ => format!("{program}: unknown error at \"{token}\""),
        }
    }

    fn count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn register_within_capacity() {
        // Setup
        let mut log = ErrorLog::new(3).unwrap();

        // Execute
        log.register(Origin::Entry(0), ErrorCode::InvalidValue, Some("abc"));
        log.register(Origin::Terminator, ErrorCode::InvalidShortOption('x'), None);

        // Verify
        assert_eq!(log.count(), 2);
        assert_eq!(log.records()[0].code(), ErrorCode::InvalidValue);
        assert_eq!(log.records()[0].origin(), Origin::Entry(0));
        assert_eq!(log.records()[0].token(), Some("abc"));
        assert_eq!(log.records()[1].token(), None);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(1, 5)]
    #[case(3, 4)]
    #[case(3, 100)]
    fn register_overflow(#[case] capacity: usize, #[case] registrations: usize) {
        // Setup
        let mut log = ErrorLog::new(capacity).unwrap();

        // Execute
        for i in 0..registrations {
            log.register(Origin::Entry(i), ErrorCode::MaxCount, None);
            assert!(log.count() <= capacity);
        }

        // Verify
        assert_eq!(log.count(), capacity.min(registrations));
        let last = log.records().last().unwrap();
        if registrations > capacity {
            assert_eq!(last.code(), ErrorCode::TooManyErrors);
            assert_eq!(last.origin(), Origin::Terminator);
            assert_eq!(last.token(), None);
        } else {
            assert_eq!(last.code(), ErrorCode::MaxCount);
        }
    }

    #[test]
    fn reset_clears() {
        // Setup
        let mut log = ErrorLog::new(2).unwrap();
        log.register(Origin::Terminator, ErrorCode::OutOfMemory, None);

        // Execute
        log.reset();

        // Verify
        assert_eq!(log.count(), 0);
        assert_eq!(log.capacity(), 2);
    }

    #[rstest]
    #[case(ErrorCode::TooManyErrors, None, "prog: too many errors to display")]
    #[case(ErrorCode::OutOfMemory, None, "prog: insufficient memory")]
    #[case(ErrorCode::UnexpectedArgument, Some("x"), "prog: unexpected argument \"x\"")]
    #[case(
        ErrorCode::MissingArgument,
        Some("--num"),
        "prog: option \"--num\" requires an argument"
    )]
    #[case(ErrorCode::InvalidLongOption, Some("--bogus"), "prog: invalid option \"--bogus\"")]
    #[case(ErrorCode::InvalidShortOption('q'), None, "prog: invalid option \"-q\"")]
    fn render_error(
        #[case] code: ErrorCode,
        #[case] token: Option<&str>,
        #[case] expected: &str,
    ) {
        // Setup
        let log = ErrorLog::new(1).unwrap();
        let descriptor = Descriptor::new("", "");

        // Execute
        let message = log.render_error(&descriptor, code, token, "prog");

        // Verify
        assert_eq!(message, expected);
    }
}
