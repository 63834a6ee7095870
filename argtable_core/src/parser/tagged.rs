use crate::model::{ErrorCode, Origin};
use crate::parser::options::OptionTable;
use crate::parser::table::Session;
use crate::scanner::{OptionScanner, ScanEvent};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

impl<'t> Session<'t> {
    /// Dispatch every option in `argv` to its entry.
    /// Returns the index of the first positional token in the (permuted) `argv`, or `None` when the pass could not run.
    pub(super) fn parse_tagged(&mut self, argv: &mut [&str]) -> Option<usize> {
        let options = match OptionTable::build(&self.entries) {
            Ok(options) => options,
            Err(_error) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Cannot build the option tables: {_error}");
                }
                self.register(Origin::Terminator, ErrorCode::OutOfMemory, None);
                return None;
            }
        };

        let mut scanner = OptionScanner::new(argv, options.short_spec(), options.long_options());

        for event in scanner.by_ref() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Scanned {event:?}.");
            }

            match event {
                ScanEvent::Long {
                    index,
                    token,
                    value,
                } => {
                    let has_value = self
                        .entries
                        .get(index)
                        .map(|arg| arg.descriptor().has_value())
                        .unwrap_or(false);

                    // `--name=` gives an empty value, which still counts as a match.
                    if has_value && value == Some("") {
                        self.register(Origin::Terminator, ErrorCode::MissingArgument, Some(token));
                    }

                    self.scan(index, value);
                }
                ScanEvent::Short { option, value } => {
                    match self
                        .entries
                        .iter()
                        .position(|arg| arg.descriptor().short_opts().contains(&option))
                    {
                        Some(index) => self.scan(index, value),
                        None => self.register(
                            Origin::Terminator,
                            ErrorCode::InvalidShortOption(option),
                            None,
                        ),
                    }
                }
                ScanEvent::UnknownLong { token } => {
                    self.register(Origin::Terminator, ErrorCode::InvalidLongOption, Some(token));
                }
                ScanEvent::UnknownShort { option } => {
                    self.register(Origin::Terminator, ErrorCode::InvalidShortOption(option), None);
                }
                ScanEvent::MissingArgument { token } => {
                    self.register(Origin::Terminator, ErrorCode::MissingArgument, Some(token));
                }
            }
        }

        Some(scanner.optind())
    }
}
