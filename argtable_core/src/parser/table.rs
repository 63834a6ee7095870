use std::collections::HashSet;
use std::env;

use thiserror::Error;

use crate::api::{AllocError, Arg, ErrorLog, ErrorRecord};
use crate::model::{ErrorCode, Origin};
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::parser::printer::Printer;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

const RESERVED_SHORT_OPTIONS: [char; 2] = [':', '-'];

/// Error for an invalid table configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The short option is declared by more than one entry.
    #[error("Config error: short option '-{0}' is declared more than once.")]
    DuplicateShortOption(char),
    /// The long option is declared by more than one entry.
    #[error("Config error: long option '--{0}' is declared more than once.")]
    DuplicateLongOption(String),
    /// The short option is reserved by the option syntax (`:` or `-`), so it could never be matched.
    #[error("Config error: short option '{0}' can never be matched.")]
    UnmatchableShortOption(char),
    /// The long option contains `=`, which always separates a long option from its value.
    #[error("Config error: long option '--{0}' can never be matched.")]
    UnmatchableLongOption(String),
    /// The table has no terminating entry (see [`Arg::end`]).
    #[error("Config error: table has no terminating entry.")]
    MissingTerminator,
    /// The table has entries which failed to allocate, or were freed.
    #[error("Config error: table has missing entries.")]
    IncompleteTable,
}

/// A command line parser, declared as a table of entries.
///
/// The table ends at its first terminating entry ([`Arg::end`]), which collects the errors of each parse.
/// Entries after the terminator are ignored.
///
/// ### Example
/// ```
/// # use argtable_core as argtable;
/// use argtable::{Arg, ArgTable, ErrorCode};
///
/// let mut table = ArgTable::new([
///     Arg::lit0("v", "verbose", "verbose output"),
///     Arg::intn("n", "num", "", 0, 2, "a number"),
///     Arg::file1("", "", "", "the input"),
///     Arg::end(20),
/// ])
/// .unwrap();
///
/// let errors = table.parse(&["prog", "-n", "5", "input.txt", "--num=7"]).unwrap();
/// assert_eq!(errors, 0);
/// assert_eq!(table.get(1).unwrap().as_integer().unwrap().values(), &[5, 7]);
/// assert_eq!(table.get(2).unwrap().as_file_path().unwrap().values()[0].basename, "input.txt");
///
/// let errors = table.parse(&["prog", "-n", "abc"]).unwrap();
/// assert_eq!(errors, 1);
/// assert_eq!(table.errors()[0].code(), ErrorCode::InvalidValue);
/// assert_eq!(
///     table.error_messages("prog"),
///     vec!["prog: invalid argument \"abc\" to option -n|--num=<int>"]
/// );
/// ```
#[derive(Debug)]
pub struct ArgTable {
    slots: Vec<Option<Arg>>,
}

impl ArgTable {
    /// Create a table from its `entries`, in order.
    ///
    /// Entries that failed to allocate are kept as empty slots, which are reported by [`ArgTable::null_check`].
    /// Returns a [`ConfigError`] when two entries declare the same option, or the (complete) table lacks a terminator.
    pub fn new(entries: impl IntoIterator<Item = Result<Arg, AllocError>>) -> Result<Self, ConfigError> {
        let slots: Vec<Option<Arg>> = entries.into_iter().map(Result::ok).collect();
        let table = Self { slots };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut short_options: HashSet<char> = HashSet::default();
        let mut long_options: HashSet<&str> = HashSet::default();

        for arg in self.live() {
            for option in arg.descriptor().short_opts() {
                if RESERVED_SHORT_OPTIONS.contains(option) {
                    return Err(ConfigError::UnmatchableShortOption(*option));
                }

                if !short_options.insert(*option) {
                    return Err(ConfigError::DuplicateShortOption(*option));
                }
            }

            for name in arg.descriptor().long_opts() {
                if name.contains('=') {
                    return Err(ConfigError::UnmatchableLongOption(name.clone()));
                }

                if !long_options.insert(name.as_str()) {
                    return Err(ConfigError::DuplicateLongOption(name.clone()));
                }
            }
        }

        // A failed terminator is reported by null_check instead.
        if self.terminator_index().is_none() && self.slots.iter().all(Option::is_some) {
            return Err(ConfigError::MissingTerminator);
        }

        Ok(())
    }

    fn terminator_index(&self) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.as_ref()
                .map(|arg| arg.descriptor().is_terminator())
                .unwrap_or(false)
        })
    }

    // The entries before the terminator.
    fn live(&self) -> impl Iterator<Item = &Arg> {
        self.slots
            .iter()
            .flatten()
            .take_while(|arg| !arg.descriptor().is_terminator())
    }

    fn terminator(&self) -> Option<&Arg> {
        self.terminator_index()
            .and_then(|index| self.slots.get(index))
            .and_then(Option::as_ref)
    }

    /// Whether any entry (up to and including the terminator) failed to allocate or has been freed.
    /// A table without a terminator also fails this check.
    pub fn null_check(&self) -> bool {
        match self.terminator_index() {
            Some(index) => self.slots[..=index].iter().any(Option::is_none),
            None => true,
        }
    }

    /// Drop the first `count` entries.
    pub fn free_table(&mut self, count: usize) {
        for slot in self.slots.iter_mut().take(count) {
            slot.take();
        }
    }

    /// Drop every entry.
    pub fn free_all(&mut self) {
        self.free_table(self.slots.len());
    }

    /// The number of slots in this table, including the terminator and any empty slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether this table has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The entry at `index`, unless it is empty or out of bounds.
    pub fn get(&self, index: usize) -> Option<&Arg> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// The entry at `index` mutably, unless it is empty or out of bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Arg> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Parse the command line `argv` (including the program name at `argv[0]`) against this table.
    ///
    /// Every entry is reset first, so a table may be parsed repeatedly.
    /// Returns the number of errors recorded; see [`ArgTable::errors`].
    /// Returns [`ConfigError::IncompleteTable`] when [`ArgTable::null_check`] fails.
    pub fn parse<S: AsRef<str>>(&mut self, argv: &[S]) -> Result<usize, ConfigError> {
        if self.null_check() {
            return Err(ConfigError::IncompleteTable);
        }

        let end = self
            .terminator_index()
            .ok_or(ConfigError::MissingTerminator)?;

        for arg in self.slots[..=end].iter_mut().flatten() {
            arg.reset();
        }

        let (head, tail) = self.slots.split_at_mut(end);
        let terminator = tail
            .first_mut()
            .and_then(Option::as_mut)
            .ok_or(ConfigError::MissingTerminator)?;

        let mut entries: Vec<&mut Arg> = Vec::new();

        if entries.try_reserve_exact(head.len()).is_err() {
            let mut session = Session {
                entries,
                terminator,
            };
            session.register(Origin::Terminator, ErrorCode::OutOfMemory, None);
            return Ok(session.error_count());
        }

        entries.extend(head.iter_mut().flatten());

        if entries.len() != end {
            return Err(ConfigError::IncompleteTable);
        }

        let mut session = Session {
            entries,
            terminator,
        };
        Ok(session.run(argv))
    }

    /// Parse the command line of this process (see [`ArgTable::parse`]).
    pub fn parse_env(&mut self) -> Result<usize, ConfigError> {
        let argv: Vec<String> = env::args().collect();
        self.parse(&argv)
    }

    /// The error log of the terminator.
    pub fn error_log(&self) -> Option<&ErrorLog> {
        self.terminator().and_then(Arg::as_error_log)
    }

    /// The number of errors recorded by the last parse.
    pub fn error_count(&self) -> usize {
        self.error_log().map(|log| log.records().len()).unwrap_or(0)
    }

    /// The errors recorded by the last parse, in the order they were found.
    pub fn errors(&self) -> &[ErrorRecord] {
        self.error_log().map(ErrorLog::records).unwrap_or(&[])
    }

    /// Render the errors of the last parse, one message per error, each prefixed by `program`.
    pub fn error_messages(&self, program: &str) -> Vec<String> {
        self.errors()
            .iter()
            .filter_map(|record| {
                let origin = match record.origin() {
                    Origin::Entry(index) => self.get(index),
                    Origin::Terminator => self.terminator(),
                };

                origin.map(|arg| arg.render_error(record.code(), record.token(), program))
            })
            .collect()
    }

    /// Print the errors of the last parse to stderr.
    pub fn print_errors(&self, program: &str) {
        self.print_errors_with(program, &ConsoleInterface::default());
    }

    /// Print the errors of the last parse to the `user_interface`.
    pub fn print_errors_with(&self, program: &str, user_interface: &(impl UserInterface + ?Sized)) {
        for message in self.error_messages(program) {
            user_interface.print_error(message);
        }
    }

    fn printer(&self) -> Printer<'_> {
        Printer::new(self.live().collect())
    }

    /// The GNU style syntax of this table (ex: ` -v [-n <int>] <file>`).
    /// Switches are clustered up front, and each entry shows only its first spelling.
    pub fn syntax(&self) -> String {
        self.printer().syntax()
    }

    /// The verbose syntax of this table, showing every spelling (ex: ` [-v|--verbose] [-n|--num=<int>] <file>`).
    pub fn syntax_verbose(&self) -> String {
        self.printer().syntax_verbose()
    }

    /// The glossary of this table: one line per entry with a glossary.
    pub fn glossary(&self) -> String {
        self.printer().glossary()
    }

    /// Print the usage of this table to stdout (ex: `usage: prog -v [-n <int>] <file>`).
    pub fn print_syntax(&self, program: &str) {
        self.print_syntax_with(program, &ConsoleInterface::default());
    }

    /// Print the usage of this table to the `user_interface`.
    pub fn print_syntax_with(&self, program: &str, user_interface: &(impl UserInterface + ?Sized)) {
        self.printer().print_syntax(program, user_interface);
    }

    /// Print the glossary of this table to stdout.
    pub fn print_glossary(&self) {
        self.print_glossary_with(&ConsoleInterface::default());
    }

    /// Print the glossary of this table to the `user_interface`.
    pub fn print_glossary_with(&self, user_interface: &(impl UserInterface + ?Sized)) {
        self.printer().print_glossary(user_interface);
    }
}

/// The state of a single parse: the entries before the terminator, and the terminator itself.
pub(crate) struct Session<'t> {
    pub(super) entries: Vec<&'t mut Arg>,
    pub(super) terminator: &'t mut Arg,
}

impl<'t> Session<'t> {
    fn run<S: AsRef<str>>(&mut self, argv: &[S]) -> usize {
        if argv.is_empty() {
            self.check_all();
            return self.error_count();
        }

        // The scanner permutes its tokens, so work on a copy.
        let mut tokens: Vec<&str> = Vec::new();

        if tokens.try_reserve_exact(argv.len()).is_err() {
            self.register(Origin::Terminator, ErrorCode::OutOfMemory, None);
            return self.error_count();
        }

        tokens.extend(argv.iter().map(AsRef::as_ref));

        if let Some(optind) = self.parse_tagged(&mut tokens) {
            self.parse_untagged(&tokens[optind..]);
        }

        if self.error_count() == 0 {
            self.check_all();
        }

        self.error_count()
    }

    pub(super) fn register(&mut self, origin: Origin, code: ErrorCode, token: Option<&str>) {
        if let Some(log) = self.terminator.error_log_mut() {
            log.register(origin, code, token);
        }
    }

    pub(super) fn error_count(&self) -> usize {
        self.terminator.count()
    }

    // Scan the `token` into the entry at `index`, recording any error against that entry.
    pub(super) fn scan(&mut self, index: usize, token: Option<&str>) {
        let result = match self.entries.get_mut(index) {
            Some(arg) if arg.can_scan() => arg.scan(token),
            _ => return,
        };

        if let Err(code) = result {
            self.register(Origin::Entry(index), code, token);
        }
    }

    fn check_all(&mut self) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Checking {} entries.", self.entries.len());
        }

        for index in 0..self.entries.len() {
            if let Err(code) = self.entries[index].check() {
                self.register(Origin::Entry(index), code, None);
            }
        }

        if let Err(code) = self.terminator.check() {
            self.register(Origin::Terminator, code, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::interface::InMemoryInterface;
    use crate::test::assert_contains;
    use rand::Rng;
    use rstest::rstest;

    fn sample() -> ArgTable {
        ArgTable::new([
            Arg::litn("v", "verbose", 0, 2, "verbose output"),
            Arg::intn("n", "num", "", 0, 2, "a number"),
            Arg::file1("", "", "", "the input"),
            Arg::end(20),
        ])
        .unwrap()
    }

    #[test]
    fn parse() {
        // Setup
        let mut table = sample();

        // Execute
        let errors = table
            .parse(&["prog", "in.txt", "-v", "--num=5", "-vn", "6"])
            .unwrap();

        // Verify
        assert_eq!(errors, 0);
        assert_eq!(table.get(0).unwrap().count(), 2);
        assert_eq!(table.get(1).unwrap().as_integer().unwrap().values(), &[5, 6]);
        assert_eq!(
            table
                .get(2)
                .unwrap()
                .as_file_path()
                .unwrap()
                .filenames()
                .collect::<Vec<_>>(),
            vec!["in.txt"]
        );
    }

    #[test]
    fn parse_owned_argv() {
        // Setup
        let mut table = sample();
        let argv: Vec<String> = vec!["prog".to_string(), "x".to_string()];

        // Execute
        let errors = table.parse(&argv).unwrap();

        // Verify
        assert_eq!(errors, 0);
    }

    #[test]
    fn parse_empty_argv() {
        // Setup
        let mut table = sample();
        let argv: Vec<&str> = Vec::new();

        // Execute
        let errors = table.parse(&argv).unwrap();

        // Verify
        assert_eq!(errors, 1);
        assert_eq!(table.errors()[0].code(), ErrorCode::MinCount);
        assert_eq!(table.errors()[0].origin(), Origin::Entry(2));
    }

    #[test]
    fn parse_resets() {
        // Setup
        let mut table = sample();
        table.parse(&["prog", "-v", "-n", "1", "x", "y"]).unwrap();
        assert_eq!(table.error_count(), 1);

        // Execute
        let errors = table.parse(&["prog", "x"]).unwrap();

        // Verify
        assert_eq!(errors, 0);
        assert_eq!(table.get(0).unwrap().count(), 0);
        assert_eq!(table.get(1).unwrap().count(), 0);
        assert_eq!(table.get(2).unwrap().count(), 1);
    }

    #[test]
    fn parse_random_repeats() {
        // Setup
        let mut table = sample();
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let verbose = rng.gen_range(0..=2);
            let mut argv = vec!["prog".to_string()];
            argv.extend((0..verbose).map(|_| "-v".to_string()));
            argv.push("file".to_string());

            // Execute
            let errors = table.parse(&argv).unwrap();

            // Verify
            assert_eq!(errors, 0);
            assert_eq!(table.get(0).unwrap().count(), verbose);
        }
    }

    #[test]
    fn parse_error_messages() {
        // Setup
        let mut table = sample();

        // Execute
        let errors = table
            .parse(&["prog", "-q", "--bogus", "-n", "abc", "--num", "a", "b", "c"])
            .unwrap();

        // Verify
        assert_eq!(errors, 5);
        assert_eq!(
            table.error_messages("prog"),
            vec![
                "prog: invalid option \"-q\"",
                "prog: invalid option \"--bogus\"",
                "prog: invalid argument \"abc\" to option -n|--num=<int>",
                "prog: invalid argument \"a\" to option -n|--num=<int>",
                "prog: excess option c",
            ]
        );
    }

    #[test]
    fn print_errors() {
        // Setup
        let mut table = sample();
        table.parse(&["prog"]).unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        table.print_errors_with("prog", &interface);

        // Verify
        let (messages, errors) = interface.consume();
        assert!(messages.is_empty());
        assert_eq!(errors, vec!["prog: missing option <file>"]);
    }

    #[rstest]
    #[case(
        vec![Arg::lit0("v", "", ""), Arg::lit0("v", "", ""), Arg::end(1)],
        ConfigError::DuplicateShortOption('v')
    )]
    #[case(
        vec![Arg::lit0("a", "all", ""), Arg::int0("b", "all", "", ""), Arg::end(1)],
        ConfigError::DuplicateLongOption("all".to_string())
    )]
    #[case(
        vec![Arg::lit0(":", "", ""), Arg::end(1)],
        ConfigError::UnmatchableShortOption(':')
    )]
    #[case(
        vec![Arg::lit0("a-", "", ""), Arg::end(1)],
        ConfigError::UnmatchableShortOption('-')
    )]
    #[case(
        vec![Arg::lit0("", "all,a=b", ""), Arg::end(1)],
        ConfigError::UnmatchableLongOption("a=b".to_string())
    )]
    #[case(vec![Arg::lit0("v", "", "")], ConfigError::MissingTerminator)]
    #[case(vec![], ConfigError::MissingTerminator)]
    fn new_invalid(#[case] entries: Vec<Result<Arg, AllocError>>, #[case] expected: ConfigError) {
        // Execute
        let result = ArgTable::new(entries);

        // Verify
        assert_eq!(result.unwrap_err(), expected);
    }

    #[rstest]
    #[case(ConfigError::DuplicateShortOption('v'), "'-v' is declared more than once")]
    #[case(ConfigError::DuplicateLongOption("all".to_string()), "'--all' is declared more than once")]
    #[case(ConfigError::UnmatchableShortOption(':'), "':' can never be matched")]
    #[case(ConfigError::UnmatchableLongOption("a=b".to_string()), "'--a=b' can never be matched")]
    #[case(ConfigError::MissingTerminator, "no terminating entry")]
    #[case(ConfigError::IncompleteTable, "missing entries")]
    fn config_error_display(#[case] error: ConfigError, #[case] expected: &str) {
        let message = error.to_string();
        assert_contains!(message, "Config error: ");
        assert_contains!(message, expected);
    }

    #[test]
    fn new_ignores_after_terminator() {
        // Execute
        let table = ArgTable::new([
            Arg::lit0("v", "", ""),
            Arg::end(1),
            Arg::lit0("v", "", ""),
        ])
        .unwrap();

        // Verify
        assert!(!table.null_check());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn null_check() {
        // Setup
        let table = ArgTable::new([
            Arg::lit0("v", "", ""),
            Arg::intn("n", "", "", 0, usize::MAX, ""),
            Arg::end(1),
        ])
        .unwrap();
        let mut complete = sample();

        // Execute & verify
        assert!(table.null_check());
        assert!(!complete.null_check());
        complete.free_table(1);
        assert!(complete.null_check());
        assert!(complete.get(0).is_none());
        assert!(complete.get(1).is_some());
    }

    #[test]
    fn parse_incomplete() {
        // Setup
        let mut table = sample();
        table.free_all();

        // Execute
        let result = table.parse(&["prog"]);

        // Verify
        assert_eq!(result, Err(ConfigError::IncompleteTable));
        assert_eq!(table.error_count(), 0);
        assert!(table.errors().is_empty());
        table.free_all();
        assert!(!table.is_empty());
    }

    #[test]
    fn parse_missing_terminator_slot() {
        // Setup
        let mut table = ArgTable::new([Arg::lit0("v", "", ""), Arg::end(usize::MAX)]).unwrap();

        // Execute
        let result = table.parse(&["prog"]);

        // Verify
        assert!(table.null_check());
        assert_eq!(result, Err(ConfigError::IncompleteTable));
    }
}
