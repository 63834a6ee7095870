//! `argtable` is a declarative, table driven command line parser for Rust.
//!
//! A program describes its command line as a table of typed entries: switches, integers, doubles, strings, file paths, remarks, and a terminating entry which collects errors.
//! `argtable` then scans the command line against that table, converting and storing each value in its entry.
//! The same table renders the usage syntax and glossary of the program.
//!
//! `argtable` prioritizes the following design concerns:
//! * *Collect, don't fail fast*:
//! A parse never stops at the first problem.
//! Every error is recorded (up to a configured limit) so the user sees all of them at once.
//! * *Bounded memory*:
//! All storage is reserved up front when the table is built, and never grows while parsing.
//! Allocation failures are reported as errors rather than aborting the program.
//! * *Familiar syntax*:
//! The command line follows GNU `getopt_long` conventions (see [Cli Semantics](#cli-semantics)).
//! * *Re-entrant*:
//! A table may be parsed any number of times; each parse starts from a clean slate.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/echo.rs")]
//! ```
//!
//! Which generates the Cli program:
//! ```console
//! $ echo --help
//! usage: echo [-nh] [<string>]...
//!   -n                   do not output the trailing newline
//!   -h, --help           display this help and exit
//!   <string>             the strings to echo
//!
//! $ echo -n hello world
//! hello world
//!
//! $ echo -x --bogus
//! echo: invalid option "-x"
//! echo: invalid option "--bogus"
//! Try 'echo --help' for more information.
//! ```
//!
//! # Tables
//! Build an [`ArgTable`] from a sequence of [`Arg`] entries, ending with [`Arg::end`].
//! Entries after the terminator are ignored.
//!
//! Each entry kind has three constructor families, which determine how many times it may be matched:
//! ```console
//! Family | Min | Max | Example
//! ----------------------------------------------------------------------------
//! *0     | 0   | 1   | Arg::int0("n", "num", "", "a number")
//! *1     | 1   | 1   | Arg::file1("", "", "", "the input")
//! *n     | min | max | Arg::strn("", "", "<word>", 1, 10, "some words")
//! ```
//!
//! The entry kinds are:
//! ```console
//! Constructor | Storage    | Default datatype | Value
//! ---------------------------------------------------------------------------------------
//! lit*        | Literal    |                  | none (only counted)
//! int*        | Integer    | <int>            | i32; accepts 0x/0o/0b prefixes and KB/MB/GB suffixes
//! dbl*        | Double     | <double>         | f64
//! str*        | Text       | <string>         | String, verbatim
//! file*       | FilePath   | <file>           | filename, basename & extension
//! rem         | Remark     |                  | none (only displayed)
//! end         | ErrorLog   |                  | the errors of the parse
//! custom      | dyn Capture|                  | user defined
//! ```
//!
//! An entry with short options (`"n"`) and/or long options (`"num,number"`) is *tagged*, and matched by its options.
//! An entry with neither is *untagged*, and matched positionally.
//!
//! ### Defaults
//! An entry made with [`Arg::optional_value`] may be matched without a value (ex: `-n` or `--num`).
//! Such a match is counted, but leaves its value slot as is.
//! Preset the slots (ex: [`Integer::preset`]) to give these matches a default value.
//!
//! ### Custom Entries
//! Implement [`prelude::Capture`] and wrap it with [`Arg::custom`]:
//! ```no_run
#![doc = include_str!("../demos/custom.rs")]
//! ```
//!
//! # Cli Semantics
//! * The program name (`argv[0]`) is never matched.
//! * Options are matched first, wherever they appear.
//! Positional tokens are then matched against the untagged entries, in order.
//! * Short options may be clustered: `-abc` is equivalent to `-a -b -c`.
//! * A short option's value may be attached or follow it: `-n5` or `-n 5`.
//! An optional value may only be attached.
//! * A long option's value may be joined by `=` or follow it: `--num=5` or `--num 5`.
//! An optional value may only be joined.
//! * Long options may be abbreviated to any unambiguous prefix: `--verb` for `--verbose`.
//! * `--` ends the options; every later token is positional.
//! A lone `-` is positional.
//! * An untagged entry takes positional tokens until one fails to convert, at which point the next untagged entry is tried.
//! A token that no entry takes is an error.
//! * Entry counts (ex: a missing mandatory entry) are validated only when the rest of the parse is error free.
//!
//! # Errors
//! [`ArgTable::parse`] returns the number of errors, which are available via [`ArgTable::errors`].
//! Render them with [`ArgTable::error_messages`] or [`ArgTable::print_errors`]:
//! ```console
//! prog: missing option -n|--num=<int>
//! prog: invalid argument "abc" to option -n|--num=<int>
//! prog: integer overflow at option -n|--num=<int> (9GB is too large)
//! prog: option "--num" requires an argument
//! prog: unexpected argument "extra"
//! prog: too many errors to display
//! ```
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events while parsing.
pub use argtable_core::*;
