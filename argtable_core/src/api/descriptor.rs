use crate::model::ArgFlags;
use crate::parser::option_syntax;

/// The header common to every table entry: how it is spelled, displayed, and counted.
///
/// Built-in entries are described by the [`Arg`](crate::Arg) constructors.
/// A `Descriptor` need only be built directly for use with [`Arg::custom`](crate::Arg::custom).
///
/// ### Example
/// ```
/// # use argtable_core as argtable;
/// use argtable::{ArgFlags, Descriptor};
///
/// let descriptor = Descriptor::new("p", "percent,pct")
///     .datatype("<0-100>")
///     .glossary("a percentage")
///     .counts(0, 3)
///     .flags(ArgFlags::HAS_VALUE);
///
/// assert_eq!(descriptor.short_opts(), &['p']);
/// assert_eq!(descriptor.long_opts(), &["percent".to_string(), "pct".to_string()]);
/// assert_eq!(descriptor.syntax(), "-p|--percent|--pct=<0-100>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    flags: ArgFlags,
    short_opts: Vec<char>,
    long_opts: Vec<String>,
    datatype: Option<String>,
    glossary: Option<String>,
    min_count: usize,
    max_count: usize,
}

impl Descriptor {
    /// Describe an entry spelled by the `short` option characters and the comma separated `long` option names.
    /// An entry with neither is positional.
    ///
    /// The entry starts out with no datatype or glossary, and counts `0..=1`.
    pub fn new(short: impl AsRef<str>, long: impl AsRef<str>) -> Self {
        Self {
            flags: ArgFlags::empty(),
            short_opts: short.as_ref().chars().collect(),
            long_opts: long
                .as_ref()
                .split(',')
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect(),
            datatype: None,
            glossary: None,
            min_count: 0,
            max_count: 1,
        }
    }

    /// Set the datatype displayed in the syntax (ex: `<int>`).
    /// An empty datatype is ignored.
    pub fn datatype(mut self, datatype: impl Into<String>) -> Self {
        let datatype = datatype.into();
        if !datatype.is_empty() {
            self.datatype.replace(datatype);
        }
        self
    }

    /// Set the description displayed in the glossary.
    /// An empty glossary is ignored, which means the entry is left out of the glossary.
    pub fn glossary(mut self, glossary: impl Into<String>) -> Self {
        let glossary = glossary.into();
        if !glossary.is_empty() {
            self.glossary.replace(glossary);
        }
        self
    }

    /// Set the minimum and maximum number of matches.
    /// The maximum is raised to the minimum when it is smaller.
    pub fn counts(mut self, min_count: usize, max_count: usize) -> Self {
        self.min_count = min_count;
        self.max_count = max_count.max(min_count);
        self
    }

    /// Add the `flags` to this descriptor.
    pub fn flags(mut self, flags: ArgFlags) -> Self {
        self.flags.insert(flags);
        self
    }

    pub(crate) fn without_flags(mut self, flags: ArgFlags) -> Self {
        self.flags.remove(flags);
        self
    }

    /// The flags of this descriptor.
    pub fn arg_flags(&self) -> ArgFlags {
        self.flags
    }

    /// The short option characters, in declaration order.
    pub fn short_opts(&self) -> &[char] {
        &self.short_opts
    }

    /// The long option names, in declaration order.
    pub fn long_opts(&self) -> &[String] {
        &self.long_opts
    }

    /// The displayed datatype, if any.
    pub fn datatype_name(&self) -> Option<&str> {
        self.datatype.as_deref()
    }

    /// The glossary description, if any.
    pub fn glossary_text(&self) -> Option<&str> {
        self.glossary.as_deref()
    }

    /// The minimum number of matches.
    pub fn min_count(&self) -> usize {
        self.min_count
    }

    /// The maximum number of matches.
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Whether this descriptor terminates its table.
    pub fn is_terminator(&self) -> bool {
        self.flags.contains(ArgFlags::TERMINATOR)
    }

    /// Whether this option requires a value.
    pub fn has_value(&self) -> bool {
        self.flags.contains(ArgFlags::HAS_VALUE)
    }

    /// Whether this option accepts an optional value.
    pub fn has_optional_value(&self) -> bool {
        self.flags.contains(ArgFlags::HAS_OPTIONAL_VALUE)
    }

    /// Whether this entry is matched by an option (as opposed to positionally).
    pub fn is_tagged(&self) -> bool {
        !self.short_opts.is_empty() || !self.long_opts.is_empty()
    }

    /// The full syntax of this descriptor (ex: `-n|--num=<int>`).
    pub fn syntax(&self) -> String {
        option_syntax(&self.short_opts, &self.long_opts, self.datatype.as_deref())
    }
}
