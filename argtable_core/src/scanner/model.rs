use crate::model::ArgFlags;

/// Whether an option takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HasArg {
    No,
    Required,
    Optional,
}

impl From<ArgFlags> for HasArg {
    fn from(flags: ArgFlags) -> Self {
        if flags.contains(ArgFlags::HAS_OPTIONAL_VALUE) {
            HasArg::Optional
        } else if flags.contains(ArgFlags::HAS_VALUE) {
            HasArg::Required
        } else {
            HasArg::No
        }
    }
}

/// A long option the scanner recognizes, along with the table index it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LongOption {
    pub(crate) name: String,
    pub(crate) has_arg: HasArg,
    pub(crate) index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScanEvent<'a> {
    Long {
        index: usize,
        token: &'a str,
        value: Option<&'a str>,
    },
    Short {
        option: char,
        value: Option<&'a str>,
    },
    UnknownLong {
        token: &'a str,
    },
    UnknownShort {
        option: char,
    },
    MissingArgument {
        token: &'a str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ArgFlags::empty(), HasArg::No)]
    #[case(ArgFlags::TERMINATOR, HasArg::No)]
    #[case(ArgFlags::HAS_VALUE, HasArg::Required)]
    #[case(ArgFlags::HAS_VALUE | ArgFlags::HAS_OPTIONAL_VALUE, HasArg::Optional)]
    #[case(ArgFlags::HAS_OPTIONAL_VALUE, HasArg::Optional)]
    fn has_arg_from_flags(#[case] flags: ArgFlags, #[case] expected: HasArg) {
        assert_eq!(HasArg::from(flags), expected);
    }
}
