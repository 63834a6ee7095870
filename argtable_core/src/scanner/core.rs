use crate::scanner::model::*;

/// Scans the options out of an argument vector, in the manner of GNU `getopt_long`.
///
/// Options are yielded in order, while positional tokens are skipped over and permuted towards the end of `argv`.
/// Once exhausted, [`OptionScanner::optind`] is the index of the first positional token.
/// The first element of `argv` (the program name) is never scanned.
///
/// The short option specification follows `getopt`: each option character may be followed by `:` (a required value) or `::` (an optional value).
pub(crate) struct OptionScanner<'s, 'a> {
    argv: &'s mut [&'a str],
    short_spec: &'s str,
    long_options: &'s [LongOption],
    optind: usize,
    // The remaining characters of the short option cluster being scanned.
    next_char: &'a str,
    // Bounds of the positional tokens skipped so far, pending a permutation.
    first_nonopt: usize,
    last_nonopt: usize,
    finished: bool,
}

impl<'s, 'a> OptionScanner<'s, 'a> {
    pub(crate) fn new(
        argv: &'s mut [&'a str],
        short_spec: &'s str,
        long_options: &'s [LongOption],
    ) -> Self {
        let start = argv.len().min(1);
        Self {
            argv,
            short_spec,
            long_options,
            optind: start,
            next_char: "",
            first_nonopt: start,
            last_nonopt: start,
            finished: false,
        }
    }

    /// The index of the next token to scan.
    pub(crate) fn optind(&self) -> usize {
        self.optind.min(self.argv.len())
    }

    // Locate the next option token, permuting any skipped positional tokens behind the options.
    fn next_option(&mut self) -> Option<&'a str> {
        let argc = self.argv.len();
        self.last_nonopt = self.last_nonopt.min(self.optind);
        self.first_nonopt = self.first_nonopt.min(self.optind);

        if self.first_nonopt != self.last_nonopt && self.last_nonopt != self.optind {
            self.exchange();
        } else if self.last_nonopt != self.optind {
            self.first_nonopt = self.optind;
        }

        while self.optind < argc && is_positional(self.argv[self.optind]) {
            self.optind += 1;
        }

        self.last_nonopt = self.optind;

        // Everything after "--" is positional.
        if self.optind < argc && self.argv[self.optind] == "--" {
            self.optind += 1;

            if self.first_nonopt != self.last_nonopt && self.last_nonopt != self.optind {
                self.exchange();
            } else if self.first_nonopt == self.last_nonopt {
                self.first_nonopt = self.optind;
            }

            self.last_nonopt = argc;
            self.optind = argc;
        }

        if self.optind >= argc {
            if self.first_nonopt != self.last_nonopt {
                self.optind = self.first_nonopt;
            }

            return None;
        }

        Some(self.argv[self.optind])
    }

    // Move the skipped positional tokens [first_nonopt, last_nonopt) behind the options [last_nonopt, optind).
    fn exchange(&mut self) {
        let bottom = self.first_nonopt;
        let middle = self.last_nonopt;
        let top = self.optind;
        self.argv[bottom..top].rotate_left(middle - bottom);
        self.first_nonopt += top - middle;
        self.last_nonopt = top;
    }

    fn long(&mut self, token: &'a str, body: &'a str) -> ScanEvent<'a> {
        self.optind += 1;
        let (name, attached) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let (index, has_arg) = match self.find_long(name) {
            Some(found) => found,
            None => return ScanEvent::UnknownLong { token },
        };

        match (has_arg, attached) {
            (HasArg::No, Some(_)) => ScanEvent::UnknownLong { token },
            (_, Some(value)) => ScanEvent::Long {
                index,
                token,
                value: Some(value),
            },
            (HasArg::Required, None) => match self.argv.get(self.optind).copied() {
                Some(value) => {
                    self.optind += 1;
                    ScanEvent::Long {
                        index,
                        token,
                        value: Some(value),
                    }
                }
                None => ScanEvent::MissingArgument { token },
            },
            (_, None) => ScanEvent::Long {
                index,
                token,
                value: None,
            },
        }
    }

    // An exact match always wins.
    // Otherwise, a prefix is accepted so long as every option it matches belongs to the same entry.
    fn find_long(&self, name: &str) -> Option<(usize, HasArg)> {
        if name.is_empty() {
            return None;
        }

        let options = self.long_options;

        if let Some(exact) = options.iter().find(|option| option.name == name) {
            return Some((exact.index, exact.has_arg));
        }

        let mut candidates = options.iter().filter(|option| option.name.starts_with(name));
        let first = candidates.next()?;

        if candidates.all(|option| option.index == first.index) {
            Some((first.index, first.has_arg))
        } else {
            None
        }
    }

    fn short(&mut self, option: char) -> ScanEvent<'a> {
        let token = self.argv.get(self.optind).copied().unwrap_or_default();
        self.next_char = &self.next_char[option.len_utf8()..];

        if self.next_char.is_empty() {
            self.optind += 1;
        }

        match self.short_has_arg(option) {
            None => ScanEvent::UnknownShort { option },
            Some(HasArg::No) => ScanEvent::Short {
                option,
                value: None,
            },
            Some(has_arg) => {
                if !self.next_char.is_empty() {
                    // The value is attached (ex: `-n5`).
                    let value = std::mem::take(&mut self.next_char);
                    self.optind += 1;
                    ScanEvent::Short {
                        option,
                        value: Some(value),
                    }
                } else if has_arg == HasArg::Optional {
                    ScanEvent::Short {
                        option,
                        value: None,
                    }
                } else {
                    match self.argv.get(self.optind).copied() {
                        Some(value) => {
                            self.optind += 1;
                            ScanEvent::Short {
                                option,
                                value: Some(value),
                            }
                        }
                        None => ScanEvent::MissingArgument { token },
                    }
                }
            }
        }
    }

    fn short_has_arg(&self, option: char) -> Option<HasArg> {
        if option == ':' {
            return None;
        }

        let spec = self.short_spec.strip_prefix(':').unwrap_or(self.short_spec);
        let position = spec.find(option)?;
        let modifiers = &spec[position + option.len_utf8()..];

        if modifiers.starts_with("::") {
            Some(HasArg::Optional)
        } else if modifiers.starts_with(':') {
            Some(HasArg::Required)
        } else {
            Some(HasArg::No)
        }
    }
}

impl<'s, 'a> Iterator for OptionScanner<'s, 'a> {
    type Item = ScanEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.next_char.is_empty() {
            let token = match self.next_option() {
                Some(token) => token,
                None => {
                    self.finished = true;
                    return None;
                }
            };

            if let Some(body) = token.strip_prefix("--") {
                return Some(self.long(token, body));
            }

            self.next_char = &token[1..];
        }

        match self.next_char.chars().next() {
            Some(option) => Some(self.short(option)),
            None => {
                self.finished = true;
                None
            }
        }
    }
}

fn is_positional(token: &str) -> bool {
    !token.starts_with('-') || token.len() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn long_options() -> Vec<LongOption> {
        [
            ("num", HasArg::Required, 0),
            ("verbose", HasArg::No, 1),
            ("verbatim", HasArg::No, 2),
            ("level", HasArg::Optional, 3),
            ("all", HasArg::No, 4),
            ("allow", HasArg::No, 5),
            ("number", HasArg::Required, 0),
        ]
        .into_iter()
        .map(|(name, has_arg, index)| LongOption {
            name: name.to_string(),
            has_arg,
            index,
        })
        .collect()
    }

    const SHORT_SPEC: &str = ":vn:l::";

    fn scan<'a>(argv: &mut [&'a str]) -> (Vec<ScanEvent<'a>>, usize) {
        let long_options = long_options();
        let mut scanner = OptionScanner::new(argv, SHORT_SPEC, &long_options);
        let events: Vec<ScanEvent<'a>> = scanner.by_ref().collect();
        let optind = scanner.optind();
        (events, optind)
    }

    #[rstest]
    #[case(vec!["prog"], vec![], 1)]
    #[case(vec!["prog", "a"], vec![], 1)]
    #[case(vec!["prog", "-"], vec![], 1)]
    #[case(vec!["prog", "-v"], vec![ScanEvent::Short { option: 'v', value: None }], 2)]
    #[case(vec!["prog", "-vv"], vec![
        ScanEvent::Short { option: 'v', value: None },
        ScanEvent::Short { option: 'v', value: None },
    ], 2)]
    #[case(vec!["prog", "-vn5"], vec![
        ScanEvent::Short { option: 'v', value: None },
        ScanEvent::Short { option: 'n', value: Some("5") },
    ], 2)]
    #[case(vec!["prog", "-n", "5"], vec![ScanEvent::Short { option: 'n', value: Some("5") }], 3)]
    #[case(vec!["prog", "-n", "-v"], vec![ScanEvent::Short { option: 'n', value: Some("-v") }], 3)]
    #[case(vec!["prog", "-n"], vec![ScanEvent::MissingArgument { token: "-n" }], 2)]
    #[case(vec!["prog", "-vn"], vec![
        ScanEvent::Short { option: 'v', value: None },
        ScanEvent::MissingArgument { token: "-vn" },
    ], 2)]
    #[case(vec!["prog", "-l"], vec![ScanEvent::Short { option: 'l', value: None }], 2)]
    #[case(vec!["prog", "-l", "3"], vec![ScanEvent::Short { option: 'l', value: None }], 2)]
    #[case(vec!["prog", "-l3"], vec![ScanEvent::Short { option: 'l', value: Some("3") }], 2)]
    #[case(vec!["prog", "-q"], vec![ScanEvent::UnknownShort { option: 'q' }], 2)]
    #[case(vec!["prog", "-:"], vec![ScanEvent::UnknownShort { option: ':' }], 2)]
    #[case(vec!["prog", "-qv"], vec![
        ScanEvent::UnknownShort { option: 'q' },
        ScanEvent::Short { option: 'v', value: None },
    ], 2)]
    fn scan_short(
        #[case] mut argv: Vec<&str>,
        #[case] expected: Vec<ScanEvent>,
        #[case] expected_optind: usize,
    ) {
        // Execute
        let (events, optind) = scan(&mut argv);

        // Verify
        assert_eq!(events, expected);
        assert_eq!(optind, expected_optind);
    }

    #[rstest]
    #[case(vec!["prog", "--num=5"], vec![ScanEvent::Long { index: 0, token: "--num=5", value: Some("5") }])]
    #[case(vec!["prog", "--num=", "x"], vec![ScanEvent::Long { index: 0, token: "--num=", value: Some("") }])]
    #[case(vec!["prog", "--num", "7"], vec![ScanEvent::Long { index: 0, token: "--num", value: Some("7") }])]
    #[case(vec!["prog", "--num"], vec![ScanEvent::MissingArgument { token: "--num" }])]
    #[case(vec!["prog", "--nu", "7"], vec![ScanEvent::Long { index: 0, token: "--nu", value: Some("7") }])]
    #[case(vec!["prog", "--numb=1"], vec![ScanEvent::Long { index: 0, token: "--numb=1", value: Some("1") }])]
    #[case(vec!["prog", "--verbo"], vec![ScanEvent::Long { index: 1, token: "--verbo", value: None }])]
    #[case(vec!["prog", "--verb"], vec![ScanEvent::UnknownLong { token: "--verb" }])]
    #[case(vec!["prog", "--verbose=x"], vec![ScanEvent::UnknownLong { token: "--verbose=x" }])]
    #[case(vec!["prog", "--level"], vec![ScanEvent::Long { index: 3, token: "--level", value: None }])]
    #[case(vec!["prog", "--level", "2"], vec![ScanEvent::Long { index: 3, token: "--level", value: None }])]
    #[case(vec!["prog", "--level=2"], vec![ScanEvent::Long { index: 3, token: "--level=2", value: Some("2") }])]
    #[case(vec!["prog", "--all"], vec![ScanEvent::Long { index: 4, token: "--all", value: None }])]
    #[case(vec!["prog", "--al"], vec![ScanEvent::UnknownLong { token: "--al" }])]
    #[case(vec!["prog", "--allo"], vec![ScanEvent::Long { index: 5, token: "--allo", value: None }])]
    #[case(vec!["prog", "--bogus"], vec![ScanEvent::UnknownLong { token: "--bogus" }])]
    #[case(vec!["prog", "--=5"], vec![ScanEvent::UnknownLong { token: "--=5" }])]
    fn scan_long(#[case] mut argv: Vec<&str>, #[case] expected: Vec<ScanEvent>) {
        // Execute
        let (events, _) = scan(&mut argv);

        // Verify
        assert_eq!(events, expected);
    }

    #[rstest]
    #[case(
        vec!["prog", "-v", "file", "-n", "5"],
        vec!["prog", "-v", "-n", "5", "file"],
        4
    )]
    #[case(
        vec!["prog", "a", "b", "-v", "c", "--num=1"],
        vec!["prog", "-v", "--num=1", "a", "b", "c"],
        3
    )]
    #[case(
        vec!["prog", "a", "--", "-v"],
        vec!["prog", "--", "a", "-v"],
        2
    )]
    #[case(
        vec!["prog", "-v", "--", "-n", "x"],
        vec!["prog", "-v", "--", "-n", "x"],
        3
    )]
    #[case(
        vec!["prog", "-v", "--"],
        vec!["prog", "-v", "--"],
        3
    )]
    #[case(
        vec!["prog", "-", "-v"],
        vec!["prog", "-v", "-"],
        2
    )]
    fn scan_permutes(
        #[case] mut argv: Vec<&str>,
        #[case] expected_argv: Vec<&str>,
        #[case] expected_optind: usize,
    ) {
        // Execute
        let (_, optind) = scan(&mut argv);

        // Verify
        assert_eq!(argv, expected_argv);
        assert_eq!(optind, expected_optind);
    }

    #[test]
    fn scan_empty() {
        // Setup
        let mut argv: Vec<&str> = Vec::new();

        // Execute
        let (events, optind) = scan(&mut argv);

        // Verify
        assert_eq!(events, vec![]);
        assert_eq!(optind, 0);
    }

    #[test]
    fn scan_fused() {
        // Setup
        let mut argv = vec!["prog", "-v", "x"];
        let long_options = long_options();
        let mut scanner = OptionScanner::new(&mut argv, SHORT_SPEC, &long_options);

        // Execute
        assert_matches!(scanner.next(), Some(ScanEvent::Short { option: 'v', .. }));
        assert_matches!(scanner.next(), None);
        assert_matches!(scanner.next(), None);

        // Verify
        assert_eq!(scanner.optind(), 2);
    }
}
