use crate::api::{Arg, Descriptor};
use crate::constant::*;
use crate::parser::interface::UserInterface;

/// Render the full syntax of an option from its spellings (ex: `-n|--num|--number=<int>`).
///
/// ### Example
/// ```
/// # use argtable_core as argtable;
/// use argtable::option_syntax;
///
/// assert_eq!(option_syntax(&['v'], &["verbose"], None), "-v|--verbose");
/// assert_eq!(option_syntax(&['n'], &[] as &[&str], Some("<int>")), "-n <int>");
/// assert_eq!(option_syntax(&[], &["num", "number"], Some("<int>")), "--num|--number=<int>");
/// assert_eq!(option_syntax(&[], &[] as &[&str], Some("<file>")), "<file>");
/// ```
pub fn option_syntax<L: AsRef<str>>(short: &[char], long: &[L], datatype: Option<&str>) -> String {
    spellings(short, long, datatype, false, SYNTAX_SEPARATOR)
}

fn spellings<L: AsRef<str>>(
    short: &[char],
    long: &[L],
    datatype: Option<&str>,
    optional: bool,
    separator: &str,
) -> String {
    let mut parts: Vec<String> = short.iter().map(|option| format!("-{option}")).collect();
    parts.extend(long.iter().map(|name| format!("--{}", name.as_ref())));
    let mut syntax = parts.join(separator);

    if let Some(datatype) = datatype {
        if !long.is_empty() {
            syntax.push('=');
        } else if !short.is_empty() {
            syntax.push(' ');
        }

        syntax.push_str(&value(datatype, optional));
    }

    syntax
}

fn value(datatype: &str, optional: bool) -> String {
    if optional {
        format!("[{datatype}]")
    } else {
        datatype.to_string()
    }
}

// Only the first spelling (ex: `-n <int>`, or `--num=<int>` when there are no short options).
fn abbreviated(descriptor: &Descriptor) -> String {
    let optional = descriptor.has_optional_value();
    let datatype = descriptor.datatype_name();

    match (descriptor.short_opts().first(), descriptor.long_opts().first()) {
        (Some(option), _) => match datatype {
            Some(datatype) => format!("-{option} {}", value(datatype, optional)),
            None => format!("-{option}"),
        },
        (None, Some(name)) => match datatype {
            Some(datatype) => format!("--{name}={}", value(datatype, optional)),
            None => format!("--{name}"),
        },
        (None, None) => datatype
            .map(|datatype| value(datatype, optional))
            .unwrap_or_default(),
    }
}

// Repeat the `syntax` for each mandatory match, then bracket the optional matches.
fn repeated(syntax: &str, descriptor: &Descriptor) -> String {
    let mut out = String::default();

    for _ in 0..descriptor.min_count() {
        out.push_str(&format!(" {syntax}"));
    }

    match descriptor.max_count() - descriptor.min_count() {
        0 => {}
        1 => out.push_str(&format!(" [{syntax}]")),
        2 => out.push_str(&format!(" [{syntax}] [{syntax}]")),
        _ => out.push_str(&format!(" [{syntax}]...")),
    }

    out
}

fn is_switch(descriptor: &Descriptor) -> bool {
    !descriptor.short_opts().is_empty() && !descriptor.has_value()
}

pub(crate) struct Printer<'t> {
    entries: Vec<&'t Arg>,
}

impl<'t> Printer<'t> {
    pub(crate) fn new(entries: Vec<&'t Arg>) -> Self {
        Self { entries }
    }

    fn descriptors(&self) -> impl Iterator<Item = &Descriptor> {
        self.entries.iter().map(|arg| arg.descriptor())
    }

    // The switches clustered GNU style (ex: ` -ab[cd]`).
    fn switches(&self) -> String {
        let mandatory: String = self
            .descriptors()
            .filter(|descriptor| is_switch(descriptor) && descriptor.min_count() > 0)
            .filter_map(|descriptor| descriptor.short_opts().first())
            .collect();
        let optional: String = self
            .descriptors()
            .filter(|descriptor| is_switch(descriptor) && descriptor.min_count() == 0)
            .filter_map(|descriptor| descriptor.short_opts().first())
            .collect();

        let mut out = String::default();

        if !mandatory.is_empty() {
            out.push_str(&format!(" -{mandatory}"));
        }

        if !optional.is_empty() {
            if mandatory.is_empty() {
                out.push_str(&format!(" [-{optional}]"));
            } else {
                out.push_str(&format!("[{optional}]"));
            }
        }

        out
    }

    pub(crate) fn syntax(&self) -> String {
        let mut out = self.switches();

        for descriptor in self.descriptors() {
            if is_switch(descriptor) {
                continue;
            }

            let syntax = abbreviated(descriptor);

            if !syntax.is_empty() {
                out.push_str(&repeated(&syntax, descriptor));
            }
        }

        out
    }

    pub(crate) fn syntax_verbose(&self) -> String {
        let mut out = String::default();

        for descriptor in self.descriptors() {
            let syntax = spellings(
                descriptor.short_opts(),
                descriptor.long_opts(),
                descriptor.datatype_name(),
                descriptor.has_optional_value(),
                SYNTAX_SEPARATOR,
            );

            if !syntax.is_empty() {
                out.push_str(&repeated(&syntax, descriptor));
            }
        }

        out
    }

    pub(crate) fn glossary(&self) -> String {
        self.descriptors()
            .filter_map(|descriptor| {
                descriptor.glossary_text().map(|glossary| {
                    let syntax = spellings(
                        descriptor.short_opts(),
                        descriptor.long_opts(),
                        descriptor.datatype_name(),
                        descriptor.has_optional_value(),
                        GLOSSARY_SEPARATOR,
                    );
                    format!("  {syntax:<width$} {glossary}", width = GLOSSARY_WIDTH)
                })
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub(crate) fn print_syntax(
        &self,
        program: impl Into<String>,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        let program = program.into();
        user_interface.print(format!("usage: {program}{}", self.syntax()));
    }

    pub(crate) fn print_glossary(&self, user_interface: &(impl UserInterface + ?Sized)) {
        let glossary = self.glossary();

        if !glossary.is_empty() {
            user_interface.print(glossary);
        }
    }
}
