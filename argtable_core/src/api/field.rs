use crate::api::capture::*;
use crate::api::Descriptor;
use crate::constant::*;
use crate::model::ErrorCode;
use crate::parser::option_syntax;

/// A switch, which takes no value and only counts its matches (ex: `-v`, `--verbose`).
#[derive(Debug, Clone, Default)]
pub struct Literal {
    count: usize,
}

impl Literal {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl Capture for Literal {
    fn reset(&mut self) {
        self.count = 0;
    }

    fn scan(&mut self, descriptor: &Descriptor, _token: Option<&str>) -> Result<(), ErrorCode> {
        if self.count < descriptor.max_count() {
            self.count += 1;
            Ok(())
        } else {
            Err(ErrorCode::MaxCount)
        }
    }

    fn check(&self, descriptor: &Descriptor) -> Result<(), ErrorCode> {
        check_min_count(self.count, descriptor)
    }

    fn render_error(
        &self,
        descriptor: &Descriptor,
        code: ErrorCode,
        token: Option<&str>,
        program: &str,
    ) -> String {
        match code {
            ErrorCode::MaxCount => format!(
                "{program}: extraneous option {syntax}",
                syntax = descriptor.syntax()
            ),
            _ => render_value_error(descriptor, code, token, program),
        }
    }

    fn count(&self) -> usize {
        self.count
    }
}

/// An integer value (ex: `-n 5`, `--size=4KB`, `0x1F`).
///
/// Accepts an optional sign, then hexadecimal (`0x`), octal (`0o`), binary (`0b`) or decimal digits.
/// A case insensitive `KB`, `MB` or `GB` suffix multiplies the value by the respective power of 1024.
#[derive(Debug, Clone)]
pub struct Integer {
    values: Vec<i32>,
    count: usize,
}

impl Integer {
    pub(crate) fn new(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            values: fixed_capacity(capacity, 0)?,
            count: 0,
        })
    }

    /// The values of the current parse.
    /// A match without a value leaves its slot with the previous (or preset) content.
    pub fn values(&self) -> &[i32] {
        &self.values[..self.count]
    }

    /// Fill every slot with `value`, which remains visible for matches given without a value.
    pub fn preset(&mut self, value: i32) {
        self.values.fill(value);
    }
}

impl Capture for Integer {
    fn reset(&mut self) {
        self.count = 0;
    }

    fn scan(&mut self, _descriptor: &Descriptor, token: Option<&str>) -> Result<(), ErrorCode> {
        store(&mut self.values, &mut self.count, token, parse_integer)
    }

    fn check(&self, descriptor: &Descriptor) -> Result<(), ErrorCode> {
        check_min_count(self.count, descriptor)
    }

    fn render_error(
        &self,
        descriptor: &Descriptor,
        code: ErrorCode,
        token: Option<&str>,
        program: &str,
    ) -> String {
        render_value_error(descriptor, code, token, program)
    }

    fn count(&self) -> usize {
        self.count
    }
}

/// A floating point value (ex: `--ratio=0.5`).
#[derive(Debug, Clone)]
pub struct Double {
    values: Vec<f64>,
    count: usize,
}

impl Double {
    pub(crate) fn new(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            values: fixed_capacity(capacity, 0.0)?,
            count: 0,
        })
    }

    /// The values of the current parse.
    pub fn values(&self) -> &[f64] {
        &self.values[..self.count]
    }

    /// Fill every slot with `value`, which remains visible for matches given without a value.
    pub fn preset(&mut self, value: f64) {
        self.values.fill(value);
    }
}

impl Capture for Double {
    fn reset(&mut self) {
        self.count = 0;
    }

    fn scan(&mut self, _descriptor: &Descriptor, token: Option<&str>) -> Result<(), ErrorCode> {
        store(&mut self.values, &mut self.count, token, parse_double)
    }

    fn check(&self, descriptor: &Descriptor) -> Result<(), ErrorCode> {
        check_min_count(self.count, descriptor)
    }

    fn render_error(
        &self,
        descriptor: &Descriptor,
        code: ErrorCode,
        token: Option<&str>,
        program: &str,
    ) -> String {
        render_value_error(descriptor, code, token, program)
    }

    fn count(&self) -> usize {
        self.count
    }
}

/// A string value, stored verbatim.
#[derive(Debug, Clone)]
pub struct Text {
    values: Vec<String>,
    count: usize,
}

impl Text {
    pub(crate) fn new(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            values: fixed_capacity(capacity, String::default())?,
            count: 0,
        })
    }

    /// The values of the current parse.
    pub fn values(&self) -> &[String] {
        &self.values[..self.count]
    }

    /// Fill every slot with `value`, which remains visible for matches given without a value.
    pub fn preset(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.values.fill(value);
    }
}

impl Capture for Text {
    fn reset(&mut self) {
        self.count = 0;
    }

    fn scan(&mut self, _descriptor: &Descriptor, token: Option<&str>) -> Result<(), ErrorCode> {
        store(&mut self.values, &mut self.count, token, |token| {
            Ok(token.to_string())
        })
    }

    fn check(&self, descriptor: &Descriptor) -> Result<(), ErrorCode> {
        check_min_count(self.count, descriptor)
    }

    fn render_error(
        &self,
        descriptor: &Descriptor,
        code: ErrorCode,
        token: Option<&str>,
        program: &str,
    ) -> String {
        render_value_error(descriptor, code, token, program)
    }

    fn count(&self) -> usize {
        self.count
    }
}

/// A file path value, additionally split into its basename and extension.
///
/// | filename          | basename    | extension |
/// |-------------------|-------------|-----------|
/// | `/tmp/report.txt` | `report.txt`| `.txt`    |
/// | `archive.tar.gz`  | `archive.tar.gz` | `.gz` |
/// | `~/.profile`      | `.profile`  |           |
/// | `/usr/lib/..`     |             |           |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParts {
    /// The path, as given.
    pub filename: String,
    /// The final path component.
    pub basename: String,
    /// The extension of the basename, including the leading dot.
    pub extension: String,
}

impl PathParts {
    fn from_filename(filename: &str) -> Self {
        let basename = basename(filename);
        Self {
            filename: filename.to_string(),
            basename: basename.to_string(),
            extension: extension(basename).to_string(),
        }
    }
}

/// A file path value (see [`PathParts`]).
#[derive(Debug, Clone)]
pub struct FilePath {
    values: Vec<PathParts>,
    count: usize,
}

impl FilePath {
    pub(crate) fn new(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            values: fixed_capacity(capacity, PathParts::default())?,
            count: 0,
        })
    }

    /// The values of the current parse.
    pub fn values(&self) -> &[PathParts] {
        &self.values[..self.count]
    }

    /// The filenames of the current parse.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.values().iter().map(|parts| parts.filename.as_str())
    }

    /// Fill every slot with `filename`, which remains visible for matches given without a value.
    pub fn preset(&mut self, filename: impl AsRef<str>) {
        let parts = PathParts::from_filename(filename.as_ref());
        self.values.fill(parts);
    }
}

impl Capture for FilePath {
    fn reset(&mut self) {
        self.count = 0;
    }

    fn scan(&mut self, _descriptor: &Descriptor, token: Option<&str>) -> Result<(), ErrorCode> {
        store(&mut self.values, &mut self.count, token, |token| {
            Ok(PathParts::from_filename(token))
        })
    }

    fn check(&self, descriptor: &Descriptor) -> Result<(), ErrorCode> {
        check_min_count(self.count, descriptor)
    }

    fn render_error(
        &self,
        descriptor: &Descriptor,
        code: ErrorCode,
        token: Option<&str>,
        program: &str,
    ) -> String {
        render_value_error(descriptor, code, token, program)
    }

    fn count(&self) -> usize {
        self.count
    }
}

/// A remark, which is only displayed in the syntax and glossary.
/// It never takes part in a parse.
#[derive(Debug, Clone, Default)]
pub struct Remark {}

impl Capture for Remark {
    fn reset(&mut self) {
        // Do nothing.
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
        _code: ErrorCode,
        _token: Option<&str>,
        _program: &str,
    ) -> String {
        String::default()
    }

    fn count(&self) -> usize {
        0
    }
}

fn store<T>(
    values: &mut [T],
    count: &mut usize,
    token: Option<&str>,
    convert: impl FnOnce(&str) -> Result<T, ErrorCode>,
) -> Result<(), ErrorCode> {
    let slot = values.get_mut(*count).ok_or(ErrorCode::MaxCount)?;

    if let Some(token) = token {
        *slot = convert(token)?;
    }

    *count += 1;
    Ok(())
}

fn check_min_count(count: usize, descriptor: &Descriptor) -> Result<(), ErrorCode> {
    if count < descriptor.min_count() {
        Err(ErrorCode::MinCount)
    } else {
        Ok(())
    }
}

pub(crate) fn render_value_error(
    descriptor: &Descriptor,
    code: ErrorCode,
    token: Option<&str>,
    program: &str,
) -> String {
    let token = token.unwrap_or_default();

    match code {
        ErrorCode::MinCount => format!(
            "{program}: missing option {syntax}",
            syntax = descriptor.syntax()
        ),
        ErrorCode::MaxCount => format!(
            "{program}: excess option {syntax}",
            syntax = option_syntax(descriptor.short_opts(), descriptor.long_opts(), Some(token))
        ),
        ErrorCode::InvalidValue => format!(
            "{program}: invalid argument \"{token}\" to option {syntax}",
            syntax = descriptor.syntax()
        ),
        ErrorCode::Overflow => format!(
            "{program}: integer overflow at option {syntax} ({token} is too large)",
            syntax = descriptor.syntax()
        ),
        _ => format!("{program}: unknown error at \"{token}\""),
    }
}

fn parse_integer(token: &str) -> Result<i32, ErrorCode> {
    let (value, remainder) = radix_integer(token, 'x', 16)
        .or_else(|| radix_integer(token, 'o', 8))
        .or_else(|| radix_integer(token, 'b', 2))
        .or_else(|| decimal_integer(token))
        .ok_or(ErrorCode::InvalidValue)?;
    let multiplier = suffix_multiplier(remainder).ok_or(ErrorCode::InvalidValue)?;

    value
        .checked_mul(multiplier)
        .and_then(|value| i32::try_from(value).ok())
        .ok_or(ErrorCode::Overflow)
}

// Splits off the optional whitespace and sign, returning the sign and the rest.
fn split_sign(token: &str) -> (i64, &str) {
    let token = token.trim_start();

    if let Some(rest) = token.strip_prefix('-') {
        (-1, rest)
    } else if let Some(rest) = token.strip_prefix('+') {
        (1, rest)
    } else {
        (1, token)
    }
}

fn radix_integer(token: &str, marker: char, radix: u32) -> Option<(i64, &str)> {
    let (sign, rest) = split_sign(token);
    let rest = rest.strip_prefix('0')?;
    let rest = rest
        .strip_prefix(marker)
        .or_else(|| rest.strip_prefix(marker.to_ascii_uppercase()))?;
    let (magnitude, remainder) = digits(rest, radix)?;
    Some((sign * magnitude, remainder))
}

fn decimal_integer(token: &str) -> Option<(i64, &str)> {
    let (sign, rest) = split_sign(token);
    let (magnitude, remainder) = digits(rest, 10)?;
    Some((sign * magnitude, remainder))
}

// Accumulates the leading digits, saturating on overflow.
// Returns `None` when there are no digits at all.
fn digits(token: &str, radix: u32) -> Option<(i64, &str)> {
    let end = token
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(token.len());

    if end == 0 {
        return None;
    }

    let magnitude = token[..end]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0i64, |total, digit| {
            total
                .saturating_mul(i64::from(radix))
                .saturating_add(i64::from(digit))
        });
    Some((magnitude, &token[end..]))
}

fn suffix_multiplier(remainder: &str) -> Option<i64> {
    let remainder = remainder.trim_end();

    if remainder.is_empty() {
        Some(1)
    } else if remainder.eq_ignore_ascii_case("KB") {
        Some(KILOBYTE)
    } else if remainder.eq_ignore_ascii_case("MB") {
        Some(MEGABYTE)
    } else if remainder.eq_ignore_ascii_case("GB") {
        Some(GIGABYTE)
    } else {
        None
    }
}

fn parse_double(token: &str) -> Result<f64, ErrorCode> {
    token
        .trim_start()
        .parse::<f64>()
        .map_err(|_| ErrorCode::InvalidValue)
}

fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

fn basename(filename: &str) -> &str {
    let base = match filename.rfind(is_separator) {
        Some(index) => &filename[index + 1..],
        None => filename,
    };

    if base == "." || base == ".." {
        ""
    } else {
        base
    }
}

fn extension(basename: &str) -> &str {
    match basename.rfind('.') {
        // A leading dot marks a hidden file, not an extension.
        None | Some(0) => "",
        Some(index) if index + 1 == basename.len() => "",
        Some(index) => &basename[index..],
    }
}
