use crate::api::capture::*;
use crate::api::{Descriptor, Double, ErrorLog, FilePath, Integer, Literal, Remark, Text};
use crate::constant::*;
use crate::model::{ArgFlags, ErrorCode};

/// The storage behind a table entry.
pub enum ArgKind {
    /// See [`Literal`].
    Literal(Literal),
    /// See [`Integer`].
    Integer(Integer),
    /// See [`Double`].
    Double(Double),
    /// See [`Text`].
    Text(Text),
    /// See [`FilePath`].
    FilePath(FilePath),
    /// See [`Remark`].
    Remark(Remark),
    /// See [`ErrorLog`].
    End(ErrorLog),
    /// A user defined kind.
    Custom(Box<dyn Capture>),
}

impl std::fmt::Debug for ArgKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgKind::Literal(inner) => f.debug_tuple("Literal").field(inner).finish(),
            ArgKind::Integer(inner) => f.debug_tuple("Integer").field(inner).finish(),
            ArgKind::Double(inner) => f.debug_tuple("Double").field(inner).finish(),
            ArgKind::Text(inner) => f.debug_tuple("Text").field(inner).finish(),
            ArgKind::FilePath(inner) => f.debug_tuple("FilePath").field(inner).finish(),
            ArgKind::Remark(inner) => f.debug_tuple("Remark").field(inner).finish(),
            ArgKind::End(inner) => f.debug_tuple("End").field(inner).finish(),
            ArgKind::Custom(inner) => f
                .debug_struct("Custom")
                .field("count", &inner.count())
                .finish_non_exhaustive(),
        }
    }
}

impl ArgKind {
    fn capture(&self) -> &dyn Capture {
        match self {
            ArgKind::Literal(inner) => inner,
            ArgKind::Integer(inner) => inner,
            ArgKind::Double(inner) => inner,
            ArgKind::Text(inner) => inner,
            ArgKind::FilePath(inner) => inner,
            ArgKind::Remark(inner) => inner,
            ArgKind::End(inner) => inner,
            ArgKind::Custom(inner) => inner.as_ref(),
        }
    }

    fn capture_mut(&mut self) -> &mut dyn Capture {
        match self {
            ArgKind::Literal(inner) => inner,
            ArgKind::Integer(inner) => inner,
            ArgKind::Double(inner) => inner,
            ArgKind::Text(inner) => inner,
            ArgKind::FilePath(inner) => inner,
            ArgKind::Remark(inner) => inner,
            ArgKind::End(inner) => inner,
            ArgKind::Custom(inner) => inner.as_mut(),
        }
    }
}

/// A single entry of an [`ArgTable`](crate::ArgTable).
///
/// Entries are made with the constructor families:
/// * `*0`: an optional entry, matched at most once.
/// * `*1`: a mandatory entry, matched exactly once.
/// * `*n`: an entry matched between `min` and `max` times.
///
/// Every constructor takes the short option characters and comma separated long option names (ex: `"n"`, `"num,number"`).
/// When both are empty, the entry is matched positionally.
/// An empty datatype selects the kind's default (ex: `<int>`), while an empty glossary leaves the entry out of the glossary.
///
/// Constructors report an [`AllocError`] when their storage cannot be reserved.
/// A table built with a failed entry will be caught by [`ArgTable::null_check`](crate::ArgTable::null_check).
///
/// ### Example
/// ```
/// # use argtable_core as argtable;
/// use argtable::Arg;
///
/// let verbose = Arg::litn("v", "verbose", 0, 3, "more output").unwrap();
/// let size = Arg::int0("s", "size", "<bytes>", "buffer size").unwrap();
/// let inputs = Arg::filen("", "", "", 1, 10, "input files").unwrap();
///
/// assert_eq!(verbose.descriptor().max_count(), 3);
/// assert_eq!(size.descriptor().syntax(), "-s|--size=<bytes>");
/// assert!(!inputs.descriptor().is_tagged());
/// ```
#[derive(Debug)]
pub struct Arg {
    descriptor: Descriptor,
    kind: ArgKind,
}

impl Arg {
    fn new(descriptor: Descriptor, kind: ArgKind) -> Self {
        Self { descriptor, kind }
    }

    /// An optional switch.
    pub fn lit0(short: &str, long: &str, glossary: &str) -> Result<Self, AllocError> {
        Self::litn(short, long, 0, 1, glossary)
    }

    /// A mandatory switch.
    pub fn lit1(short: &str, long: &str, glossary: &str) -> Result<Self, AllocError> {
        Self::litn(short, long, 1, 1, glossary)
    }

    /// A switch matched between `min` and `max` times.
    pub fn litn(
        short: &str,
        long: &str,
        min: usize,
        max: usize,
        glossary: &str,
    ) -> Result<Self, AllocError> {
        let descriptor = Descriptor::new(short, long)
            .glossary(glossary)
            .counts(min, max);
        Ok(Self::new(descriptor, ArgKind::Literal(Literal::new())))
    }

    /// An optional integer.
    pub fn int0(short: &str, long: &str, datatype: &str, glossary: &str) -> Result<Self, AllocError> {
        Self::intn(short, long, datatype, 0, 1, glossary)
    }

    /// A mandatory integer.
    pub fn int1(short: &str, long: &str, datatype: &str, glossary: &str) -> Result<Self, AllocError> {
        Self::intn(short, long, datatype, 1, 1, glossary)
    }

    /// An integer matched between `min` and `max` times.
    pub fn intn(
        short: &str,
        long: &str,
        datatype: &str,
        min: usize,
        max: usize,
        glossary: &str,
    ) -> Result<Self, AllocError> {
        let descriptor = valued(short, long, datatype, INT_DATATYPE, min, max, glossary);
        let integer = Integer::new(descriptor.max_count())?;
        Ok(Self::new(descriptor, ArgKind::Integer(integer)))
    }

    /// An optional double.
    pub fn dbl0(short: &str, long: &str, datatype: &str, glossary: &str) -> Result<Self, AllocError> {
        Self::dbln(short, long, datatype, 0, 1, glossary)
    }

    /// A mandatory double.
    pub fn dbl1(short: &str, long: &str, datatype: &str, glossary: &str) -> Result<Self, AllocError> {
        Self::dbln(short, long, datatype, 1, 1, glossary)
    }

    /// A double matched between `min` and `max` times.
    pub fn dbln(
        short: &str,
        long: &str,
        datatype: &str,
        min: usize,
        max: usize,
        glossary: &str,
    ) -> Result<Self, AllocError> {
        let descriptor = valued(short, long, datatype, DOUBLE_DATATYPE, min, max, glossary);
        let double = Double::new(descriptor.max_count())?;
        Ok(Self::new(descriptor, ArgKind::Double(double)))
    }

    /// An optional string.
    pub fn str0(short: &str, long: &str, datatype: &str, glossary: &str) -> Result<Self, AllocError> {
        Self::strn(short, long, datatype, 0, 1, glossary)
    }

    /// A mandatory string.
    pub fn str1(short: &str, long: &str, datatype: &str, glossary: &str) -> Result<Self, AllocError> {
        Self::strn(short, long, datatype, 1, 1, glossary)
    }

    /// A string matched between `min` and `max` times.
    pub fn strn(
        short: &str,
        long: &str,
        datatype: &str,
        min: usize,
        max: usize,
        glossary: &str,
    ) -> Result<Self, AllocError> {
        let descriptor = valued(short, long, datatype, STRING_DATATYPE, min, max, glossary);
        let text = Text::new(descriptor.max_count())?;
        Ok(Self::new(descriptor, ArgKind::Text(text)))
    }

    /// An optional file path.
    pub fn file0(short: &str, long: &str, datatype: &str, glossary: &str) -> Result<Self, AllocError> {
        Self::filen(short, long, datatype, 0, 1, glossary)
    }

    /// A mandatory file path.
    pub fn file1(short: &str, long: &str, datatype: &str, glossary: &str) -> Result<Self, AllocError> {
        Self::filen(short, long, datatype, 1, 1, glossary)
    }

    /// A file path matched between `min` and `max` times.
    pub fn filen(
        short: &str,
        long: &str,
        datatype: &str,
        min: usize,
        max: usize,
        glossary: &str,
    ) -> Result<Self, AllocError> {
        let descriptor = valued(short, long, datatype, FILE_DATATYPE, min, max, glossary);
        let file = FilePath::new(descriptor.max_count())?;
        Ok(Self::new(descriptor, ArgKind::FilePath(file)))
    }

    /// A remark, shown in the syntax (via its `datatype`) and glossary only.
    pub fn rem(datatype: &str, glossary: &str) -> Result<Self, AllocError> {
        let descriptor = Descriptor::new("", "")
            .datatype(datatype)
            .glossary(glossary)
            .counts(1, 1);
        Ok(Self::new(descriptor, ArgKind::Remark(Remark::default())))
    }

    /// The terminating entry, which collects up to `max_errors` errors (at least 1).
    pub fn end(max_errors: usize) -> Result<Self, AllocError> {
        let descriptor = Descriptor::new("", "")
            .counts(1, max_errors)
            .flags(ArgFlags::TERMINATOR);
        let log = ErrorLog::new(descriptor.max_count())?;
        Ok(Self::new(descriptor, ArgKind::End(log)))
    }

    /// An entry of a user defined kind.
    /// The descriptor may not mark a terminator; that flag is dropped.
    pub fn custom(
        descriptor: Descriptor,
        capture: impl Capture + 'static,
    ) -> Result<Self, AllocError> {
        Ok(Self::new(
            descriptor.without_flags(ArgFlags::TERMINATOR),
            ArgKind::Custom(Box::new(capture)),
        ))
    }

    /// Allow the value of this entry to be omitted (ex: `-n` or `--num` in addition to `-n5` or `--num=5`).
    /// Has no effect on entries which take no value.
    pub fn optional_value(mut self) -> Self {
        if self.descriptor.has_value() {
            self.descriptor = self.descriptor.flags(ArgFlags::HAS_OPTIONAL_VALUE);
        }
        self
    }

    /// The descriptor of this entry.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The storage of this entry.
    pub fn kind(&self) -> &ArgKind {
        &self.kind
    }

    /// The storage of this entry, mutably (ex: to preset default values).
    pub fn kind_mut(&mut self) -> &mut ArgKind {
        &mut self.kind
    }

    /// The number of times this entry was matched in the last parse.
    /// For the terminator, this is the number of errors.
    pub fn count(&self) -> usize {
        self.kind.capture().count()
    }

    /// This entry as a [`Literal`], if it is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.kind {
            ArgKind::Literal(inner) => Some(inner),
            _ => None,
        }
    }

    /// This entry as an [`Integer`], if it is one.
    pub fn as_integer(&self) -> Option<&Integer> {
        match &self.kind {
            ArgKind::Integer(inner) => Some(inner),
            _ => None,
        }
    }

    /// This entry as a [`Double`], if it is one.
    pub fn as_double(&self) -> Option<&Double> {
        match &self.kind {
            ArgKind::Double(inner) => Some(inner),
            _ => None,
        }
    }

    /// This entry as a [`Text`], if it is one.
    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            ArgKind::Text(inner) => Some(inner),
            _ => None,
        }
    }

    /// This entry as a [`FilePath`], if it is one.
    pub fn as_file_path(&self) -> Option<&FilePath> {
        match &self.kind {
            ArgKind::FilePath(inner) => Some(inner),
            _ => None,
        }
    }

    /// This entry as an [`ErrorLog`], if it is the terminator.
    pub fn as_error_log(&self) -> Option<&ErrorLog> {
        match &self.kind {
            ArgKind::End(inner) => Some(inner),
            _ => None,
        }
    }

    pub(crate) fn error_log_mut(&mut self) -> Option<&mut ErrorLog> {
        match &mut self.kind {
            ArgKind::End(inner) => Some(inner),
            _ => None,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.kind.capture_mut().reset();
    }

    pub(crate) fn can_scan(&self) -> bool {
        self.kind.capture().can_scan()
    }

    pub(crate) fn scan(&mut self, token: Option<&str>) -> Result<(), ErrorCode> {
        let Arg { descriptor, kind } = self;
        kind.capture_mut().scan(descriptor, token)
    }

    pub(crate) fn check(&self) -> Result<(), ErrorCode> {
        self.kind.capture().check(&self.descriptor)
    }

    pub(crate) fn render_error(&self, code: ErrorCode, token: Option<&str>, program: &str) -> String {
        self.kind
            .capture()
            .render_error(&self.descriptor, code, token, program)
    }
}

fn valued(
    short: &str,
    long: &str,
    datatype: &str,
    default_datatype: &str,
    min: usize,
    max: usize,
    glossary: &str,
) -> Descriptor {
    let datatype = if datatype.is_empty() {
        default_datatype
    } else {
        datatype
    };

    Descriptor::new(short, long)
        .datatype(datatype)
        .glossary(glossary)
        .counts(min, max)
        .flags(ArgFlags::HAS_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Arg::lit0("v", "", ""), 0, 1, None)]
    #[case(Arg::lit1("v", "", ""), 1, 1, None)]
    #[case(Arg::litn("v", "", 2, 5, ""), 2, 5, None)]
    #[case(Arg::int0("n", "", "", ""), 0, 1, Some("<int>"))]
    #[case(Arg::int1("n", "", "<n>", ""), 1, 1, Some("<n>"))]
    #[case(Arg::intn("n", "", "", 0, 4, ""), 0, 4, Some("<int>"))]
    #[case(Arg::dbl0("d", "", "", ""), 0, 1, Some("<double>"))]
    #[case(Arg::dbl1("d", "", "", ""), 1, 1, Some("<double>"))]
    #[case(Arg::dbln("d", "", "", 3, 1, ""), 3, 3, Some("<double>"))]
    #[case(Arg::str0("s", "", "", ""), 0, 1, Some("<string>"))]
    #[case(Arg::str1("s", "", "", ""), 1, 1, Some("<string>"))]
    #[case(Arg::strn("s", "", "", 0, 9, ""), 0, 9, Some("<string>"))]
    #[case(Arg::file0("f", "", "", ""), 0, 1, Some("<file>"))]
    #[case(Arg::file1("f", "", "", ""), 1, 1, Some("<file>"))]
    #[case(Arg::filen("f", "", "", 1, 2, ""), 1, 2, Some("<file>"))]
    #[case(Arg::rem("<extra>", ""), 1, 1, Some("<extra>"))]
    #[case(Arg::end(20), 1, 20, None)]
    #[case(Arg::end(0), 1, 1, None)]
    fn constructors(
        #[case] arg: Result<Arg, AllocError>,
        #[case] expected_min: usize,
        #[case] expected_max: usize,
        #[case] expected_datatype: Option<&str>,
    ) {
        // Execute
        let arg = arg.unwrap();

        // Verify
        assert_eq!(arg.descriptor().min_count(), expected_min);
        assert_eq!(arg.descriptor().max_count(), expected_max);
        assert_eq!(arg.descriptor().datatype_name(), expected_datatype);
        assert_eq!(arg.count(), 0);
    }

    #[test]
    fn value_flags() {
        let lit = Arg::lit0("v", "", "").unwrap();
        let int = Arg::int0("n", "", "", "").unwrap();
        let end = Arg::end(1).unwrap();
        let rem = Arg::rem("", "").unwrap();

        assert!(!lit.descriptor().has_value());
        assert!(int.descriptor().has_value());
        assert!(end.descriptor().is_terminator());
        assert!(!rem.can_scan());
        assert!(!end.can_scan());
        assert!(int.can_scan());
    }

    #[test]
    fn optional_value() {
        // Execute
        let int = Arg::int0("n", "", "", "").unwrap().optional_value();
        let lit = Arg::lit0("v", "", "").unwrap().optional_value();

        // Verify
        assert!(int.descriptor().has_value());
        assert!(int.descriptor().has_optional_value());
        assert!(!lit.descriptor().has_optional_value());
    }

    #[test]
    fn storage_too_large() {
        // Execute
        let result = Arg::intn("n", "", "", 0, usize::MAX, "");

        // Verify
        assert_matches!(result, Err(AllocError { .. }));
    }

    #[test]
    fn scan_reset() {
        // Setup
        let mut arg = Arg::intn("n", "num", "", 0, 2, "").unwrap();

        // Execute
        arg.scan(Some("1")).unwrap();
        arg.scan(Some("2")).unwrap();
        let overflowed = arg.scan(Some("3"));

        // Verify
        assert_matches!(overflowed, Err(ErrorCode::MaxCount));
        assert_eq!(arg.as_integer().unwrap().values(), &[1, 2]);
        arg.reset();
        assert_eq!(arg.count(), 0);
        assert!(arg.as_integer().unwrap().values().is_empty());
    }

    #[test]
    fn accessors_mismatch() {
        let arg = Arg::str0("s", "", "", "").unwrap();
        assert!(arg.as_text().is_some());
        assert!(arg.as_integer().is_none());
        assert!(arg.as_literal().is_none());
        assert!(arg.as_double().is_none());
        assert!(arg.as_file_path().is_none());
        assert!(arg.as_error_log().is_none());
    }

    struct Counter {
        count: usize,
    }

    impl Capture for Counter {
        fn reset(&mut self) {
            self.count = 0;
        }

        fn scan(&mut self, _descriptor: &Descriptor, _token: Option<&str>) -> Result<(), ErrorCode> {
            self.count += 1;
            Err(ErrorCode::Custom(7))
        }

        fn check(&self, _descriptor: &Descriptor) -> Result<(), ErrorCode> {
            Ok(())
        }

        fn render_error(
            &self,
            _descriptor: &Descriptor,
            code: ErrorCode,
            _token: Option<&str>,
            program: &str,
        ) -> String {
            format!("{program}: {code}")
        }

        fn count(&self) -> usize {
            self.count
        }
    }

    #[test]
    fn custom_kind() {
        // Setup
        let descriptor = Descriptor::new("c", "").flags(ArgFlags::TERMINATOR);
        let mut arg = Arg::custom(descriptor, Counter { count: 0 }).unwrap();

        // Execute
        let result = arg.scan(None);

        // Verify
        assert_matches!(result, Err(ErrorCode::Custom(7)));
        assert!(!arg.descriptor().is_terminator());
        assert_eq!(arg.count(), 1);
        assert_eq!(
            arg.render_error(ErrorCode::Custom(7), None, "prog"),
            "prog: Custom(7)"
        );
        assert_eq!(format!("{:?}", arg.kind()), "Custom { count: 1, .. }");
    }
}
