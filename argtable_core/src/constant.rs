pub(crate) const INT_DATATYPE: &str = "<int>";
pub(crate) const DOUBLE_DATATYPE: &str = "<double>";
pub(crate) const STRING_DATATYPE: &str = "<string>";
pub(crate) const FILE_DATATYPE: &str = "<file>";

// Separators used between the spellings of a single option.
pub(crate) const SYNTAX_SEPARATOR: &str = "|";
pub(crate) const GLOSSARY_SEPARATOR: &str = ", ";
pub(crate) const GLOSSARY_WIDTH: usize = 20;

// Integer suffix multipliers.
pub(crate) const KILOBYTE: i64 = 1024;
pub(crate) const MEGABYTE: i64 = 1024 * 1024;
pub(crate) const GIGABYTE: i64 = 1024 * 1024 * 1024;
