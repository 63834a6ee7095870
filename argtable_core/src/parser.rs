mod interface;
mod options;
mod printer;
mod table;
mod tagged;
mod untagged;

pub use interface::*;
pub use printer::option_syntax;
pub use table::*;
