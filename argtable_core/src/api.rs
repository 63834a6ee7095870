mod arg;
mod capture;
mod descriptor;
mod end;
mod field;

pub use self::arg::*;
pub use capture::*;
pub use descriptor::*;
pub use end::*;
pub use field::*;
