mod removal;
pub use self::removal::*;

mod selection;
pub(crate) use self::selection::*;
