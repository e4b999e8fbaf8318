//! Solution domain models.

mod registry;
pub use self::registry::*;

mod route;
pub use self::route::*;

mod tour;
pub use self::tour::*;
