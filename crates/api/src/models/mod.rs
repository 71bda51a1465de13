pub mod diagnostic;
pub mod types;

pub use diagnostic::*;
pub use types::*;
