pub mod checker;
pub mod compat;
pub mod error;
pub mod hierarchy;
pub mod index;
pub mod interception;
pub mod logging;

pub use checker::ContractChecker;
pub use error::{Result, WeavecheckError};
pub use index::{
    DiagnosticCollector, DiagnosticSink, InMemoryTypeIndex, StaticTargetRegistry, TargetRegistry,
    TypeIndex,
};
