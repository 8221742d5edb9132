pub mod compile;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;

pub use compile::{CompileContext, CompiledDocument, compile_document};
pub use error::{CompileError, CompileWarning};
