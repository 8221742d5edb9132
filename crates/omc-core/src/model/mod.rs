pub mod document;
pub mod method;
pub mod operation;
pub mod schema;
pub mod types;

pub use document::*;
pub use method::{Method, MethodParameter, MethodResponse, MethodReturn};
pub use operation::*;
pub use schema::*;
pub use types::{CompositeType, ModelType, PrimitiveKind, Property};
