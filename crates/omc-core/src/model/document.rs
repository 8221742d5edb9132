use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::MimeDefaults;

use super::operation::OperationSpec;
use super::schema::SchemaOrRef;

/// A named composite definition in a document. `base` names another
/// definition this one inherits from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,
}

/// Top-level wire shape consumed by the CLI and the integration tests.
/// The compiler itself never reads files; it is handed the deserialized
/// operations one at a time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub defaults: MimeDefaults,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, TypeDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<OperationSpec>,
}
