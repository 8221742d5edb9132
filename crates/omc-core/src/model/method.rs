use indexmap::IndexMap;
use serde::Serialize;

use super::operation::{CollectionFormat, HttpVerb, ParamLocation};
use super::types::ModelType;

/// A compiled parameter, ready for emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodParameter {
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub param_type: ModelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<CollectionFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One declared outcome of a method: body and response-header types, either
/// of which may be absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ModelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<ModelType>,
}

/// The unified return type of a method: the most specific body type common
/// to all success responses, plus the aggregated header type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodReturn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ModelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<ModelType>,
}

/// The compiled, emission-ready representation of an operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    pub verb: HttpVerb,

    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    pub parameters: Vec<MethodParameter>,

    /// Request header name → value placeholder pattern.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub header_template: IndexMap<String, String>,

    pub responses: IndexMap<u16, MethodResponse>,

    /// Error/fallback outcome, compiled from the document's `default` entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_response: Option<MethodResponse>,

    pub return_type: MethodReturn,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: IndexMap<String, serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub deprecated: bool,
}

impl Method {
    /// `group.name`, or the bare name when no group is set. This is the key
    /// the uniqueness constraint is enforced over.
    pub fn qualified_name(&self) -> String {
        qualified_name(self.group.as_deref(), &self.name)
    }
}

pub(crate) fn qualified_name(group: Option<&str>, name: &str) -> String {
    match group {
        Some(group) => format!("{group}.{name}"),
        None => name.to_string(),
    }
}
