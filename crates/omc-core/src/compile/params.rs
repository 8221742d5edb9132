//! Building method parameters and the request header template.

use indexmap::IndexMap;

use crate::model::method::MethodParameter;
use crate::model::operation::{ParamLocation, ParameterSpec};
use crate::model::types::ModelType;
use crate::registry::TypeRegistry;

/// Parameters plus the request-header template accumulated while building
/// them.
#[derive(Debug, Default)]
pub struct BuiltParameters {
    pub parameters: Vec<MethodParameter>,
    pub header_template: IndexMap<String, String>,
}

/// The `{name}` value placeholder emitters substitute at call time. How an
/// array value is flattened into the placeholder is the serialization
/// collaborator's business (see [`CollectionFormat::delimiter`]); the
/// compiler only records the format on the parameter.
///
/// [`CollectionFormat::delimiter`]: crate::model::operation::CollectionFormat::delimiter
pub fn placeholder(name: &str) -> String {
    format!("{{{name}}}")
}

/// Turn deduplicated parameter specs into method parameters. Parameters
/// without a schema resolve to the generic object type. Header-located
/// parameters additionally register a `name → "{name}"` entry in the
/// request header template.
pub fn build_parameters(deduped: &[ParameterSpec], registry: &TypeRegistry) -> BuiltParameters {
    let mut built = BuiltParameters {
        parameters: Vec::with_capacity(deduped.len()),
        header_template: IndexMap::new(),
    };

    for param in deduped {
        let param_type = match &param.schema {
            Some(schema) => registry.resolve(schema, &param.name),
            None => ModelType::object(),
        };

        if param.location == ParamLocation::Header {
            built
                .header_template
                .insert(param.name.clone(), placeholder(&param.name));
        }

        built.parameters.push(MethodParameter {
            name: param.name.clone(),
            location: param.location,
            required: param.required,
            param_type,
            collection_format: param.collection_format,
            description: param.description.clone(),
        });
    }
    built
}
