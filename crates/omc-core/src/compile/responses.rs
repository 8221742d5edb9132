//! Per-status response classification and the default/error response.

use heck::ToPascalCase;
use log::warn;

use crate::error::{CompileError, CompileWarning};
use crate::model::operation::ResponseSpec;
use crate::model::types::ModelType;
use crate::registry::TypeRegistry;

use super::content::produces_json;

/// Outcome of classifying one numbered status code.
#[derive(Debug)]
pub struct ClassifiedResponse {
    pub body: Option<ModelType>,
    /// Contribution to return-type unification, when the strategy produced
    /// one.
    pub candidate: Option<ModelType>,
    pub warning: Option<CompileWarning>,
}

/// Body-handling strategies, tried in this order. The order is part of the
/// contract: JSON is preferred over a raw stream, a stream over an empty
/// body, and a response matching no strategy fails the whole operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyStrategy {
    Json,
    Binary,
    Empty,
}

const STRATEGIES: [BodyStrategy; 3] =
    [BodyStrategy::Json, BodyStrategy::Binary, BodyStrategy::Empty];

/// Classify one numbered status code against the effective produce list.
pub fn classify_response(
    method_name: &str,
    status: u16,
    response: &ResponseSpec,
    produces: &[String],
    registry: &TypeRegistry,
) -> Result<ClassifiedResponse, CompileError> {
    for strategy in STRATEGIES {
        if let Some(classified) =
            try_strategy(strategy, method_name, status, response, produces, registry)?
        {
            return Ok(classified);
        }
    }
    Err(CompileError::UnsupportedResponseMimeType {
        method: method_name.to_string(),
        status,
    })
}

fn try_strategy(
    strategy: BodyStrategy,
    method_name: &str,
    status: u16,
    response: &ResponseSpec,
    produces: &[String],
    registry: &TypeRegistry,
) -> Result<Option<ClassifiedResponse>, CompileError> {
    match strategy {
        BodyStrategy::Json => {
            let Some(schema) = &response.schema else {
                return Ok(None);
            };
            if !produces_json(produces) {
                return Ok(None);
            }
            // References resolve under their own name; inline schemas get
            // the synthesized per-status name.
            let hint = synthesized_name(method_name, &status.to_string());
            let resolved = registry.resolve(schema, &hint);
            Ok(Some(with_candidate(resolved)))
        }
        BodyStrategy::Binary => {
            let Some(schema) = &response.schema else {
                return Ok(None);
            };
            if produces.is_empty() {
                return Ok(None);
            }
            let hint = synthesized_name(method_name, &status.to_string());
            let resolved = registry.resolve(schema, &hint);
            if let ModelType::Composite(composite) = &resolved
                && !composite.has_byte_array_property()
            {
                return Err(CompileError::MissingByteArrayField {
                    method: method_name.to_string(),
                    status,
                    type_name: composite.name.clone(),
                });
            }
            Ok(Some(with_candidate(resolved)))
        }
        BodyStrategy::Empty => match &response.schema {
            None => Ok(Some(ClassifiedResponse {
                body: None,
                candidate: None,
                warning: None,
            })),
            Some(schema) if produces.is_empty() => {
                // The object body is assigned unconditionally; the warning
                // is additive and only fires for schemas with properties.
                let warning = registry.schema_has_properties(schema).then(|| {
                    CompileWarning::NoProduceWithBody {
                        method: method_name.to_string(),
                        status,
                    }
                });
                if let Some(w) = &warning {
                    warn!("{w}");
                }
                let mut classified = with_candidate(ModelType::object());
                classified.warning = warning;
                Ok(Some(classified))
            }
            Some(_) => Ok(None),
        },
    }
}

/// Build the default/error response body. The `default` key is exempt from
/// the unsupported-MIME failure path: anything but a successful JSON
/// resolution simply yields no default response.
pub fn build_default_response(
    method_name: &str,
    response: &ResponseSpec,
    produces: &[String],
    registry: &TypeRegistry,
) -> Option<ModelType> {
    let schema = response.schema.as_ref()?;
    if !produces_json(produces) {
        return None;
    }
    Some(registry.resolve(schema, &synthesized_name(method_name, "Default")))
}

fn with_candidate(resolved: ModelType) -> ClassifiedResponse {
    ClassifiedResponse {
        body: Some(resolved.clone()),
        candidate: Some(resolved),
        warning: None,
    }
}

/// `{MethodName}{statusKey}Response`, the name used when an inline schema
/// has no reference name of its own.
fn synthesized_name(method_name: &str, status_key: &str) -> String {
    format!("{}{}Response", method_name.to_pascal_case(), status_key)
}
