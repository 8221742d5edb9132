//! The operation→method compiler.
//!
//! [`CompileContext`] owns the state shared across the builds of one
//! document: the type registry and the set of already-assembled method
//! names. `compile` takes `&mut self`, so exclusive access during a build
//! is enforced by the borrow checker; callers processing documents
//! concurrently need one context per document.

pub mod content;
pub mod dedup;
pub mod headers;
pub mod params;
pub mod responses;
pub mod unify;

pub use content::JSON_MIME;

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, error};

use crate::config::MimeDefaults;
use crate::error::{CompileError, CompileWarning};
use crate::model::document::ServiceDocument;
use crate::model::method::{Method, MethodResponse, MethodReturn, qualified_name};
use crate::model::operation::{DEFAULT_RESPONSE_KEY, OperationSpec};
use crate::model::types::{CompositeType, ModelType};
use crate::registry::TypeRegistry;

/// Shared state for compiling the operations of one document.
#[derive(Debug, Default)]
pub struct CompileContext {
    registry: TypeRegistry,
    defaults: MimeDefaults,
    assembled: HashSet<String>,
    warnings: Vec<CompileWarning>,
}

/// A per-operation failure captured by the document driver.
#[derive(Debug)]
pub struct FailedOperation {
    pub id: String,
    pub error: CompileError,
}

/// Everything a document compile produced.
#[derive(Debug, Default)]
pub struct CompiledDocument {
    pub methods: Vec<Method>,
    pub failures: Vec<FailedOperation>,
}

impl CompileContext {
    pub fn new(registry: TypeRegistry, defaults: MimeDefaults) -> Self {
        Self {
            registry,
            defaults,
            assembled: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    /// Context seeded from a document's definitions and MIME defaults.
    pub fn for_document(doc: &ServiceDocument) -> Self {
        Self::new(
            TypeRegistry::from_definitions(&doc.definitions),
            doc.defaults.clone(),
        )
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Non-fatal diagnostics accumulated across successful builds.
    pub fn warnings(&self) -> &[CompileWarning] {
        &self.warnings
    }

    /// Compile one operation into an emission-ready method.
    ///
    /// Fatal errors abort the build with no side effect on the registry or
    /// the uniqueness set: synthesized composites (inline response types,
    /// the error type, the header type) are staged locally and registered
    /// only after every step, including the uniqueness check, has
    /// succeeded.
    pub fn compile(&mut self, op: &OperationSpec) -> Result<Method, CompileError> {
        if op.id.trim().is_empty() {
            return Err(CompileError::InvalidInput(
                "operation id must not be empty".to_string(),
            ));
        }

        let produces = content::effective(&op.produces, &self.defaults.produces);
        let consumes = content::effective(&op.consumes, &self.defaults.consumes);
        let content_type = content::request_content_type(consumes);

        let deduped = dedup::dedup_parameters(&op.parameters);
        let built = params::build_parameters(&deduped, &self.registry);

        let header_type = headers::aggregate_headers(op, &self.registry);
        let header_model = header_type.clone().map(ModelType::Composite);

        let mut pending: Vec<CompositeType> = Vec::new();
        let mut warnings: Vec<CompileWarning> = Vec::new();
        let mut candidates: Vec<ModelType> = Vec::new();
        let mut method_responses: IndexMap<u16, MethodResponse> = IndexMap::new();
        let mut default_body: Option<ModelType> = None;

        for (key, response) in &op.responses {
            if key == DEFAULT_RESPONSE_KEY {
                default_body =
                    responses::build_default_response(&op.id, response, produces, &self.registry);
                if let Some(body) = &default_body {
                    self.stage_if_new(body, &mut pending);
                }
                continue;
            }

            let status: u16 = key.parse().map_err(|_| {
                CompileError::InvalidInput(format!(
                    "response key {key:?} is neither a status code nor \"{DEFAULT_RESPONSE_KEY}\""
                ))
            })?;

            let classified =
                responses::classify_response(&op.id, status, response, produces, &self.registry)?;
            if let Some(warning) = classified.warning {
                warnings.push(warning);
            }
            if let Some(body) = &classified.body {
                self.stage_if_new(body, &mut pending);
            }
            if let Some(candidate) = classified.candidate {
                candidates.push(candidate);
            }
            method_responses.insert(
                status,
                MethodResponse {
                    body: classified.body,
                    headers: header_model.clone(),
                },
            );
        }

        let return_body = unify::unify_return_type(&candidates, &self.registry);

        // A success response whose body duplicates the error type is
        // redundant with the error channel; drop it after unification.
        if let Some(ModelType::Composite(error_type)) = &default_body {
            method_responses.retain(|_, response| {
                !matches!(&response.body, Some(ModelType::Composite(body)) if body.same_shape(error_type))
            });
        }

        let fq_name = qualified_name(op.group.as_deref(), &op.id);
        if self.assembled.contains(&fq_name) {
            return Err(CompileError::DuplicateMethodName(fq_name));
        }

        // Everything succeeded: publish side effects.
        if let Some(header_type) = header_type {
            if !self.registry.contains(&header_type.name) {
                pending.push(header_type);
            }
        }
        for composite in pending {
            self.registry.register(composite);
        }
        self.assembled.insert(fq_name);
        self.warnings.extend(warnings);

        debug!(
            "assembled method {} ({} responses, {} parameters)",
            op.id,
            method_responses.len(),
            built.parameters.len()
        );

        Ok(Method {
            name: op.id.clone(),
            group: op.group.clone(),
            verb: op.verb,
            path: op.path.clone(),
            content_type,
            parameters: built.parameters,
            header_template: built.header_template,
            responses: method_responses,
            default_response: default_body.map(|body| MethodResponse {
                body: Some(body),
                headers: header_model.clone(),
            }),
            return_type: MethodReturn {
                body: return_body,
                headers: header_model,
            },
            extensions: op.extensions.clone(),
            summary: op.summary.clone(),
            description: op.description.clone(),
            deprecated: op.deprecated,
        })
    }

    /// Stage a freshly synthesized composite for registration at commit
    /// time. Types already registered (or already staged) are left alone.
    fn stage_if_new(&self, body: &ModelType, pending: &mut Vec<CompositeType>) {
        let ModelType::Composite(composite) = body else {
            return;
        };
        if self.registry.contains(&composite.name) {
            return;
        }
        if pending.iter().any(|staged| staged.name == composite.name) {
            return;
        }
        pending.push(composite.clone());
    }
}

/// Compile every operation of a document, continuing past per-operation
/// failures (collect-and-report). The continuation policy lives here, with
/// the orchestrating caller, not inside `compile`.
pub fn compile_document(ctx: &mut CompileContext, doc: &ServiceDocument) -> CompiledDocument {
    let mut compiled = CompiledDocument::default();
    for op in &doc.operations {
        match ctx.compile(op) {
            Ok(method) => compiled.methods.push(method),
            Err(err) => {
                error!("skipping operation {}: {err}", op.id);
                compiled.failures.push(FailedOperation {
                    id: op.id.clone(),
                    error: err,
                });
            }
        }
    }
    compiled
}
