use omc_core::compile::{CompileContext, compile_document};
use omc_core::error::{CompileError, CompileWarning};
use omc_core::model::document::ServiceDocument;
use omc_core::model::method::Method;
use omc_core::model::operation::ParamLocation;
use omc_core::model::types::ModelType;

const WIDGET_STORE: &str = include_str!("fixtures/widget-store.yaml");
const ADOPTION: &str = include_str!("fixtures/adoption.yaml");
const BINARY_STORE: &str = include_str!("fixtures/binary-store.yaml");

fn compile(fixture: &str) -> (CompileContext, Vec<Method>, usize) {
    let doc: ServiceDocument = serde_yaml_ng::from_str(fixture).unwrap();
    let mut ctx = CompileContext::for_document(&doc);
    let compiled = compile_document(&mut ctx, &doc);
    let failures = compiled.failures.len();
    (ctx, compiled.methods, failures)
}

fn method<'a>(methods: &'a [Method], name: &str) -> &'a Method {
    methods
        .iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| panic!("should have method {name}"))
}

#[test]
fn widget_store_compiles_cleanly() {
    let (ctx, methods, failures) = compile(WIDGET_STORE);
    assert_eq!(failures, 0);
    assert_eq!(methods.len(), 4);
    assert!(ctx.warnings().is_empty());
}

#[test]
fn request_content_type_gains_charset() {
    let (_, methods, _) = compile(WIDGET_STORE);
    let get = method(&methods, "getWidget");
    assert_eq!(
        get.content_type.as_deref(),
        Some("application/json; charset=utf-8")
    );
}

#[test]
fn header_parameter_registers_template_entry() {
    let (_, methods, _) = compile(WIDGET_STORE);
    let get = method(&methods, "getWidget");
    assert_eq!(get.header_template["X-Client"], "{X-Client}");
}

#[test]
fn response_headers_become_a_registered_composite() {
    let (ctx, methods, _) = compile(WIDGET_STORE);
    let get = method(&methods, "getWidget");

    let headers = get.responses[&200].headers.as_ref().expect("header type");
    assert_eq!(headers.composite_name(), Some("widgets-getWidget-Headers"));
    assert_eq!(get.return_type.headers, get.responses[&200].headers);
    assert!(ctx.registry().contains("widgets-getWidget-Headers"));
}

#[test]
fn headerless_method_has_absent_header_type() {
    let (ctx, methods, _) = compile(WIDGET_STORE);
    let list = method(&methods, "listWidgets");
    assert!(list.responses[&200].headers.is_none());
    assert!(list.return_type.headers.is_none());
    assert!(!ctx.registry().contains("widgets-listWidgets-Headers"));
}

#[test]
fn single_success_response_is_the_return_type() {
    let (_, methods, _) = compile(WIDGET_STORE);
    let list = method(&methods, "listWidgets");
    match list.return_type.body.as_ref().expect("body") {
        ModelType::Collection(element) => {
            assert_eq!(element.composite_name(), Some("Widget"));
        }
        other => panic!("expected collection return type, got {other:?}"),
    }
}

#[test]
fn body_parameter_renamed_past_query_collision() {
    let (_, methods, _) = compile(WIDGET_STORE);
    let create = method(&methods, "createWidget");
    let body = create
        .parameters
        .iter()
        .find(|p| p.location == ParamLocation::Body)
        .expect("body parameter");
    assert_eq!(body.name, "widgetBody");

    // Empty 204 entry carries no body but stays in the map.
    assert!(create.responses[&204].body.is_none());
}

#[test]
fn success_body_matching_error_type_is_removed() {
    let (_, methods, _) = compile(WIDGET_STORE);
    let ping = method(&methods, "pingWidgets");

    assert!(!ping.responses.contains_key(&200));
    let default = ping.default_response.as_ref().expect("default response");
    assert_eq!(
        default.body.as_ref().and_then(|b| b.composite_name()),
        Some("Error")
    );
    // Unification ran before the removal, so the return type keeps Error.
    assert_eq!(
        ping.return_type.body.as_ref().and_then(|b| b.composite_name()),
        Some("Error")
    );
    assert_eq!(ping.extensions["x-internal"], serde_json::json!(true));
}

#[test]
fn sibling_types_unify_to_shared_ancestor() {
    let (_, methods, failures) = compile(ADOPTION);
    assert_eq!(failures, 0);
    let adopt = method(&methods, "adoptAnimal");
    assert_eq!(
        adopt.return_type.body.as_ref().and_then(|b| b.composite_name()),
        Some("Animal")
    );
    // Both concrete responses keep their own body types.
    assert_eq!(
        adopt.responses[&200].body.as_ref().and_then(|b| b.composite_name()),
        Some("Dog")
    );
    assert_eq!(
        adopt.responses[&201].body.as_ref().and_then(|b| b.composite_name()),
        Some("Cat")
    );
}

#[test]
fn binary_store_reports_and_continues() {
    let doc: ServiceDocument = serde_yaml_ng::from_str(BINARY_STORE).unwrap();
    let mut ctx = CompileContext::for_document(&doc);
    let compiled = compile_document(&mut ctx, &doc);

    assert_eq!(compiled.methods.len(), 1);
    assert_eq!(compiled.methods[0].name, "downloadChunk");
    assert_eq!(compiled.failures.len(), 2);

    match &compiled.failures[0].error {
        CompileError::MissingByteArrayField { type_name, .. } => {
            assert_eq!(type_name, "Manifest");
        }
        other => panic!("expected MissingByteArrayField, got {other}"),
    }
    match &compiled.failures[1].error {
        CompileError::DuplicateMethodName(name) => {
            assert_eq!(name, "files.downloadChunk");
        }
        other => panic!("expected DuplicateMethodName, got {other}"),
    }
}

#[test]
fn failed_build_publishes_nothing() {
    let doc: ServiceDocument = serde_yaml_ng::from_str(BINARY_STORE).unwrap();
    let mut ctx = CompileContext::for_document(&doc);
    compile_document(&mut ctx, &doc);

    // The failed downloadManifest build declared a response header, but its
    // synthesized header composite must not leak into the registry.
    assert!(!ctx.registry().contains("files-downloadManifest-Headers"));
}

#[test]
fn no_produce_with_body_warns_and_degrades_to_object() {
    let doc: ServiceDocument = serde_yaml_ng::from_str(
        r#"
definitions:
  Audit:
    properties:
      entries: {type: integer}
operations:
  - id: getAudit
    verb: GET
    path: /audit
    responses:
      "200":
        schema: {$ref: Audit}
"#,
    )
    .unwrap();

    let mut ctx = CompileContext::for_document(&doc);
    let compiled = compile_document(&mut ctx, &doc);
    assert_eq!(compiled.failures.len(), 0);

    let audit = method(&compiled.methods, "getAudit");
    assert!(audit.responses[&200].body.as_ref().unwrap().is_object());
    assert!(audit.return_type.body.as_ref().unwrap().is_object());
    assert_eq!(
        ctx.warnings(),
        [CompileWarning::NoProduceWithBody {
            method: "getAudit".to_string(),
            status: 200,
        }]
    );
}

#[test]
fn empty_operation_id_is_invalid_input() {
    let doc: ServiceDocument = serde_yaml_ng::from_str(
        r#"
operations:
  - id: ""
    verb: GET
    path: /nowhere
"#,
    )
    .unwrap();
    let mut ctx = CompileContext::for_document(&doc);
    let err = ctx.compile(&doc.operations[0]).unwrap_err();
    assert!(matches!(err, CompileError::InvalidInput(_)));
}

#[test]
fn malformed_status_key_is_invalid_input() {
    let doc: ServiceDocument = serde_yaml_ng::from_str(
        r#"
operations:
  - id: getThing
    verb: GET
    path: /things
    responses:
      "2XX": {}
"#,
    )
    .unwrap();
    let mut ctx = CompileContext::for_document(&doc);
    let err = ctx.compile(&doc.operations[0]).unwrap_err();
    assert!(matches!(err, CompileError::InvalidInput(_)));
}
