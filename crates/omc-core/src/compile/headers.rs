//! Aggregating per-response header declarations into one composite.

use indexmap::IndexMap;

use crate::model::operation::OperationSpec;
use crate::model::schema::SchemaOrRef;
use crate::model::types::{CompositeType, Property};
use crate::registry::TypeRegistry;

/// Merge every header declared by any response entry (numbered and default)
/// into one synthesized composite. A header redeclared by a later response
/// overwrites the earlier declaration. Returns `None` when no response
/// declares any header, so an empty composite never reaches a method.
pub fn aggregate_headers(op: &OperationSpec, registry: &TypeRegistry) -> Option<CompositeType> {
    let mut merged: IndexMap<&str, &SchemaOrRef> = IndexMap::new();
    for response in op.responses.values() {
        for (name, schema) in &response.headers {
            merged.insert(name.as_str(), schema);
        }
    }
    if merged.is_empty() {
        return None;
    }

    let properties = merged
        .iter()
        .map(|(name, schema)| Property {
            name: (*name).to_string(),
            property_type: registry.resolve(schema, name),
        })
        .collect();

    Some(CompositeType {
        name: header_type_name(op.group.as_deref(), &op.id),
        properties,
        base: None,
    })
}

/// `{group}-{method}-Headers`, hyphen-trimmed when the group is absent.
fn header_type_name(group: Option<&str>, method_name: &str) -> String {
    let name = format!("{}-{method_name}-Headers", group.unwrap_or_default());
    name.trim_start_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::operation::{HttpVerb, ResponseSpec};

    fn operation(yaml: &str) -> OperationSpec {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn no_headers_anywhere_elides_the_type() {
        let op = operation(
            r#"
id: getWidget
verb: GET
path: /widgets/{id}
responses:
  "200": {}
  default: {}
"#,
        );
        assert!(aggregate_headers(&op, &TypeRegistry::new()).is_none());
    }

    #[test]
    fn headers_merge_across_responses_last_write_wins() {
        let op = operation(
            r#"
id: getWidget
group: widgets
verb: GET
path: /widgets/{id}
responses:
  "200":
    headers:
      X-Rate-Limit:
        type: integer
      X-Request-Id:
        type: string
  default:
    headers:
      X-Rate-Limit:
        type: string
"#,
        );
        let headers = aggregate_headers(&op, &TypeRegistry::new()).unwrap();
        assert_eq!(headers.name, "widgets-getWidget-Headers");
        assert_eq!(headers.properties.len(), 2);
        // The default entry's redeclaration overwrote the 200 entry's type.
        let rate_limit = &headers.properties[0];
        assert_eq!(rate_limit.name, "X-Rate-Limit");
        assert_eq!(
            rate_limit.property_type,
            crate::model::types::ModelType::Primitive(crate::model::types::PrimitiveKind::String)
        );
    }

    #[test]
    fn group_absent_trims_leading_hyphen() {
        assert_eq!(header_type_name(None, "ping"), "ping-Headers");
        assert_eq!(header_type_name(Some("ops"), "ping"), "ops-ping-Headers");
    }

    #[test]
    fn single_header_builds_single_property() {
        let mut op = operation(
            r#"
id: listWidgets
verb: GET
path: /widgets
"#,
        );
        let mut response = ResponseSpec::default();
        response.headers.insert(
            "X-Total-Count".to_string(),
            serde_yaml_ng::from_str("{type: integer}").unwrap(),
        );
        op.responses.insert("200".to_string(), response);
        assert_eq!(op.verb, HttpVerb::Get);

        let headers = aggregate_headers(&op, &TypeRegistry::new()).unwrap();
        assert_eq!(headers.name, "listWidgets-Headers");
        assert_eq!(headers.properties[0].name, "X-Total-Count");
    }
}
