use serde::Serialize;

/// Scalar kinds a resolved type can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveKind {
    Object,
    String,
    Number,
    Integer,
    Boolean,
    ByteArray,
}

/// A single property of a composite type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub property_type: ModelType,
}

/// A named structured type with ordered properties and an optional declared
/// base type. Composites are registered by name in the [`TypeRegistry`];
/// nested property types are resolved shallowly, so identity lives in the
/// registered name, not in resolution depth.
///
/// [`TypeRegistry`]: crate::registry::TypeRegistry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeType {
    pub name: String,
    pub properties: Vec<Property>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

impl CompositeType {
    /// Structural comparison: registered name and property set, ignoring
    /// the declared base and nested resolution depth.
    pub fn same_shape(&self, other: &CompositeType) -> bool {
        self.name == other.name
            && self.properties.len() == other.properties.len()
            && self
                .properties
                .iter()
                .zip(&other.properties)
                .all(|(a, b)| a.name == b.name)
    }

    pub fn has_byte_array_property(&self) -> bool {
        self.properties
            .iter()
            .any(|p| p.property_type == ModelType::Primitive(PrimitiveKind::ByteArray))
    }
}

/// A resolved model type node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ModelType {
    Primitive(PrimitiveKind),
    Composite(CompositeType),
    Collection(Box<ModelType>),
}

impl ModelType {
    /// The generic object type, the common ceiling of every inheritance
    /// chain.
    pub fn object() -> Self {
        ModelType::Primitive(PrimitiveKind::Object)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ModelType::Primitive(PrimitiveKind::Object))
    }

    pub fn composite_name(&self) -> Option<&str> {
        match self {
            ModelType::Composite(c) => Some(&c.name),
            _ => None,
        }
    }

    /// Structural equality. Composites compare via
    /// [`CompositeType::same_shape`]; collections compare element-wise.
    pub fn structurally_equal(&self, other: &ModelType) -> bool {
        match (self, other) {
            (ModelType::Primitive(a), ModelType::Primitive(b)) => a == b,
            (ModelType::Composite(a), ModelType::Composite(b)) => a.same_shape(b),
            (ModelType::Collection(a), ModelType::Collection(b)) => a.structurally_equal(b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composite(name: &str, props: &[&str]) -> CompositeType {
        CompositeType {
            name: name.to_string(),
            properties: props
                .iter()
                .map(|p| Property {
                    name: (*p).to_string(),
                    property_type: ModelType::Primitive(PrimitiveKind::String),
                })
                .collect(),
            base: None,
        }
    }

    #[test]
    fn same_shape_ignores_base() {
        let a = composite("Widget", &["id", "label"]);
        let mut b = composite("Widget", &["id", "label"]);
        b.base = Some("Gadget".to_string());
        assert!(a.same_shape(&b));
    }

    #[test]
    fn same_shape_rejects_different_names() {
        let a = composite("Widget", &["id"]);
        let b = composite("Gadget", &["id"]);
        assert!(!a.same_shape(&b));
    }

    #[test]
    fn same_shape_rejects_different_property_sets() {
        let a = composite("Widget", &["id"]);
        let b = composite("Widget", &["id", "label"]);
        assert!(!a.same_shape(&b));
    }

    #[test]
    fn structural_equality_on_collections() {
        let a = ModelType::Collection(Box::new(ModelType::Composite(composite("Widget", &["id"]))));
        let b = ModelType::Collection(Box::new(ModelType::Composite(composite("Widget", &["id"]))));
        assert!(a.structurally_equal(&b));
        assert!(!a.structurally_equal(&ModelType::object()));
    }

    #[test]
    fn byte_array_detection() {
        let mut c = composite("FileChunk", &["name"]);
        assert!(!c.has_byte_array_property());
        c.properties.push(Property {
            name: "content".to_string(),
            property_type: ModelType::Primitive(PrimitiveKind::ByteArray),
        });
        assert!(c.has_byte_array_property());
    }
}
