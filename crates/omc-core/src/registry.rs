use heck::ToPascalCase;
use indexmap::IndexMap;

use crate::model::document::TypeDef;
use crate::model::schema::{Schema, SchemaOrRef, SchemaType};
use crate::model::types::{CompositeType, ModelType, PrimitiveKind, Property};

/// The shared code model: composite types registered by name, with their
/// declared base-type chain.
///
/// Resolution is read-only; callers decide when a synthesized composite is
/// committed via [`register`]. Property types of registered composites are
/// resolved shallowly (a property referencing another composite carries its
/// name and base, not its full closure), so self- and forward-references in
/// document definitions are fine.
///
/// [`register`]: TypeRegistry::register
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    composites: IndexMap<String, CompositeType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registry from document definitions. Two passes: names and
    /// base links first, then property resolution against the full name
    /// table.
    pub fn from_definitions(definitions: &IndexMap<String, TypeDef>) -> Self {
        let mut registry = Self::new();
        for (name, def) in definitions {
            registry.composites.insert(
                name.clone(),
                CompositeType {
                    name: name.clone(),
                    properties: Vec::new(),
                    base: def.base.clone(),
                },
            );
        }

        let built: Vec<CompositeType> = definitions
            .iter()
            .map(|(name, def)| CompositeType {
                name: name.clone(),
                properties: registry.resolve_properties(&def.properties),
                base: def.base.clone(),
            })
            .collect();
        for composite in built {
            registry.register(composite);
        }
        registry
    }

    /// Resolve a schema fragment to a model type. References resolve to the
    /// registered composite (degrading to the generic object type when the
    /// target is unknown); inline object schemas with properties synthesize
    /// a composite named after `hint`, which is NOT registered; the caller
    /// owns that decision.
    pub fn resolve(&self, schema: &SchemaOrRef, hint: &str) -> ModelType {
        match schema {
            SchemaOrRef::Ref { ref_name } => match self.composites.get(ref_name) {
                Some(composite) => ModelType::Composite(composite.clone()),
                None => ModelType::object(),
            },
            SchemaOrRef::Schema(inline) => self.schema_to_type(inline, hint),
        }
    }

    fn schema_to_type(&self, schema: &Schema, hint: &str) -> ModelType {
        match schema.schema_type {
            Some(SchemaType::String) => match schema.format.as_deref() {
                Some("byte" | "binary") => ModelType::Primitive(PrimitiveKind::ByteArray),
                _ => ModelType::Primitive(PrimitiveKind::String),
            },
            Some(SchemaType::Number) => ModelType::Primitive(PrimitiveKind::Number),
            Some(SchemaType::Integer) => ModelType::Primitive(PrimitiveKind::Integer),
            Some(SchemaType::Boolean) => ModelType::Primitive(PrimitiveKind::Boolean),
            Some(SchemaType::Array) => {
                let element = match &schema.items {
                    Some(items) => self.resolve(items, hint),
                    None => ModelType::object(),
                };
                ModelType::Collection(Box::new(element))
            }
            Some(SchemaType::Object) | None => {
                if schema.properties.is_empty() {
                    ModelType::object()
                } else {
                    ModelType::Composite(CompositeType {
                        name: hint.to_pascal_case(),
                        properties: self.resolve_properties(&schema.properties),
                        base: None,
                    })
                }
            }
        }
    }

    fn resolve_properties(&self, properties: &IndexMap<String, SchemaOrRef>) -> Vec<Property> {
        properties
            .iter()
            .map(|(name, schema)| Property {
                name: name.clone(),
                property_type: self.resolve(schema, name),
            })
            .collect()
    }

    /// Whether the schema, after unwrapping reference indirection, carries
    /// properties.
    pub fn schema_has_properties(&self, schema: &SchemaOrRef) -> bool {
        match schema {
            SchemaOrRef::Ref { ref_name } => self
                .composites
                .get(ref_name)
                .is_some_and(|c| !c.properties.is_empty()),
            SchemaOrRef::Schema(inline) => !inline.properties.is_empty(),
        }
    }

    /// Declared base type of a registered composite.
    pub fn base_type_of(&self, name: &str) -> Option<&str> {
        self.composites.get(name).and_then(|c| c.base.as_deref())
    }

    pub fn composite(&self, name: &str) -> Option<&CompositeType> {
        self.composites.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.composites.contains_key(name)
    }

    /// Commit a synthesized composite into the shared code model.
    pub fn register(&mut self, composite: CompositeType) {
        self.composites.insert(composite.name.clone(), composite);
    }

    /// Registered composites, in registration order.
    pub fn composites(&self) -> impl Iterator<Item = &CompositeType> {
        self.composites.values()
    }

    pub fn len(&self) -> usize {
        self.composites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.composites.is_empty()
    }
}
