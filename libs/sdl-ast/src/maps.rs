//! Name indexes over a document's top-level definitions.
//!
//! Entries record positions rather than borrowing nodes, so a pass can hold the
//! maps while it edits the document they were built from.

use crate::{
    SchemaError, SchemaResult,
    ast::{Definition, Document, Field, ObjectType, TypeDefinition},
    fields, object_type_at,
};
use indexmap::IndexMap;

pub const QUERY: &str = "Query";
pub const MUTATION: &str = "Mutation";
pub const SUBSCRIPTION: &str = "Subscription";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionRef {
    /// Position in `Document::definitions`.
    pub index: usize,
}

/// A model object type together with its position in the document.
#[derive(Debug, Clone, Copy)]
pub struct ModelEntry<'d, 'a> {
    pub index: usize,
    pub definition: &'d ObjectType<'a>,
}

impl<'d, 'a> ModelEntry<'d, 'a> {
    pub fn name(&self) -> &'d str {
        self.definition.name.as_str()
    }

    pub fn fields(&self) -> &'d [Field<'a>] {
        &self.definition.fields
    }
}

#[derive(Debug, Default, Clone)]
pub struct TypeMaps {
    pub models: IndexMap<String, DefinitionRef>,
    pub types: IndexMap<String, DefinitionRef>,
}

impl TypeMaps {
    pub fn is_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn is_plain_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Resolves a model by name against the document the maps were built from.
    pub fn model<'d, 'a>(&self, document: &'d Document<'a>, name: &str) -> Option<ModelEntry<'d, 'a>> {
        let index = self.models.get(name)?.index;
        let definition = object_type_at(document, index)?;

        Some(ModelEntry { index, definition })
    }

    /// All models, in document order.
    pub fn model_entries<'s, 'd, 'a>(
        &'s self,
        document: &'d Document<'a>,
    ) -> impl Iterator<Item = ModelEntry<'d, 'a>> {
        self.models.values().filter_map(move |r| {
            object_type_at(document, r.index).map(|definition| ModelEntry {
                index: r.index,
                definition,
            })
        })
    }
}

/// Classifies every object type as model or plain type. `Query` and `Mutation` are
/// left to [`build_operation_maps`].
///
/// A model name declared twice is an error. For plain types the first declaration wins.
pub fn build_type_maps(document: &Document<'_>) -> SchemaResult<TypeMaps> {
    let mut maps = TypeMaps::default();

    for (index, definition) in document.definitions.iter().enumerate() {
        let object = match definition {
            Definition::TypeDefinition(TypeDefinition::Object(object)) => object,
            _ => continue,
        };

        if fields::is_model(object) {
            if maps.models.contains_key(&object.name) {
                return Err(SchemaError::DuplicateModel {
                    name: object.name.clone(),
                });
            }

            maps.models.insert(object.name.clone(), DefinitionRef { index });
        } else if object.name != QUERY && object.name != MUTATION {
            if maps.types.contains_key(&object.name) {
                tracing::warn!(name = %object.name, "ignoring duplicate type definition");
                continue;
            }

            maps.types.insert(object.name.clone(), DefinitionRef { index });
        }
    }

    tracing::debug!(models = maps.models.len(), types = maps.types.len(), "built type maps");

    Ok(maps)
}

/// The fields of an operation root type, by name, with their positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFields {
    pub index: usize,
    pub fields: IndexMap<String, usize>,
}

impl OperationFields {
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field<'d, 'a>(&self, document: &'d Document<'a>, name: &str) -> Option<&'d Field<'a>> {
        let position = *self.fields.get(name)?;
        object_type_at(document, self.index)?.fields.get(position)
    }

    pub fn root<'d, 'a>(&self, document: &'d Document<'a>) -> Option<&'d ObjectType<'a>> {
        object_type_at(document, self.index)
    }
}

#[derive(Debug, Default, Clone)]
pub struct OperationMaps {
    pub queries: Option<OperationFields>,
    pub mutations: Option<OperationFields>,
}

pub fn build_operation_maps(document: &Document<'_>) -> OperationMaps {
    let mut maps = OperationMaps::default();

    for (index, definition) in document.definitions.iter().enumerate() {
        let object = match definition {
            Definition::TypeDefinition(TypeDefinition::Object(object)) => object,
            _ => continue,
        };

        let slot = match object.name.as_str() {
            QUERY => &mut maps.queries,
            MUTATION => &mut maps.mutations,
            _ => continue,
        };

        let fields = object
            .fields
            .iter()
            .enumerate()
            .map(|(position, field)| (field.name.clone(), position))
            .collect();

        *slot = Some(OperationFields { index, fields });
    }

    maps
}
