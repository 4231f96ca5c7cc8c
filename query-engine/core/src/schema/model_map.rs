use indexmap::{IndexMap, IndexSet};
use sdl_ast::{
    ModelEntry,
    fields::{ID, field_type_name, is_list_type, is_persisted_property, is_relation_field, is_unique_field},
};

/// What the compiler needs to know about one model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelInfo {
    /// Relation field name to related type name.
    pub relations: IndexMap<String, String>,
    /// Relation fields declared as lists.
    pub list_relations: IndexSet<String>,
    /// Stored property name to named type. Computed fields and `_id` are not stored.
    pub properties: IndexMap<String, String>,
    /// Properties usable as lookup keys, in declaration order. Always holds
    /// `id`, in front when the model does not declare it.
    pub unique_properties: Vec<String>,
}

impl ModelInfo {
    pub fn from_model(model: ModelEntry<'_, '_>) -> Self {
        let mut info = Self::default();

        for field in model.fields() {
            let type_name = field_type_name(field).to_owned();

            if is_relation_field(field) {
                if is_list_type(&field.field_type) {
                    info.list_relations.insert(field.name.clone());
                }

                info.relations.insert(field.name.clone(), type_name);
            } else if is_persisted_property(field) {
                if is_unique_field(field) {
                    info.unique_properties.push(field.name.clone());
                }

                info.properties.insert(field.name.clone(), type_name);
            }
        }

        if !info.unique_properties.iter().any(|f| f == ID) {
            info.unique_properties.insert(0, ID.to_owned());
        }

        info
    }

    pub fn related_model(&self, field: &str) -> Option<&str> {
        self.relations.get(field).map(String::as_str)
    }

    pub fn is_to_many(&self, field: &str) -> bool {
        self.list_relations.contains(field)
    }
}

pub type ModelMap = IndexMap<String, ModelInfo>;
