use indexmap::IndexMap;
use sdl_ast::ast::{Definition, Document, TypeDefinition};
use std::collections::HashSet;

/// Generated type definitions, keyed by name.
///
/// Names already declared in the source document are reserved: a generated type
/// with such a name is dropped, so hand-written declarations always win. Repeated
/// generation of the same name keeps the first definition.
#[derive(Debug)]
pub(crate) struct DefinitionCache<'a> {
    reserved: HashSet<String>,
    generated: IndexMap<String, TypeDefinition<'a>>,
}

impl<'a> DefinitionCache<'a> {
    pub fn new(document: &Document<'a>) -> Self {
        let reserved = document
            .definitions
            .iter()
            .filter_map(sdl_ast::definition_name)
            .map(ToOwned::to_owned)
            .collect();

        Self {
            reserved,
            generated: IndexMap::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.reserved.contains(name) || self.generated.contains_key(name)
    }

    /// Caches a generated type definition. Returns false if the name was taken.
    pub fn insert(&mut self, definition: TypeDefinition<'a>) -> bool {
        let name = sdl_ast::type_definition_name(&definition).to_owned();

        if self.contains(&name) {
            tracing::trace!(%name, "type name taken, skipping generated definition");
            return false;
        }

        self.generated.insert(name, definition);
        true
    }

    pub fn into_definitions(self) -> Vec<Definition<'a>> {
        self.generated.into_values().map(Definition::TypeDefinition).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl_ast::builders::enum_type;

    #[test]
    fn declared_and_repeated_names_are_kept_once() {
        let doc = sdl_ast::parse_type_defs("enum _PersonOrdering { name_asc }").unwrap();
        let mut cache = DefinitionCache::new(&doc);

        assert!(!cache.insert(TypeDefinition::Enum(enum_type("_PersonOrdering", vec![]))));
        assert!(cache.insert(TypeDefinition::Enum(enum_type("_BookOrdering", vec![]))));
        assert!(!cache.insert(TypeDefinition::Enum(enum_type("_BookOrdering", vec![]))));

        assert_eq!(cache.into_definitions().len(), 1);
    }
}
