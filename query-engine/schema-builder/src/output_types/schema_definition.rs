use super::*;
use sdl_ast::{
    ast::{Definition, SchemaDefinition, TypeDefinition},
    builders::{object_type, pos},
    maps::{MUTATION, QUERY},
};

/// Makes sure the enabled root operation types exist and are referenced by the
/// schema definition. A missing schema definition is created, a partial one is
/// completed. Existing entries are never renamed.
pub(crate) fn scaffold(document: &mut Document<'_>, options: &AugmentOptions) {
    let schema = document.definitions.iter_mut().find_map(|definition| match definition {
        Definition::SchemaDefinition(schema) => Some(schema),
        _ => None,
    });

    match schema {
        Some(schema) => {
            if options.query && schema.query.is_none() {
                schema.query = Some(QUERY.to_owned());
            }

            if options.mutation && schema.mutation.is_none() {
                schema.mutation = Some(MUTATION.to_owned());
            }
        }
        None if options.query || options.mutation => {
            document.definitions.push(Definition::SchemaDefinition(SchemaDefinition {
                position: pos(),
                directives: Vec::new(),
                query: options.query.then(|| QUERY.to_owned()),
                mutation: options.mutation.then(|| MUTATION.to_owned()),
                subscription: None,
            }));
        }
        None => (),
    }

    for (enabled, root) in [(options.query, QUERY), (options.mutation, MUTATION)] {
        if enabled && !has_object_type(document, root) {
            tracing::debug!(root, "creating root operation type");
            document
                .definitions
                .push(Definition::TypeDefinition(TypeDefinition::Object(object_type(root))));
        }
    }
}

fn has_object_type(document: &Document<'_>, name: &str) -> bool {
    document.definitions.iter().any(|definition| {
        matches!(definition, Definition::TypeDefinition(TypeDefinition::Object(object)) if object.name == name)
    })
}
