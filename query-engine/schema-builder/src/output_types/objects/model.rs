use super::*;
use crate::{constants::scalars, input_types::fields::arguments};
use sdl_ast::{
    SchemaError,
    ast::ObjectType,
    builders::{directive, field, named, non_null},
    directives,
    fields::{ID, INTERNAL_ID, reduce_nested_list, render_field},
};

/// The only accepted shapes of a declared `id` field.
const ACCEPTED_ID_FIELDS: [&str; 2] = ["id: ID! @unique", "id: ID! @isUnique"];

/// What a remote model gets when it declares no `id`. Accepted on remote input
/// so augmenting an augmented remote schema is a no-op.
const REMOTE_ID_FIELD: &str = "id: ID!";

/// Prepares all models before anything is derived from them: nested list types
/// are reduced, and the `id` field is validated and moved to the front, or
/// synthesized. Remote schemas always get the id treatment, local ones only
/// when `id_fields` is set. A synthesized local id is `@unique`, a remote one
/// carries no directives.
pub(crate) fn normalize(document: &mut Document<'_>, type_maps: &TypeMaps, options: &AugmentOptions) -> SchemaResult<()> {
    let normalize_id = options.is_for_remote || options.id_fields;

    for model_ref in type_maps.models.values() {
        let Some(model) = sdl_ast::object_type_at_mut(document, model_ref.index) else {
            continue;
        };

        for field in model.fields.iter_mut() {
            field.field_type = reduce_nested_list(&field.field_type);
        }

        if normalize_id {
            normalize_id_field(model, options.is_for_remote)?;
        }
    }

    Ok(())
}

fn normalize_id_field(model: &mut ObjectType<'_>, is_for_remote: bool) -> SchemaResult<()> {
    match model.fields.iter().position(|f| f.name == ID) {
        Some(position) => {
            let printed = render_field(&model.fields[position]);
            let accepted = ACCEPTED_ID_FIELDS.contains(&printed.as_str()) || (is_for_remote && printed == REMOTE_ID_FIELD);

            if !accepted {
                return Err(SchemaError::InvalidIdField {
                    model: model.name.clone(),
                    found: printed,
                });
            }

            if position > 0 {
                let id = model.fields.remove(position);
                model.fields.insert(0, id);
            }
        }
        None => {
            let mut id = field(ID, Vec::new(), non_null(named(scalars::ID)));

            if !is_for_remote {
                id.directives.push(directive(directives::UNIQUE));
            }

            model.fields.insert(0, id);
        }
    }

    Ok(())
}

/// Rebuilds a local model's field list: every model-typed field gets fresh
/// filtering, ordering and pagination arguments, other fields are kept as
/// declared, and the internal `_id` is appended if missing.
pub(crate) fn rebuild<'a>(ctx: &mut BuilderContext<'_, 'a>, model: ModelEntry<'_, 'a>) {
    let mut fields = Vec::with_capacity(model.fields().len() + 1);

    for declared in model.fields() {
        let mut rebuilt = declared.clone();

        if let Some(arguments) = arguments::relation_field_arguments(ctx, declared) {
            rebuilt.arguments = arguments;
        }

        fields.push(rebuilt);
    }

    if !model.fields().iter().any(|f| f.name == INTERNAL_ID) {
        fields.push(field(INTERNAL_ID, Vec::new(), named(scalars::INT)));
    }

    ctx.model_fields.push((model.index, fields));
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl_ast::{build_type_maps, parse_type_defs};

    fn normalized(sdl: &str) -> SchemaResult<Vec<String>> {
        normalized_with(sdl, &AugmentOptions::default())
    }

    fn normalized_with(sdl: &str, options: &AugmentOptions) -> SchemaResult<Vec<String>> {
        let mut doc = parse_type_defs(sdl).unwrap();
        let maps = build_type_maps(&doc).unwrap();

        normalize(&mut doc, &maps, options)?;

        let model = sdl_ast::object_type_at(&doc, 0).unwrap();
        Ok(model.fields.iter().map(render_field).collect())
    }

    #[test]
    fn id_is_moved_to_the_front() {
        let fields = normalized("type A @model { name: String id: ID! @unique }").unwrap();
        assert_eq!(fields, vec!["id: ID! @unique", "name: String"]);
    }

    #[test]
    fn missing_id_is_synthesized() {
        let fields = normalized("type A @model { name: String }").unwrap();
        assert_eq!(fields, vec!["id: ID! @unique", "name: String"]);
    }

    #[test]
    fn missing_remote_id_is_synthesized_without_directives() {
        let fields = normalized_with("type A @model { name: String }", &AugmentOptions::remote()).unwrap();
        assert_eq!(fields, vec!["id: ID!", "name: String"]);
    }

    #[test]
    fn bare_id_is_only_accepted_on_remote_models() {
        let sdl = "type A @model { name: String id: ID! }";

        let fields = normalized_with(sdl, &AugmentOptions::remote()).unwrap();
        assert_eq!(fields, vec!["id: ID!", "name: String"]);

        assert!(normalized(sdl).is_err());
    }

    #[test]
    fn malformed_id_is_rejected() {
        let err = normalized("type A @model { id: String }").unwrap_err();

        assert_eq!(
            err.to_string(),
            "id field on type A has invalid format 'id: String' Required format: 'id: ID!'"
        );
    }
}
