use super::*;
use sdl_ast::{
    ast::{InputValue, TypeDefinition},
    builders::{input_object, input_value, list, named},
    fields::{ID, INTERNAL_ID, field_type_name, is_computed_field, is_list_type, is_relation_field, is_unique_field},
    names::{self, Arity},
};

/// Builds `<Model>CreateInput`.
///
/// Every stored field is included, except `id` on local schemas (ids are injected
/// at request time). Relation fields take the nested input of the related model
/// matching their arity.
pub(crate) fn create_object_type<'a>(ctx: &mut BuilderContext<'_, 'a>, model: ModelEntry<'_, 'a>) {
    let is_for_remote = ctx.options.is_for_remote;
    let mut fields: Vec<InputValue<'a>> = Vec::new();

    for field in model.fields() {
        if is_computed_field(field) || field.name == INTERNAL_ID || (field.name == ID && !is_for_remote) {
            continue;
        }

        let type_name = field_type_name(field);

        if is_relation_field(field) {
            if ctx.is_model(type_name) {
                let arity = Arity::of(is_list_type(&field.field_type));
                let nested = names::create_nested_input(type_name, arity);

                fields.push(input_value(field.name.clone(), named(nested)));
            }
        } else if !ctx.is_model(type_name) && !ctx.is_plain_type(type_name) {
            fields.push(input_value(field.name.clone(), field.field_type.clone()));
        }
    }

    let name = names::create_input(model.name());
    ctx.cache.insert(TypeDefinition::InputObject(input_object(name, fields)));
}

/// Builds `<Model>WhereUniqueInput` from the `id` field and every field marked
/// unique. All of them are optional; list fields stay lists.
pub(crate) fn where_unique_object_type<'a>(ctx: &mut BuilderContext<'_, 'a>, model: ModelEntry<'_, 'a>) {
    let fields = model
        .fields()
        .iter()
        .filter(|f| is_unique_field(f) && !is_computed_field(f))
        .map(|f| {
            let ty = if is_list_type(&f.field_type) {
                list(named(field_type_name(f)))
            } else {
                named(field_type_name(f))
            };

            input_value(f.name.clone(), ty)
        })
        .collect();

    let name = names::where_unique_input(model.name());
    ctx.cache.insert(TypeDefinition::InputObject(input_object(name, fields)));
}
