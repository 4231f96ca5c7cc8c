use super::*;
use crate::{constants::filters, input_types::fields::field_filter_types};
use sdl_ast::{
    ast::TypeDefinition,
    builders::{input_object, input_value, list_of_non_null},
    names,
};

/// Builds `_<Model>Filter`: `AND`/`OR` over itself, then the filters of every field.
pub(crate) fn filter_object_type<'a>(ctx: &mut BuilderContext<'_, 'a>, model: ModelEntry<'_, 'a>) {
    let name = names::filter_type(model.name());

    let mut fields = vec![
        input_value(filters::AND, list_of_non_null(name.clone())),
        input_value(filters::OR, list_of_non_null(name.clone())),
    ];

    for field in model.fields() {
        fields.extend(field_filter_types::filter_fields(ctx, field));
    }

    ctx.cache.insert(TypeDefinition::InputObject(input_object(name, fields)));
}
