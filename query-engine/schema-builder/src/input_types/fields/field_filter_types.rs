use super::*;
use crate::constants::filters;
use sdl_ast::{
    ast::{Field, InputValue},
    builders::{input_value, list_of_non_null, named},
    fields::{INTERNAL_ID, field_type_name, is_relation_field},
    names,
};

/// Filter fields for one model field.
///
/// Relation fields filter by the related model's filter input under every
/// quantifier. Scalar fields get equality, membership, comparison and string
/// pattern variants. Fields typed by a non-model object type are skipped, as
/// are relations to anything that is not a model.
pub(crate) fn filter_fields<'a>(ctx: &BuilderContext<'_, 'a>, field: &Field<'a>) -> Vec<InputValue<'a>> {
    let type_name = field_type_name(field);

    if field.name == INTERNAL_ID {
        return Vec::new();
    }

    if is_relation_field(field) {
        if !ctx.is_model(type_name) {
            return Vec::new();
        }

        let filter_type = names::filter_type(type_name);

        return filters::RELATION
            .iter()
            .map(|suffix| input_value(format!("{}{suffix}", field.name), named(filter_type.clone())))
            .collect();
    }

    if ctx.is_model(type_name) || ctx.is_plain_type(type_name) {
        return Vec::new();
    }

    scalar_filter_fields(&field.name, type_name)
}

fn scalar_filter_fields<'a>(field_name: &str, type_name: &str) -> Vec<InputValue<'a>> {
    let mut fields = vec![
        input_value(field_name, named(type_name)),
        input_value(format!("{field_name}{}", filters::NOT), named(type_name)),
        input_value(format!("{field_name}{}", filters::IN), list_of_non_null(type_name)),
        input_value(format!("{field_name}{}", filters::NOT_IN), list_of_non_null(type_name)),
    ];

    fields.extend(
        filters::SCALAR_COMPARISONS
            .iter()
            .map(|suffix| input_value(format!("{field_name}{suffix}"), named(type_name))),
    );

    fields
}
