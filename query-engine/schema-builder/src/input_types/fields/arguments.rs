use super::*;
use crate::constants::{args, scalars};
use sdl_ast::{
    ast::InputValue,
    builders::{input_value, list, named},
    fields::{INTERNAL_ID, field_type_name, is_list_type, strip_non_null},
    names,
};

/// One `(field, fields)` argument pair per non-relational field: the field's own
/// type with the outer non-null dropped, and a list of it.
pub(crate) fn field_value_arguments<'a>(ctx: &BuilderContext<'_, 'a>, model: ModelEntry<'_, 'a>) -> Vec<InputValue<'a>> {
    model
        .fields()
        .iter()
        .filter(|f| f.name != INTERNAL_ID && !ctx.is_model(field_type_name(f)))
        .flat_map(|f| {
            let ty = strip_non_null(&f.field_type);

            [
                input_value(f.name.clone(), ty.clone()),
                input_value(format!("{}s", f.name), list(ty)),
            ]
        })
        .collect()
}

/// Internal id lookup and pagination, shared by list queries and to-many relation fields.
fn pagination_arguments<'a>() -> Vec<InputValue<'a>> {
    vec![
        input_value(args::INTERNAL_ID, named(scalars::INT)),
        input_value(args::INTERNAL_IDS, list(named(scalars::INT))),
        input_value(args::FIRST, named(scalars::INT)),
        input_value(args::OFFSET, named(scalars::INT)),
    ]
}

/// Arguments of the generated list query for a model.
pub(crate) fn query_arguments<'a>(ctx: &BuilderContext<'_, 'a>, model: ModelEntry<'_, 'a>) -> Vec<InputValue<'a>> {
    let name = model.name();
    let mut arguments = field_value_arguments(ctx, model);

    arguments.push(input_value(args::FILTER, named(names::filter_type(name))));
    arguments.push(input_value(args::ORDER_BY, list(named(names::ordering_type(name)))));
    arguments.extend(pagination_arguments());

    arguments
}

/// Arguments of a model-typed field on a model: the related model's value
/// arguments, then filtering and ordering, then pagination for to-many fields.
/// Returns `None` if the field does not point at a model.
pub(crate) fn relation_field_arguments<'a>(
    ctx: &BuilderContext<'_, 'a>,
    field: &sdl_ast::ast::Field<'a>,
) -> Option<Vec<InputValue<'a>>> {
    let related = ctx.model(field_type_name(field))?;
    let related_name = related.name();

    let mut arguments = field_value_arguments(ctx, related);
    let filter = input_value(args::FILTER, list(named(names::filter_type(related_name))));
    let order_by = input_value(args::ORDER_BY, list(named(names::ordering_type(related_name))));

    if is_list_type(&field.field_type) {
        arguments.push(filter);
        arguments.push(order_by);
        arguments.extend(pagination_arguments());
    } else {
        arguments.push(order_by);
        arguments.push(filter);
    }

    Some(arguments)
}
