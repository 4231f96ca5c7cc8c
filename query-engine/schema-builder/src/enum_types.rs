use super::*;
use crate::constants::ordering;
use sdl_ast::{
    ast::TypeDefinition,
    builders::{enum_type, enum_value},
    fields::{INTERNAL_ID, field_type_name},
    names,
};

/// Builds `_<Model>Ordering` with an ascending and a descending value per
/// non-relational field, in field order.
pub(crate) fn ordering_enum(ctx: &mut BuilderContext<'_, '_>, model: ModelEntry<'_, '_>) {
    let values = model
        .fields()
        .iter()
        .filter(|f| f.name != INTERNAL_ID && !ctx.is_model(field_type_name(f)))
        .flat_map(|f| {
            [
                enum_value(format!("{}{}", f.name, ordering::ASC)),
                enum_value(format!("{}{}", f.name, ordering::DESC)),
            ]
        })
        .collect();

    ctx.cache
        .insert(TypeDefinition::Enum(enum_type(names::ordering_type(model.name()), values)));
}
