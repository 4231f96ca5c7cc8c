use super::*;
use crate::constants::inputs;
use sdl_ast::{
    ast::TypeDefinition,
    builders::{input_object, input_value, list_of_non_null, named},
    names::{self, Arity},
};

/// Builds the inputs a relation field of another model uses to reach this one:
/// `<Model>CreateManyInput`, `<Model>CreateOneInput`, `<Model>ConnectManyInput`
/// and `<Model>ConnectOneInput`. All of them accept both `create` and `connect`;
/// the create variants list `create` first, the connect variants `connect`.
pub(crate) fn build(ctx: &mut BuilderContext<'_, '_>, model: &str) {
    let create = names::create_input(model);
    let connect = names::where_unique_input(model);

    let create_many = input_object(
        names::create_nested_input(model, Arity::Many),
        vec![
            input_value(inputs::CREATE, list_of_non_null(create.clone())),
            input_value(inputs::CONNECT, list_of_non_null(connect.clone())),
        ],
    );

    let create_one = input_object(
        names::create_nested_input(model, Arity::One),
        vec![
            input_value(inputs::CREATE, named(create.clone())),
            input_value(inputs::CONNECT, named(connect.clone())),
        ],
    );

    let connect_many = input_object(
        names::connect_nested_input(model, Arity::Many),
        vec![
            input_value(inputs::CONNECT, list_of_non_null(connect.clone())),
            input_value(inputs::CREATE, list_of_non_null(create.clone())),
        ],
    );

    let connect_one = input_object(
        names::connect_nested_input(model, Arity::One),
        vec![
            input_value(inputs::CONNECT, named(connect)),
            input_value(inputs::CREATE, named(create)),
        ],
    );

    for input in [create_many, create_one, connect_many, connect_one] {
        ctx.cache.insert(TypeDefinition::InputObject(input));
    }
}
