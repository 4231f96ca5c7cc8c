use super::*;
use input_types::fields::arguments;
use sdl_ast::{
    builders::{directive, field, list, named},
    directives,
};

/// Builds the list query for a model, named after the model
/// (e.g. `Person(name: String, ...): [Person]`). It is resolved through the binding.
pub(crate) fn build<'a>(ctx: &mut BuilderContext<'_, 'a>, model: ModelEntry<'_, 'a>) {
    let mut query = field(
        model.name(),
        arguments::query_arguments(ctx, model),
        list(named(model.name())),
    );

    query.directives.push(directive(directives::BINDING));
    ctx.add_query_field(query);
}
