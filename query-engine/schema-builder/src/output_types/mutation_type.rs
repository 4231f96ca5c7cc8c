use super::*;
use crate::{
    constants::{args, scalars},
    statements,
};
use sdl_ast::{
    builders::{directive, field, input_value, list_of_non_null, named, non_null, string_directive},
    directives::{self, STATEMENT_ARGUMENT},
    fields::{field_type_name, is_persisted_property, is_relation_field, relation_info},
    names,
};

/// Builds the mutations of a model.
///
/// Local schemas get `create<Model>(data: <Model>CreateInput!): <Model>`, resolved
/// through the binding. Remote schemas get a create mutation taking one argument
/// per stored property, and an `add<Model><Field>` mutation per relation field,
/// both carrying their native statement.
pub(crate) fn build<'a>(ctx: &mut BuilderContext<'_, 'a>, model: ModelEntry<'_, 'a>) {
    if ctx.options.is_for_remote {
        remote_create_mutation(ctx, model);
        relation_mutations(ctx, model);
    } else {
        create_mutation(ctx, model);
    }
}

fn create_mutation<'a>(ctx: &mut BuilderContext<'_, 'a>, model: ModelEntry<'_, 'a>) {
    let name = model.name();
    let data = input_value(args::DATA, non_null(named(names::create_input(name))));

    let mut mutation = field(names::create_mutation(name), vec![data], named(name));
    mutation.directives.push(directive(directives::BINDING));

    ctx.add_mutation_field(mutation);
}

fn remote_create_mutation<'a>(ctx: &mut BuilderContext<'_, 'a>, model: ModelEntry<'_, 'a>) {
    let name = model.name();

    let arguments = model
        .fields()
        .iter()
        .filter(|f| is_persisted_property(f))
        .map(|f| input_value(f.name.clone(), f.field_type.clone()))
        .collect();

    let mut mutation = field(names::create_mutation(name), arguments, named(name));
    mutation.directives.push(string_directive(
        directives::CYPHER,
        STATEMENT_ARGUMENT,
        statements::create_node(model),
    ));

    ctx.add_mutation_field(mutation);
}

fn relation_mutations<'a>(ctx: &mut BuilderContext<'_, 'a>, model: ModelEntry<'_, 'a>) {
    for relation_field in model.fields().iter().filter(|f| is_relation_field(f)) {
        let Some(related) = ctx.model(field_type_name(relation_field)) else {
            continue;
        };

        let info = relation_info(relation_field).unwrap_or_default();

        let Some(statement) = statements::relate_nodes(model, relation_field, related, &info) else {
            tracing::warn!(
                model = model.name(),
                field = %relation_field.name,
                direction = ?info.direction,
                "relation has no name or an unsupported direction, not generating a relation mutation"
            );
            continue;
        };

        let arguments = vec![
            input_value(args::WHERE, non_null(named(names::where_unique_input(model.name())))),
            input_value(
                relation_field.name.clone(),
                non_null(list_of_non_null(names::where_unique_input(related.name()))),
            ),
        ];

        let mut mutation = field(
            names::relation_mutation(model.name(), &relation_field.name),
            arguments,
            named(scalars::BOOLEAN),
        );

        mutation
            .directives
            .push(string_directive(directives::CYPHER, STATEMENT_ARGUMENT, statement));

        ctx.add_mutation_field(mutation);
    }
}
