//! Compiles a generated mutation, including everything nested under its
//! arguments, into one statement that creates and attaches all records and then
//! reads them back.

mod fragments;
mod nested;
mod variables;

pub use nested::NestedAction;
pub use variables::strip_variable_prefix;

use crate::{
    CoreError, CoreResult, IdGenerator, MutationAction, SchemaContext,
    statement::{Statement, VARIABLES_PARAMETER, parameter_map},
};
use itertools::Itertools;
use nested::NestedCompiler;
use sdl_ast::fields::ID;
use serde_json::{Map, Value};
use std::iter;

/// Nested levels below the root a single mutation may reach.
pub const MAX_NESTING_DEPTH: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledMutation {
    pub mutation_name: String,
    pub action: MutationAction,
    pub root_model: String,
    /// Arguments with prefixes stripped and ids injected, as sent to the database.
    pub arguments: Map<String, Value>,
    pub statement: Statement,
}

/// Compiles a generated mutation.
///
/// Fails with [`CoreError::UnknownMutation`] for anything the binding does not
/// resolve. Those operations are handed to the database as they are.
#[tracing::instrument(skip_all, fields(mutation = mutation_name))]
pub fn compile_mutation(
    ctx: &SchemaContext,
    mutation_name: &str,
    variables: &Map<String, Value>,
    ids: Option<&dyn IdGenerator>,
) -> CoreResult<CompiledMutation> {
    if !ctx.is_generated_mutation(mutation_name) {
        return Err(CoreError::UnknownMutation(mutation_name.to_owned()));
    }

    let info = ctx.mutation(mutation_name)?;
    let mut arguments = variables::prepare_arguments(info.action, variables)?;

    let statement = match info.action {
        MutationAction::Create => {
            inject_id(&mut arguments, ids)?;

            let root = ctx.model(&info.model)?;
            let properties = fragments::root_bindings(root.properties.keys(), |f| arguments.contains_key(f));
            let root_call = fragments::root_create(&info.cypher, mutation_name, &properties);

            let nested = NestedCompiler::new(ctx, &info.model, ids).compile(&mut arguments)?;
            let retrieval = fragments::retrieval(ctx, &nested.staged)?;

            tracing::debug!(
                groups = nested.groups.len(),
                models = nested.staged.len(),
                "compiled nested mutation"
            );

            let text = format!("{}{retrieval}", iter::once(root_call).chain(nested.groups).join("\n"));

            let mut parameters = Map::new();
            parameters.insert(VARIABLES_PARAMETER.to_owned(), Value::Object(arguments.clone()));

            for (model, records) in nested.staged {
                parameters.insert(model, Value::Array(records));
            }

            Statement::new(text, parameters)
        }
        MutationAction::Add => {
            let text = fragments::root_relation(&info.cypher, mutation_name, &parameter_map(arguments.keys()));
            Statement::new(text, arguments.clone())
        }
    };

    Ok(CompiledMutation {
        mutation_name: mutation_name.to_owned(),
        action: info.action,
        root_model: info.model.clone(),
        arguments,
        statement,
    })
}

/// Sets `id` from the generator unless the caller supplied one.
fn inject_id(arguments: &mut Map<String, Value>, ids: Option<&dyn IdGenerator>) -> CoreResult<()> {
    if let Some(generator) = ids {
        if !arguments.contains_key(ID) {
            arguments.insert(ID.to_owned(), Value::String(generator.generate()?));
        }
    }

    Ok(())
}
