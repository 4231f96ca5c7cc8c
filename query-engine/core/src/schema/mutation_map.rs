use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use sdl_ast::{
    ModelEntry,
    fields::{INTERNAL_ID, field_type_name, is_computed_field, is_relation_field, render_type},
    names,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationAction {
    Create,
    Add,
}

impl fmt::Display for MutationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Add => f.write_str("add"),
        }
    }
}

/// A generated mutation as the database side knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationInfo {
    pub action: MutationAction,
    pub model: String,
    /// GraphQL text of the mutation against the registered remote schema.
    pub cypher: String,
}

pub type MutationMap = IndexMap<String, MutationInfo>;

/// Derives the create entry of a model (only if its create mutation is generated)
/// and an `add<Model><Field>` entry for every relation field.
pub(crate) fn model_mutations(model: ModelEntry<'_, '_>, generated: &IndexSet<String>, map: &mut MutationMap) {
    let name = model.name();
    let create = names::create_mutation(name);

    if generated.contains(&create) {
        let cypher = create_template(model, &create);

        map.insert(
            create,
            MutationInfo {
                action: MutationAction::Create,
                model: name.to_owned(),
                cypher,
            },
        );
    }

    for field in model.fields().iter().filter(|f| is_relation_field(f)) {
        let mutation = names::relation_mutation(name, &field.name);
        let cypher = format!(
            "mutation {mutation}($where: {owner}!, ${field}: [{related}!]!) {{ {mutation}(where: $where, {field}: ${field}) }}",
            owner = names::where_unique_input(name),
            field = field.name,
            related = names::where_unique_input(field_type_name(field)),
        );

        map.insert(
            mutation,
            MutationInfo {
                action: MutationAction::Add,
                model: name.to_owned(),
                cypher,
            },
        );
    }
}

/// `mutation create<Model>($f: T, ...) { create<Model>(f: $f, ...) { f ... } }`
fn create_template(model: ModelEntry<'_, '_>, mutation: &str) -> String {
    let stored = || {
        model
            .fields()
            .iter()
            .filter(|f| !is_relation_field(f) && !is_computed_field(f) && f.name != INTERNAL_ID)
    };

    let variables = stored()
        .map(|f| format!("${}: {}", f.name, render_type(&f.field_type)))
        .join(", ");

    let arguments = stored().map(|f| format!("{0}: ${0}", f.name)).join(", ");

    let selection = model
        .fields()
        .iter()
        .filter(|f| !is_relation_field(f) && f.name != INTERNAL_ID)
        .map(|f| f.name.as_str())
        .join(" ");

    format!("mutation {mutation}({variables}) {{ {mutation}({arguments}) {{ {selection} }} }}")
}
