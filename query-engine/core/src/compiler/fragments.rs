//! Text of the statements a nested mutation compiles to.

use super::nested::PathSegment;
use crate::{CoreResult, SchemaContext};
use indexmap::IndexMap;
use itertools::Itertools;
use sdl_ast::names::capitalize;
use serde_json::Value;

/// Correlation variable of one nested level: `<parent><Field><Related>`.
pub(super) fn element_name(parent: &str, field: &str, related: &str) -> String {
    format!("{parent}{}{related}", capitalize(field))
}

/// One `UNWIND` per path segment. The first unwinds the root arguments, every
/// later one the element of the previous segment.
pub(super) fn unwinds(root_model: &str, path: &[PathSegment]) -> String {
    let mut parent: Option<String> = None;
    let mut lines = Vec::with_capacity(path.len());

    for segment in path {
        let (source, element) = match &parent {
            None => (
                format!("{{variables}}.{}.{}", segment.field, segment.action),
                element_name(root_model, &segment.field, &segment.related),
            ),
            Some(parent) => (
                format!("{parent}.{}.{}", segment.field, segment.action),
                element_name(parent, &segment.field, &segment.related),
            ),
        };

        lines.push(format!("UNWIND {source} AS {element}"));
        parent = Some(element);
    }

    lines.join("\n")
}

/// `f: {variables}.f` for supplied root arguments, `f: NULL` for the rest.
/// The call signature is fixed, so nothing may be left out.
pub(super) fn root_bindings<'f>(fields: impl IntoIterator<Item = &'f String>, supplied: impl Fn(&str) -> bool) -> String {
    fields
        .into_iter()
        .map(|field| {
            if supplied(field) {
                format!("{field}: {{variables}}.{field}")
            } else {
                format!("{field}: NULL")
            }
        })
        .join(", ")
}

/// `f: <element>.f` for every field.
pub(super) fn element_bindings(fields: &[String], element: &str) -> String {
    fields.iter().map(|field| format!("{field}: {element}.{field}")).join(", ")
}

pub(super) fn root_create(template: &str, mutation: &str, properties: &str) -> String {
    format!(
        "CALL graphql.execute('{template}', {{ {properties} }}) YIELD result AS {mutation}Result WITH {mutation}Result AS {mutation}Result"
    )
}

pub(super) fn root_relation(template: &str, mutation: &str, parameters: &str) -> String {
    format!(
        "CALL graphql.execute('{template}', {{ {parameters} }}) YIELD result AS {mutation}Result\nRETURN {{ {mutation}: {mutation}Result }}"
    )
}

/// Attaches the element to its owner through the `add<Model><Field>` mutation.
pub(super) fn relation_call(template: &str, mutation: &str, field: &str, element: &str, owner: &str, related: &str) -> String {
    format!(
        "CALL graphql.execute('{template}', {{ where: {{ {owner} }}, {field}: [{{{related}}}] }}) YIELD result AS {mutation}{element}Result"
    )
}

pub(super) fn nested_create(unwinds: &str, template: &str, element: &str, relation_call: &str) -> String {
    format!(
        "\nWITH COUNT(*) AS SCOPE\n{unwinds}\nCALL graphql.execute('{template}', {element}) YIELD result AS create{element}Result\n{relation_call}"
    )
}

pub(super) fn nested_connect(unwinds: &str, relation_call: &str) -> String {
    format!("\nWITH COUNT(*) AS SCOPE\n{unwinds}\n{relation_call}")
}

/// Looks up every staged record per model and returns them grouped by model.
///
/// A null staged value matches any node, so a record is found by whichever
/// unique fields were supplied for it.
pub(super) fn retrieval(ctx: &SchemaContext, staged: &IndexMap<String, Vec<Value>>) -> CoreResult<String> {
    let mut fragments = Vec::with_capacity(staged.len() + 1);
    let mut collected: Vec<String> = Vec::with_capacity(staged.len());

    for model in staged.keys() {
        let unique = &ctx.model(model)?.unique_properties;

        let condition = unique
            .iter()
            .map(|f| format!("({model}Node.{f} = _{model}.{f} OR _{model}.{f} IS NULL)"))
            .join(" OR ");

        let carried = collected.iter().map(|c| format!(", {c}")).join("");

        fragments.push(format!(
            "\nUNWIND {{{model}}} AS _{model}\nMATCH ({model}Node: {model}) WHERE {condition}\nWITH COLLECT(DISTINCT properties({model}Node)) AS ALL_{model}{carried}\n"
        ));

        collected.push(format!("ALL_{model}"));
    }

    let entries = staged.keys().map(|model| format!("  {model}: ALL_{model}")).join(",\n");
    fragments.push(format!("RETURN {{\n{entries}\n}}\n"));

    Ok(fragments.join("\n"))
}
