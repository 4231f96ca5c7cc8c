//! Schema augmentation. Root for generated schema building.
//!
//! Takes type definitions annotated with `@model`, `@relation`, `@unique` and
//! `@cypher` and derives everything a client-facing schema needs on top of them:
//! list queries, ordering enums, filter inputs, nested create/connect inputs and
//! create mutations, plus relation mutations carrying native statements when the
//! schema is meant for registration on the database side.
//!
//! Building happens in three passes over one document:
//!
//! 1. Scaffolding: root operation types and the schema definition are created if
//!    absent, and model fields are normalized (nested lists, id field placement).
//! 2. Planning: with the document read-only, every model contributes fields and
//!    definitions to a [`BuilderContext`]. Generated definitions go through a name
//!    keyed cache, so nothing the user declared is ever replaced and nothing is
//!    generated twice.
//! 3. Applying: the collected output is spliced into the document.

pub mod constants;

mod cache;
mod enum_types;
mod input_types;
mod options;
mod output_types;
mod statements;

pub use options::AugmentOptions;

use cache::DefinitionCache;
use indexmap::IndexMap;
use sdl_ast::{
    ModelEntry, OperationMaps, SchemaResult, TypeMaps,
    ast::{Document, Field},
    build_operation_maps, build_type_maps, parse_type_defs, print_type_defs,
};

pub(crate) struct BuilderContext<'d, 'a> {
    document: &'d Document<'a>,
    type_maps: &'d TypeMaps,
    operations: &'d OperationMaps,
    options: &'d AugmentOptions,
    cache: DefinitionCache<'a>,
    /// Rebuilt field lists, by model definition index.
    model_fields: Vec<(usize, Vec<Field<'a>>)>,
    query_fields: IndexMap<String, Field<'a>>,
    mutation_fields: IndexMap<String, Field<'a>>,
}

impl<'d, 'a> BuilderContext<'d, 'a> {
    fn new(
        document: &'d Document<'a>,
        type_maps: &'d TypeMaps,
        operations: &'d OperationMaps,
        options: &'d AugmentOptions,
    ) -> Self {
        Self {
            document,
            type_maps,
            operations,
            options,
            cache: DefinitionCache::new(document),
            model_fields: Vec::new(),
            query_fields: IndexMap::new(),
            mutation_fields: IndexMap::new(),
        }
    }

    pub fn models(&self) -> Vec<ModelEntry<'d, 'a>> {
        self.type_maps.model_entries(self.document).collect()
    }

    pub fn model(&self, name: &str) -> Option<ModelEntry<'d, 'a>> {
        self.type_maps.model(self.document, name)
    }

    pub fn is_model(&self, name: &str) -> bool {
        self.type_maps.is_model(name)
    }

    pub fn is_plain_type(&self, name: &str) -> bool {
        self.type_maps.is_plain_type(name)
    }

    pub fn has_query(&self, name: &str) -> bool {
        self.operations.queries.as_ref().is_some_and(|q| q.contains(name))
    }

    pub fn has_mutation(&self, name: &str) -> bool {
        self.operations.mutations.as_ref().is_some_and(|m| m.contains(name))
    }

    /// Queues a root `Query` field unless one of the same name exists.
    pub fn add_query_field(&mut self, field: Field<'a>) {
        if self.operations.queries.is_none() || self.has_query(&field.name) {
            return;
        }

        self.query_fields.entry(field.name.clone()).or_insert(field);
    }

    /// Queues a root `Mutation` field unless one of the same name exists.
    pub fn add_mutation_field(&mut self, field: Field<'a>) {
        if self.operations.mutations.is_none() || self.has_mutation(&field.name) {
            return;
        }

        self.mutation_fields.entry(field.name.clone()).or_insert(field);
    }

    fn finish(self) -> Augmentation<'a> {
        Augmentation {
            model_fields: self.model_fields,
            query_fields: self.query_fields.into_values().collect(),
            mutation_fields: self.mutation_fields.into_values().collect(),
            definitions: self.cache.into_definitions(),
        }
    }
}

/// Everything the planning pass produced, detached from the document borrow.
struct Augmentation<'a> {
    model_fields: Vec<(usize, Vec<Field<'a>>)>,
    query_fields: Vec<Field<'a>>,
    mutation_fields: Vec<Field<'a>>,
    definitions: Vec<sdl_ast::ast::Definition<'a>>,
}

impl<'a> Augmentation<'a> {
    fn apply(self, document: &mut Document<'a>, operations: &OperationMaps) {
        for (index, fields) in self.model_fields {
            if let Some(model) = sdl_ast::object_type_at_mut(document, index) {
                model.fields = fields;
            }
        }

        if let Some(root) = operations.queries.as_ref() {
            if let Some(query) = sdl_ast::object_type_at_mut(document, root.index) {
                query.fields.extend(self.query_fields);
            }
        }

        if let Some(root) = operations.mutations.as_ref() {
            if let Some(mutation) = sdl_ast::object_type_at_mut(document, root.index) {
                mutation.fields.extend(self.mutation_fields);
            }
        }

        document.definitions.extend(self.definitions);
    }
}

/// Augments schema text. See the crate documentation for what is generated.
#[tracing::instrument(skip_all, fields(remote = options.is_for_remote))]
pub fn augment(type_defs: &str, options: &AugmentOptions) -> SchemaResult<String> {
    let mut document = parse_type_defs(type_defs)?;
    augment_document(&mut document, options)?;

    Ok(print_type_defs(&document))
}

/// Augments a parsed document in place.
pub fn augment_document(document: &mut Document<'_>, options: &AugmentOptions) -> SchemaResult<()> {
    let type_maps = build_type_maps(document)?;

    if type_maps.models.is_empty() {
        tracing::debug!("no model types, nothing to augment");
        return Ok(());
    }

    output_types::schema_definition::scaffold(document, options);
    output_types::objects::model::normalize(document, &type_maps, options)?;

    let operations = build_operation_maps(document);

    let augmentation = {
        let mut ctx = BuilderContext::new(document, &type_maps, &operations, options);

        for model in ctx.models() {
            build_model(&mut ctx, model);
        }

        ctx.finish()
    };

    tracing::debug!(
        definitions = augmentation.definitions.len(),
        queries = augmentation.query_fields.len(),
        mutations = augmentation.mutation_fields.len(),
        "generated schema additions"
    );

    augmentation.apply(document, &operations);

    Ok(())
}

fn build_model<'d, 'a>(ctx: &mut BuilderContext<'d, 'a>, model: ModelEntry<'d, 'a>) {
    if !ctx.options.is_for_remote {
        output_types::objects::model::rebuild(ctx, model);

        if ctx.options.query {
            output_types::query_type::build(ctx, model);
        }

        enum_types::ordering_enum(ctx, model);
        input_types::objects::filter_objects::filter_object_type(ctx, model);
    }

    // Nested inputs and mutations are skipped when the user claimed the model name as a mutation.
    if ctx.options.mutation && ctx.operations.mutations.is_some() && !ctx.has_mutation(model.name()) {
        input_types::objects::nested_objects::build(ctx, model.name());
        output_types::mutation_type::build(ctx, model);
        input_types::objects::create_objects::create_object_type(ctx, model);
        input_types::objects::create_objects::where_unique_object_type(ctx, model);
    }
}
