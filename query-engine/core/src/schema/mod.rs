//! Read-only knowledge derived once per schema: which mutations are generated,
//! and the model and mutation maps the compiler works from.

mod cache;
mod model_map;
mod mutation_map;

pub use cache::SchemaCache;
pub use model_map::{ModelInfo, ModelMap};
pub use mutation_map::{MutationAction, MutationInfo, MutationMap};

use crate::{CoreError, CoreResult};
use indexmap::IndexSet;
use sdl_ast::{
    ast::Document,
    build_operation_maps, build_type_maps, directives,
    fields::has_directive,
    parse_type_defs,
};
use std::sync::Arc;

pub type SchemaContextRef = Arc<SchemaContext>;

#[derive(Debug, Clone, Default)]
pub struct SchemaContext {
    generated_mutations: IndexSet<String>,
    models: ModelMap,
    mutations: MutationMap,
}

impl SchemaContext {
    pub fn from_type_defs(type_defs: &str) -> CoreResult<Self> {
        let document = parse_type_defs(type_defs)?;
        Self::from_document(&document)
    }

    pub fn from_document(document: &Document<'_>) -> CoreResult<Self> {
        let type_maps = build_type_maps(document)?;
        let operations = build_operation_maps(document);

        // Mutations the binding resolves are the ones carrying the marker directive.
        let generated_mutations: IndexSet<String> = operations
            .mutations
            .as_ref()
            .and_then(|mutations| mutations.root(document))
            .map(|root| {
                root.fields
                    .iter()
                    .filter(|f| has_directive(&f.directives, directives::BINDING))
                    .map(|f| f.name.clone())
                    .collect()
            })
            .unwrap_or_default();

        let mut models = ModelMap::new();
        let mut mutations = MutationMap::new();

        for model in type_maps.model_entries(document) {
            models.insert(model.name().to_owned(), ModelInfo::from_model(model));
            mutation_map::model_mutations(model, &generated_mutations, &mut mutations);
        }

        tracing::debug!(
            models = models.len(),
            mutations = mutations.len(),
            generated = generated_mutations.len(),
            "built schema context"
        );

        Ok(Self {
            generated_mutations,
            models,
            mutations,
        })
    }

    pub fn is_generated_mutation(&self, name: &str) -> bool {
        self.generated_mutations.contains(name)
    }

    pub fn models(&self) -> &ModelMap {
        &self.models
    }

    pub fn mutations(&self) -> &MutationMap {
        &self.mutations
    }

    pub fn model(&self, name: &str) -> CoreResult<&ModelInfo> {
        self.models
            .get(name)
            .ok_or_else(|| CoreError::UnknownModel(name.to_owned()))
    }

    pub fn mutation(&self, name: &str) -> CoreResult<&MutationInfo> {
        self.mutations
            .get(name)
            .ok_or_else(|| CoreError::UnknownMutation(name.to_owned()))
    }
}
