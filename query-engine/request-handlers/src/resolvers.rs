use crate::{Binding, DEFAULT_BINDING_KEY, HandlerError, ResolverOptions, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use query_core::CoreError;
use sdl_ast::{
    build_operation_maps, directives,
    fields::has_directive,
    maps::{MUTATION, QUERY, SUBSCRIPTION},
    parse_type_defs,
};
use serde_json::{Map, Value};
use std::{collections::HashMap, fmt, sync::Arc};

/// What a resolver knows about the field it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveInfo {
    pub parent_type: String,
    pub field_name: String,
    /// Selection set of the field as GraphQL text, e.g. `{ id name }`.
    pub selection: Option<String>,
}

impl ResolveInfo {
    pub fn new(parent_type: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            parent_type: parent_type.into(),
            field_name: field_name.into(),
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }
}

/// Per-request state handed to resolvers: the bindings by key and the name of
/// the root field being executed.
#[derive(Default, Clone)]
pub struct RequestContext {
    bindings: HashMap<String, Arc<Binding>>,
    pub operation_name: Option<String>,
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .field("operation_name", &self.operation_name)
            .finish()
    }
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binding(mut self, key: impl Into<String>, binding: Arc<Binding>) -> Self {
        self.bindings.insert(key.into(), binding);
        self
    }

    pub fn binding(&self, key: &str) -> Result<Arc<Binding>> {
        self.bindings
            .get(key)
            .cloned()
            .ok_or_else(|| HandlerError::MissingBinding(key.to_owned()))
    }
}

#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, arguments: Map<String, Value>, ctx: &mut RequestContext, info: &ResolveInfo) -> Result<Value>;
}

/// Resolvers by root type name, then field name.
pub type ResolverMap = IndexMap<String, IndexMap<String, Arc<dyn Resolver>>>;

/// Forwards a root field to the binding stored under `binding_key`.
#[derive(Debug, Clone)]
pub struct DelegatingResolver {
    binding_key: String,
}

impl DelegatingResolver {
    pub fn new(binding_key: impl Into<String>) -> Self {
        Self {
            binding_key: binding_key.into(),
        }
    }
}

#[async_trait]
impl Resolver for DelegatingResolver {
    async fn resolve(&self, arguments: Map<String, Value>, ctx: &mut RequestContext, info: &ResolveInfo) -> Result<Value> {
        let binding = ctx.binding(&self.binding_key)?;
        let selection = info.selection.as_deref();

        match info.parent_type.as_str() {
            QUERY => binding.query(&info.field_name, arguments, selection).await,
            MUTATION => binding.mutation(&info.field_name, arguments, selection).await,
            other => Err(HandlerError::missing_callable(other, &info.field_name)),
        }
    }
}

/// Delegating resolvers for every `Query` and `Mutation` field that is generated
/// or backed by a `@cypher` statement, unless `resolvers` already has one.
///
/// Only the new resolvers are returned.
pub fn build_resolvers(type_defs: &str, resolvers: &ResolverMap, options: &ResolverOptions) -> Result<ResolverMap> {
    let document = parse_type_defs(type_defs).map_err(CoreError::from)?;
    let operations = build_operation_maps(&document);

    let roots = [
        (QUERY, options.query, operations.queries.as_ref()),
        (MUTATION, options.mutation, operations.mutations.as_ref()),
    ];

    let mut augmented = ResolverMap::new();

    for (root_name, enabled, fields) in roots {
        let Some(root) = fields.and_then(|f| f.root(&document)).filter(|_| enabled) else {
            continue;
        };

        let delegated = augmented.entry(root_name.to_owned()).or_default();

        for field in &root.fields {
            let bound = has_directive(&field.directives, directives::CYPHER)
                || has_directive(&field.directives, directives::BINDING);

            let user_defined = resolvers
                .get(root_name)
                .is_some_and(|fields| fields.contains_key(&field.name));

            if bound && !user_defined {
                delegated.insert(
                    field.name.clone(),
                    Arc::new(DelegatingResolver::new(options.binding_key.clone())),
                );
            }
        }
    }

    tracing::debug!(
        queries = augmented.get(QUERY).map_or(0, IndexMap::len),
        mutations = augmented.get(MUTATION).map_or(0, IndexMap::len),
        "built delegating resolvers"
    );

    Ok(augmented)
}

/// Routes a resolved root field to the default binding on the context and
/// records the field as the operation name.
pub async fn execute(arguments: Map<String, Value>, ctx: &mut RequestContext, info: &ResolveInfo) -> Result<Value> {
    let selection = info.selection.as_deref();

    match info.parent_type.as_str() {
        MUTATION => {
            ctx.operation_name = Some(info.field_name.clone());
            let binding = ctx.binding(DEFAULT_BINDING_KEY)?;

            binding.mutation(&info.field_name, arguments, selection).await
        }
        QUERY => {
            ctx.operation_name = Some(info.field_name.clone());
            let binding = ctx.binding(DEFAULT_BINDING_KEY)?;

            binding.query(&info.field_name, arguments, selection).await
        }
        SUBSCRIPTION => Err(HandlerError::unsupported_feature(
            "Subscriptions",
            "operations on the Subscription type cannot be resolved",
        )),
        other => Err(HandlerError::unsupported_feature(
            "Parent type",
            format!("`{other}` is not a root operation type"),
        )),
    }
}
