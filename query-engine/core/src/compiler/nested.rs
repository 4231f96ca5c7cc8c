use super::{MAX_NESTING_DEPTH, fragments, inject_id};
use crate::{CoreError, CoreResult, IdGenerator, ModelInfo, SchemaContext};
use indexmap::IndexMap;
use sdl_ast::names;
use serde_json::{Map, Value};
use std::{collections::HashMap, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedAction {
    Create,
    Connect,
}

impl NestedAction {
    /// Processing order within one relation field.
    pub const ALL: [Self; 2] = [Self::Create, Self::Connect];

    pub fn key(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Connect => "connect",
        }
    }
}

impl fmt::Display for NestedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One step from the root arguments down to a nested element.
#[derive(Debug, Clone)]
pub(super) struct PathSegment {
    pub field: String,
    pub action: NestedAction,
    pub related: String,
}

/// Statement groups already emitted, keyed by `(field, action)` along the path.
#[derive(Debug, Default)]
struct Emitted {
    children: HashMap<(String, NestedAction), Emitted>,
}

impl Emitted {
    /// Returns whether this is the first visit, and the memo one level down.
    fn enter(&mut self, field: &str, action: NestedAction) -> (bool, &mut Emitted) {
        let key = (field.to_owned(), action);
        let first = !self.children.contains_key(&key);

        (first, self.children.entry(key).or_default())
    }
}

#[derive(Clone, Copy)]
struct Scope<'s> {
    model: &'s str,
    /// Correlation variable of the arguments being walked. `None` at the root.
    element: Option<&'s str>,
    path: &'s [PathSegment],
    depth: usize,
}

#[derive(Clone, Copy)]
struct Relation<'r> {
    field: &'r str,
    related: &'r str,
    action: NestedAction,
}

/// What a walk over the nested arguments produced.
pub(super) struct NestedStatements {
    pub groups: Vec<String>,
    /// Unique field values of every touched record, by model, in first-touch order.
    pub staged: IndexMap<String, Vec<Value>>,
}

pub(super) struct NestedCompiler<'c> {
    ctx: &'c SchemaContext,
    root_model: &'c str,
    ids: Option<&'c dyn IdGenerator>,
    groups: Vec<String>,
    staged: IndexMap<String, Vec<Value>>,
}

impl<'c> NestedCompiler<'c> {
    pub fn new(ctx: &'c SchemaContext, root_model: &'c str, ids: Option<&'c dyn IdGenerator>) -> Self {
        Self {
            ctx,
            root_model,
            ids,
            groups: Vec::new(),
            staged: IndexMap::new(),
        }
    }

    /// Walks the arguments of a root create. Nested create arguments get their ids
    /// injected in place.
    pub fn compile(mut self, arguments: &mut Map<String, Value>) -> CoreResult<NestedStatements> {
        let scope = Scope {
            model: self.root_model,
            element: None,
            path: &[],
            depth: 0,
        };

        self.walk(scope, NestedAction::Create, arguments, &mut Emitted::default())?;

        Ok(NestedStatements {
            groups: self.groups,
            staged: self.staged,
        })
    }

    fn walk(
        &mut self,
        scope: Scope<'_>,
        action: NestedAction,
        arguments: &mut Map<String, Value>,
        emitted: &mut Emitted,
    ) -> CoreResult<()> {
        if scope.depth > MAX_NESTING_DEPTH {
            return Err(CoreError::NestingDepthExceeded {
                max_depth: MAX_NESTING_DEPTH,
            });
        }

        let ctx = self.ctx;
        let model = ctx.model(scope.model)?;

        self.stage(scope.model, model, arguments);
        tracing::trace!(model = scope.model, %action, depth = scope.depth, "walking nested arguments");

        let owner_keys: Vec<String> = arguments.keys().cloned().collect();

        for field in &owner_keys {
            let Some(related) = model.related_model(field) else {
                continue;
            };

            let Some(Value::Object(nested)) = arguments.get_mut(field) else {
                continue;
            };

            let supplied = |value: Option<&Value>| value.is_some_and(|v| !v.is_null());
            let creates = supplied(nested.get(NestedAction::Create.key()));
            let connects = supplied(nested.get(NestedAction::Connect.key()));

            if creates && connects && !model.is_to_many(field) {
                return Err(CoreError::RelationArityViolation {
                    field: field.clone(),
                    model: scope.model.to_owned(),
                });
            }

            for action in NestedAction::ALL {
                let Some(value) = nested.get_mut(action.key()).filter(|v| !v.is_null()) else {
                    continue;
                };

                let relation = Relation {
                    field: field.as_str(),
                    related,
                    action,
                };
                self.nested(scope, relation, &owner_keys, value, emitted)?;
            }
        }

        Ok(())
    }

    fn nested(
        &mut self,
        scope: Scope<'_>,
        relation: Relation<'_>,
        owner_keys: &[String],
        value: &mut Value,
        emitted: &mut Emitted,
    ) -> CoreResult<()> {
        let element = fragments::element_name(scope.element.unwrap_or(scope.model), relation.field, relation.related);

        let mut path = scope.path.to_vec();
        path.push(PathSegment {
            field: relation.field.to_owned(),
            action: relation.action,
            related: relation.related.to_owned(),
        });

        let (first, below) = emitted.enter(relation.field, relation.action);

        if first {
            let group = self.statement_group(scope, relation, &element, &path, owner_keys)?;
            self.groups.push(group);
        }

        let child = Scope {
            model: relation.related,
            element: Some(&element),
            path: &path,
            depth: scope.depth + 1,
        };

        if let Value::Array(items) = value {
            for item in items.iter_mut() {
                self.nested_element(child, relation, item, below)?;
            }

            Ok(())
        } else {
            self.nested_element(child, relation, value, below)
        }
    }

    fn nested_element(
        &mut self,
        scope: Scope<'_>,
        relation: Relation<'_>,
        item: &mut Value,
        emitted: &mut Emitted,
    ) -> CoreResult<()> {
        let Value::Object(arguments) = item else {
            return Err(CoreError::invalid_arguments(format!(
                "nested {} on field `{}` expects an object or a list of objects",
                relation.action, relation.field
            )));
        };

        if relation.action == NestedAction::Create {
            inject_id(arguments, self.ids)?;
        }

        self.walk(scope, relation.action, arguments, emitted)
    }

    /// Unwinds down to the element, creates it if needed, and attaches it to its
    /// owner, which is matched by the root arguments or by the parent element.
    fn statement_group(
        &self,
        scope: Scope<'_>,
        relation: Relation<'_>,
        element: &str,
        path: &[PathSegment],
        owner_keys: &[String],
    ) -> CoreResult<String> {
        let ctx = self.ctx;
        let owner = ctx.model(scope.model)?;
        let target = ctx.model(relation.related)?;

        let relation_mutation = names::relation_mutation(scope.model, relation.field);
        let relation_template = &ctx.mutation(&relation_mutation)?.cypher;

        let owner_bindings = match scope.element {
            None => fragments::root_bindings(&owner.unique_properties, |f| owner_keys.iter().any(|k| k == f)),
            Some(parent) => fragments::element_bindings(&owner.unique_properties, parent),
        };

        let call = fragments::relation_call(
            relation_template,
            &relation_mutation,
            relation.field,
            element,
            &owner_bindings,
            &fragments::element_bindings(&target.unique_properties, element),
        );

        let unwinds = fragments::unwinds(self.root_model, path);

        match relation.action {
            NestedAction::Create => {
                let create_template = &ctx.mutation(&names::create_mutation(relation.related))?.cypher;
                Ok(fragments::nested_create(&unwinds, create_template, element, &call))
            }
            NestedAction::Connect => Ok(fragments::nested_connect(&unwinds, &call)),
        }
    }

    fn stage(&mut self, model_name: &str, model: &ModelInfo, arguments: &Map<String, Value>) {
        let record: Map<String, Value> = model
            .unique_properties
            .iter()
            .map(|field| (field.clone(), arguments.get(field).cloned().unwrap_or(Value::Null)))
            .collect();

        self.staged
            .entry(model_name.to_owned())
            .or_default()
            .push(Value::Object(record));
    }
}
