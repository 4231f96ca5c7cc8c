use crate::{BindingConfig, HandlerError, Link, Operation, OperationKind, Result};
use indexmap::IndexMap;
use itertools::Itertools;
use query_core::{CoreError, Driver, SchemaCache};
use sdl_ast::{ast::Document, build_operation_maps, fields::render_type, parse_type_defs};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Declared argument types of one root field, by argument name.
type Signature = IndexMap<String, String>;

/// The `Query` and `Mutation` fields of a schema, with their argument types.
#[derive(Debug, Clone, Default)]
struct RootSignatures {
    queries: IndexMap<String, Signature>,
    mutations: IndexMap<String, Signature>,
}

impl RootSignatures {
    fn from_document(document: &Document<'_>) -> Self {
        let operations = build_operation_maps(document);

        let collect = |fields: Option<&sdl_ast::OperationFields>| -> IndexMap<String, Signature> {
            fields
                .and_then(|fields| fields.root(document))
                .map(|root| {
                    root.fields
                        .iter()
                        .map(|field| {
                            let signature = field
                                .arguments
                                .iter()
                                .map(|argument| (argument.name.clone(), render_type(&argument.value_type)))
                                .collect();

                            (field.name.clone(), signature)
                        })
                        .collect()
                })
                .unwrap_or_default()
        };

        Self {
            queries: collect(operations.queries.as_ref()),
            mutations: collect(operations.mutations.as_ref()),
        }
    }

    fn get(&self, kind: OperationKind, field: &str) -> Option<&Signature> {
        match kind {
            OperationKind::Query => self.queries.get(field),
            OperationKind::Mutation => self.mutations.get(field),
            OperationKind::Subscription => None,
        }
    }
}

/// The table of root fields resolvers delegate to. Every call is turned into a
/// single-field operation and sent through the [`Link`].
#[derive(Debug, Clone)]
pub struct Binding {
    link: Link,
    signatures: RootSignatures,
}

impl Binding {
    pub fn new(type_defs: &str, driver: Arc<dyn Driver>, config: &BindingConfig, cache: &SchemaCache) -> Result<Self> {
        let ctx = cache.get_or_build(type_defs)?;
        let document = parse_type_defs(type_defs).map_err(CoreError::from)?;

        Ok(Self {
            link: Link::new(ctx, driver, config),
            signatures: RootSignatures::from_document(&document),
        })
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    pub fn has_field(&self, kind: OperationKind, field: &str) -> bool {
        self.signatures.get(kind, field).is_some()
    }

    pub async fn query(&self, field: &str, arguments: Map<String, Value>, selection: Option<&str>) -> Result<Value> {
        self.delegate(OperationKind::Query, field, arguments, selection).await
    }

    pub async fn mutation(&self, field: &str, arguments: Map<String, Value>, selection: Option<&str>) -> Result<Value> {
        self.delegate(OperationKind::Mutation, field, arguments, selection).await
    }

    /// Runs `field` with the given arguments and returns the value of that field
    /// from the response data.
    pub async fn delegate(
        &self,
        kind: OperationKind,
        field: &str,
        arguments: Map<String, Value>,
        selection: Option<&str>,
    ) -> Result<Value> {
        let signature = self
            .signatures
            .get(kind, field)
            .ok_or_else(|| HandlerError::missing_callable(kind.root_type(), field))?;

        let operation = delegated_operation(kind, field, signature, arguments, selection)?;
        let mut data = self.link.request(&operation).await?;

        Ok(data.get_mut(field).map(Value::take).unwrap_or(Value::Null))
    }
}

/// `<kind> ($_v0_a: A, ...) { field(a: $_v0_a, ...) <selection> }`
///
/// Every argument becomes a variable named `_v<n>_<argument>`.
fn delegated_operation(
    kind: OperationKind,
    field: &str,
    signature: &Signature,
    arguments: Map<String, Value>,
    selection: Option<&str>,
) -> Result<Operation> {
    let mut definitions = Vec::with_capacity(arguments.len());
    let mut bindings = Vec::with_capacity(arguments.len());
    let mut variables = Map::with_capacity(arguments.len());

    for (position, (name, value)) in arguments.into_iter().enumerate() {
        let value_type = signature.get(&name).ok_or_else(|| {
            HandlerError::query_conversion(format!("Unknown argument `{name}` on field `{field}`."))
        })?;

        let variable = format!("_v{position}_{name}");

        definitions.push(format!("${variable}: {value_type}"));
        bindings.push(format!("{name}: ${variable}"));
        variables.insert(variable, value);
    }

    let definitions = if definitions.is_empty() {
        String::new()
    } else {
        format!(" ({})", definitions.iter().join(", "))
    };

    let bindings = if bindings.is_empty() {
        String::new()
    } else {
        format!("({})", bindings.iter().join(", "))
    };

    let selection = selection.map(|s| format!(" {s}")).unwrap_or_default();
    let text = format!("{kind}{definitions} {{ {field}{bindings}{selection} }}");

    tracing::trace!(operation = %text, "delegating");

    Operation::parse(&text, variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signature(arguments: &[(&str, &str)]) -> Signature {
        arguments
            .iter()
            .map(|(name, ty)| (name.to_string(), ty.to_string()))
            .collect()
    }

    #[test]
    fn arguments_become_prefixed_variables() {
        let arguments = match json!({ "where": { "id": "p1" }, "friends": [{ "id": "p2" }] }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let operation = delegated_operation(
            OperationKind::Mutation,
            "addPersonFriends",
            &signature(&[
                ("where", "PersonWhereUniqueInput!"),
                ("friends", "[PersonWhereUniqueInput!]!"),
            ]),
            arguments,
            None,
        )
        .unwrap();

        assert_eq!(operation.kind(), OperationKind::Mutation);
        assert_eq!(operation.root_field(), "addPersonFriends");
        assert_eq!(
            Value::Object(operation.variables().clone()),
            json!({ "_v0_where": { "id": "p1" }, "_v1_friends": [{ "id": "p2" }] })
        );
        assert!(operation.text().contains("addPersonFriends(where: $_v0_where, friends: $_v1_friends)"));
    }

    #[test]
    fn undeclared_arguments_are_rejected() {
        let arguments = match json!({ "nope": 1 }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let err = delegated_operation(OperationKind::Query, "Person", &Signature::new(), arguments, None).unwrap_err();

        assert_eq!(err.to_string(), "Unknown argument `nope` on field `Person`.");
    }
}
