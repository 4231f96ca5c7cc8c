//! Folds the records a compiled mutation read back into the shape of its
//! arguments, so the client sees every created or connected record in place.

use crate::{CoreError, CoreResult, NestedAction, SchemaContext};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Persisted records by model, then unique field, then rendered key.
#[derive(Debug, Default)]
struct RecordIndex<'p> {
    models: IndexMap<String, IndexMap<String, IndexMap<String, &'p Map<String, Value>>>>,
}

impl<'p> RecordIndex<'p> {
    fn build(ctx: &SchemaContext, persisted: &'p Value) -> CoreResult<Self> {
        let Value::Object(by_model) = persisted else {
            return Err(CoreError::ResultShape(
                "expected the read back records grouped by model".to_owned(),
            ));
        };

        let mut index = Self::default();

        for (model, records) in by_model {
            let Ok(info) = ctx.model(model) else {
                tracing::warn!(model = model.as_str(), "ignoring records of an unknown model");
                continue;
            };

            let by_field = index.models.entry(model.clone()).or_default();

            for record in records.as_array().into_iter().flatten().filter_map(Value::as_object) {
                for field in &info.unique_properties {
                    let Some(key) = record.get(field).and_then(lookup_key) else {
                        continue;
                    };

                    // Later records win.
                    by_field.entry(field.clone()).or_default().insert(key, record);
                }
            }
        }

        Ok(index)
    }

    fn find(&self, model: &str, field: &str, value: &Value) -> Option<&'p Map<String, Value>> {
        let key = lookup_key(value)?;
        self.models.get(model)?.get(field)?.get(&key).copied()
    }
}

fn lookup_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Returns the arguments of a root create with every nested `create`/`connect`
/// replaced by the records they produced.
pub fn reconcile(
    ctx: &SchemaContext,
    root_model: &str,
    arguments: Map<String, Value>,
    persisted: &Value,
) -> CoreResult<Value> {
    let index = RecordIndex::build(ctx, persisted)?;
    let root = index.merge_created(root_model, arguments);

    Ok(Value::Object(index.resolve(ctx, root_model, root)?))
}

impl RecordIndex<'_> {
    fn merge_created(&self, model: &str, mut arguments: Map<String, Value>) -> Map<String, Value> {
        let found = arguments
            .get(sdl_ast::fields::ID)
            .and_then(|id| self.find(model, sdl_ast::fields::ID, id));

        if let Some(record) = found {
            for (key, value) in record {
                arguments.insert(key.clone(), value.clone());
            }
        }

        arguments
    }

    fn connected(&self, model: &str, arguments: Map<String, Value>) -> Map<String, Value> {
        let found = arguments
            .iter()
            .next()
            .and_then(|(field, value)| self.find(model, field, value));

        match found {
            Some(record) => record.clone(),
            None => arguments,
        }
    }

    fn resolve(&self, ctx: &SchemaContext, model: &str, mut arguments: Map<String, Value>) -> CoreResult<Map<String, Value>> {
        let info = ctx.model(model)?;

        for (field, related) in &info.relations {
            let Some(Value::Object(nested)) = arguments.get_mut(field) else {
                continue;
            };

            let create = nested
                .remove(NestedAction::Create.key())
                .filter(|v| !v.is_null())
                .map(|v| self.each(ctx, related, v, NestedAction::Create))
                .transpose()?;

            let connect = nested
                .remove(NestedAction::Connect.key())
                .filter(|v| !v.is_null())
                .map(|v| self.each(ctx, related, v, NestedAction::Connect))
                .transpose()?;

            let resolved = match (create, connect) {
                (None, None) => continue,
                (Some(create), None) => create,
                (None, Some(connect)) => connect,
                (Some(Value::Array(mut created)), Some(connect)) => {
                    match connect {
                        Value::Array(connected) => created.extend(connected),
                        other => created.push(other),
                    }
                    Value::Array(created)
                }
                (Some(Value::Object(mut created)), Some(Value::Object(connected))) => {
                    created.extend(connected);
                    Value::Object(created)
                }
                (Some(create), Some(_)) => create,
            };

            arguments.insert(field.clone(), resolved);
        }

        Ok(arguments)
    }

    fn each(&self, ctx: &SchemaContext, model: &str, value: Value, action: NestedAction) -> CoreResult<Value> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.element(ctx, model, item, action))
                .collect::<CoreResult<Vec<_>>>()
                .map(Value::Array),
            other => self.element(ctx, model, other, action),
        }
    }

    fn element(&self, ctx: &SchemaContext, model: &str, value: Value, action: NestedAction) -> CoreResult<Value> {
        let Value::Object(arguments) = value else {
            return Ok(value);
        };

        let arguments = match action {
            NestedAction::Create => self.merge_created(model, arguments),
            NestedAction::Connect => self.connected(model, arguments),
        };

        self.resolve(ctx, model, arguments).map(Value::Object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn context() -> SchemaContext {
        SchemaContext::from_type_defs(indoc! {r#"
            type Person @model {
              id: ID! @unique
              name: String
              email: String @unique
              child: Person @relation(name: "PARENT_OF", direction: "OUT")
              friends: [Person] @relation(name: "KNOWS", direction: "OUT")
            }

            type Mutation {
              createPerson(data: PersonCreateInput): Person @GraphBinding
            }
        "#})
        .unwrap()
    }

    fn arguments(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn created_records_are_merged_by_id() {
        let persisted = json!({
            "Person": [
                { "id": "p1", "name": "A", "email": null },
                { "id": "c1", "name": "B", "email": null },
            ]
        });

        let result = reconcile(
            &context(),
            "Person",
            arguments(json!({ "id": "p1", "name": "A", "child": { "create": { "id": "c1", "name": "B" } } })),
            &persisted,
        )
        .unwrap();

        assert_eq!(
            result,
            json!({
                "id": "p1",
                "name": "A",
                "email": null,
                "child": { "id": "c1", "name": "B", "email": null },
            })
        );
    }

    #[test]
    fn connected_records_are_appended_after_created_ones() {
        let persisted = json!({
            "Person": [
                { "id": "p1", "name": "A" },
                { "id": "c1", "name": "B" },
                { "id": "p9", "name": "Bob", "email": "bob@example.com" },
            ]
        });

        let result = reconcile(
            &context(),
            "Person",
            arguments(json!({
                "id": "p1",
                "friends": {
                    "create": [{ "id": "c1", "name": "B" }],
                    "connect": [{ "email": "bob@example.com" }],
                },
            })),
            &persisted,
        )
        .unwrap();

        assert_eq!(
            result["friends"],
            json!([
                { "id": "c1", "name": "B" },
                { "id": "p9", "name": "Bob", "email": "bob@example.com" },
            ])
        );
    }

    #[test]
    fn unmatched_connects_keep_their_arguments() {
        let result = reconcile(
            &context(),
            "Person",
            arguments(json!({ "id": "p1", "child": { "connect": { "email": "nobody@example.com" } } })),
            &json!({ "Person": [] }),
        )
        .unwrap();

        assert_eq!(result, json!({ "id": "p1", "child": { "email": "nobody@example.com" } }));
    }

    #[test]
    fn persisted_records_must_be_grouped_by_model() {
        let err = reconcile(&context(), "Person", Map::new(), &json!([])).unwrap_err();

        assert!(matches!(err, CoreError::ResultShape(_)));
    }
}
