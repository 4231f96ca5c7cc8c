use crate::{
    CompiledMutation, CoreError, CoreResult, IdGenerator, MutationAction, Record, SchemaContext, Statement,
    compile_mutation, reconcile,
};
use serde_json::{Map, Value};

/// What a single operation turns into before it reaches the database.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPlan {
    /// Read operations are interpreted by the database as they are.
    Query(Statement),

    /// Mutations the binding does not resolve itself.
    Passthrough { field: String, statement: Statement },

    Mutation(CompiledMutation),
}

impl RequestPlan {
    pub fn query(operation: &str, variables: &Map<String, Value>) -> Self {
        Self::Query(Statement::graphql_query(operation, variables))
    }

    /// Compiles `field` if it is a generated mutation, otherwise forwards the
    /// operation text.
    pub fn mutation(
        ctx: &SchemaContext,
        operation: &str,
        field: &str,
        variables: &Map<String, Value>,
        ids: Option<&dyn IdGenerator>,
    ) -> CoreResult<Self> {
        if ctx.is_generated_mutation(field) {
            return compile_mutation(ctx, field, variables, ids).map(Self::Mutation);
        }

        tracing::debug!(field, "forwarding mutation");

        Ok(Self::Passthrough {
            field: field.to_owned(),
            statement: Statement::graphql_execute(operation, variables),
        })
    }

    pub fn statement(&self) -> &Statement {
        match self {
            Self::Query(statement) => statement,
            Self::Passthrough { statement, .. } => statement,
            Self::Mutation(compiled) => &compiled.statement,
        }
    }

    /// Turns the records the statement produced into the `data` of the response.
    pub fn shape(self, ctx: &SchemaContext, records: Vec<Record>) -> CoreResult<Value> {
        let first = records
            .into_iter()
            .next()
            .and_then(Record::into_first_column)
            .ok_or_else(|| CoreError::ResultShape("the statement returned no records".to_owned()))?;

        let value = match self {
            Self::Query(_) => first,
            Self::Passthrough { field, .. } => single_field(field, &first),
            Self::Mutation(compiled) => match compiled.action {
                MutationAction::Create => {
                    let reconciled = reconcile(ctx, &compiled.root_model, compiled.arguments, &first)?;
                    Value::Object(Map::from_iter([(compiled.mutation_name, reconciled)]))
                }
                MutationAction::Add => single_field(compiled.mutation_name, &first),
            },
        };

        Ok(value)
    }
}

fn single_field(field: String, result: &Value) -> Value {
    let value = result.get(&field).cloned().unwrap_or(Value::Null);
    Value::Object(Map::from_iter([(field, value)]))
}
