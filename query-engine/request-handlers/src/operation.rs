use crate::{HandlerError, Result};
use graphql_parser::query::{Definition, OperationDefinition, Selection, SelectionSet, parse_query};
use sdl_ast::maps::{MUTATION, QUERY, SUBSCRIPTION};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn root_type(self) -> &'static str {
        match self {
            Self::Query => QUERY,
            Self::Mutation => MUTATION,
            Self::Subscription => SUBSCRIPTION,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A single GraphQL operation as it reaches the link: its kind, the one root
/// field it selects, its printed text and its variable values.
///
/// Operations arrive here already reduced to a single root field, so only the
/// first operation definition and its first field are looked at.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    kind: OperationKind,
    root_field: String,
    text: String,
    variables: Map<String, Value>,
}

impl Operation {
    pub fn parse(query: &str, variables: Map<String, Value>) -> Result<Self> {
        let document = parse_query::<String>(query)?;

        let operation = document
            .definitions
            .iter()
            .find_map(|definition| match definition {
                Definition::Operation(operation) => Some(operation),
                Definition::Fragment(_) => None,
            })
            .ok_or_else(|| HandlerError::query_conversion("Document contained no operations."))?;

        let (kind, selection_set) = match operation {
            OperationDefinition::SelectionSet(set) => (OperationKind::Query, set),
            OperationDefinition::Query(query) => (OperationKind::Query, &query.selection_set),
            OperationDefinition::Mutation(mutation) => (OperationKind::Mutation, &mutation.selection_set),
            OperationDefinition::Subscription(subscription) => {
                (OperationKind::Subscription, &subscription.selection_set)
            }
        };

        let root_field = first_field(selection_set)
            .ok_or_else(|| HandlerError::query_conversion(format!("The {kind} selects no field.")))?;

        Ok(Self {
            kind,
            root_field,
            text: document.to_string().trim_end().to_owned(),
            variables,
        })
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn root_field(&self) -> &str {
        &self.root_field
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }
}

fn first_field(selection_set: &SelectionSet<'_, String>) -> Option<String> {
    selection_set.items.iter().find_map(|item| match item {
        Selection::Field(field) => Some(field.name.clone()),
        Selection::FragmentSpread(_) | Selection::InlineFragment(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variables(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn mutation_root_field_is_found() {
        let operation = Operation::parse(
            "mutation ($_v0_data: PersonCreateInput!) { createPerson(data: $_v0_data) { id } }",
            variables(json!({ "_v0_data": { "name": "Ada" } })),
        )
        .unwrap();

        assert_eq!(operation.kind(), OperationKind::Mutation);
        assert_eq!(operation.root_field(), "createPerson");
        assert!(operation.text().contains("createPerson(data: $_v0_data)"));
    }

    #[test]
    fn shorthand_selection_sets_are_queries() {
        let operation = Operation::parse("{ Person { name } }", Map::new()).unwrap();

        assert_eq!(operation.kind(), OperationKind::Query);
        assert_eq!(operation.root_field(), "Person");
    }

    #[test]
    fn subscriptions_are_recognized() {
        let operation = Operation::parse("subscription { personAdded { id } }", Map::new()).unwrap();

        assert_eq!(operation.kind(), OperationKind::Subscription);
        assert_eq!(operation.kind().root_type(), "Subscription");
    }

    #[test]
    fn malformed_operations_are_parse_errors() {
        let err = Operation::parse("mutation { createPerson(", Map::new()).unwrap_err();

        assert!(matches!(err, HandlerError::QueryParse(_)));
    }

    #[test]
    fn fragment_only_documents_have_no_operation() {
        let err = Operation::parse("fragment f on Person { id }", Map::new()).unwrap_err();

        assert!(matches!(err, HandlerError::QueryConversion(_)));
    }
}
