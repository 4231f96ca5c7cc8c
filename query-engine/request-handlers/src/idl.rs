use crate::{HandlerError, Result};
use query_core::{CoreError, Driver, Statement, run_statement};
use sdl_ast::{
    ast::{Definition, TypeDefinition, Value as SdlValue},
    directives::{CYPHER, STATEMENT_ARGUMENT},
    maps::MUTATION,
    parse_type_defs, print_type_defs,
};
use serde_json::{Map, Value};

const IDL_STATEMENT: &str = "CALL graphql.idl({schema})";

/// Rewrites the `@cypher(statement:)` of every `Mutation` field onto one line,
/// the form the database's schema registration accepts.
pub fn one_line_cypher_statements(type_defs: &str) -> Result<String> {
    let mut document = parse_type_defs(type_defs).map_err(CoreError::from)?;

    let mutation = document.definitions.iter_mut().find_map(|definition| match definition {
        Definition::TypeDefinition(TypeDefinition::Object(object)) if object.name == MUTATION => Some(object),
        _ => None,
    });

    for field in mutation.into_iter().flat_map(|object| object.fields.iter_mut()) {
        let arguments = field
            .directives
            .iter_mut()
            .filter(|directive| directive.name == CYPHER)
            .flat_map(|directive| directive.arguments.iter_mut());

        for (name, value) in arguments {
            if let (STATEMENT_ARGUMENT, SdlValue::String(statement)) = (name.as_str(), value) {
                *statement = statement.replace('\n', " ");
            }
        }
    }

    Ok(print_type_defs(&document))
}

/// Registers the schema with the database and returns what the registration
/// call yields.
#[tracing::instrument(skip_all)]
pub async fn register_idl(driver: &dyn Driver, type_defs: &str) -> Result<Value> {
    let schema = one_line_cypher_statements(type_defs)?;

    let mut parameters = Map::new();
    parameters.insert("schema".to_owned(), Value::String(schema));

    let records = run_statement(driver, &Statement::new(IDL_STATEMENT, parameters)).await?;

    records
        .into_iter()
        .next()
        .and_then(|record| record.into_first_column())
        .ok_or_else(|| HandlerError::from(CoreError::ResultShape("schema registration returned no records".to_owned())))
}
