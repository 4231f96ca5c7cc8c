mod common;

use async_trait::async_trait;
use common::{SequentialIds, context, object};
use pretty_assertions::assert_eq;
use query_core::{ConnectorResult, CoreError, Driver, Record, RequestPlan, Session, execute_plan};
use serde_json::{Map, Value, json};
use std::sync::{Arc, Mutex};

#[test]
fn queries_are_interpreted_by_the_database() {
    let plan = RequestPlan::query("query { Person { name } }", &Map::new());

    assert_eq!(plan.statement().text, "CALL graphql.query('query { Person { name } }', {})");

    let data = plan
        .shape(&context(), vec![Record::from(json!({ "Person": [{ "name": "Ada" }] }))])
        .unwrap();

    assert_eq!(data, json!({ "Person": [{ "name": "Ada" }] }));
}

#[test]
fn unmarked_mutations_pass_through() {
    let operation = "mutation($id: ID!) { deletePerson(id: $id) { id } }";
    let variables = object(json!({ "id": "p1" }));

    let plan = RequestPlan::mutation(&context(), operation, "deletePerson", &variables, None).unwrap();

    assert!(matches!(&plan, RequestPlan::Passthrough { field, .. } if field == "deletePerson"));
    assert_eq!(
        plan.statement().text,
        "CALL graphql.execute('mutation($id: ID!) { deletePerson(id: $id) { id } }', {id: {id}})"
    );

    let data = plan
        .shape(
            &context(),
            vec![Record::from(json!({ "deletePerson": { "id": "p1" }, "other": 1 }))],
        )
        .unwrap();

    assert_eq!(data, json!({ "deletePerson": { "id": "p1" } }));
}

#[test]
fn created_records_are_reconciled_into_the_arguments() {
    let variables = object(json!({ "_v0_data": { "name": "A", "child": { "create": { "name": "B" } } } }));

    let plan = RequestPlan::mutation(
        &context(),
        "mutation { createPerson }",
        "createPerson",
        &variables,
        Some(&SequentialIds::default()),
    )
    .unwrap();

    let persisted = json!({
        "Person": [
            { "id": "id-1", "name": "A" },
            { "id": "id-2", "name": "B" },
        ]
    });

    let data = plan.shape(&context(), vec![Record::from(persisted)]).unwrap();

    assert_eq!(
        data,
        json!({
            "createPerson": {
                "id": "id-1",
                "name": "A",
                "child": { "id": "id-2", "name": "B" },
            }
        })
    );
}

#[test]
fn relation_mutations_return_their_own_field() {
    let variables = object(json!({ "where": { "id": "p1" }, "friends": [{ "id": "p2" }] }));

    let plan = RequestPlan::mutation(&context(), "mutation { addPersonFriends }", "addPersonFriends", &variables, None)
        .unwrap();

    let data = plan
        .shape(&context(), vec![Record::from(json!({ "addPersonFriends": "ok" }))])
        .unwrap();

    assert_eq!(data, json!({ "addPersonFriends": "ok" }));
}

#[test]
fn an_empty_result_is_a_shape_error() {
    let err = RequestPlan::query("query { Person { name } }", &Map::new())
        .shape(&context(), Vec::new())
        .unwrap_err();

    assert!(matches!(err, CoreError::ResultShape(_)));
}

#[derive(Default)]
struct RecordingDriver {
    statements: Arc<Mutex<Vec<String>>>,
}

struct RecordingSession {
    statements: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Driver for RecordingDriver {
    async fn session(&self) -> ConnectorResult<Box<dyn Session>> {
        Ok(Box::new(RecordingSession {
            statements: self.statements.clone(),
        }))
    }
}

#[async_trait]
impl Session for RecordingSession {
    async fn run(&mut self, statement: &str, _parameters: &Map<String, Value>) -> ConnectorResult<Vec<Record>> {
        self.statements.lock().unwrap().push(statement.to_owned());
        Ok(vec![Record::from(json!({ "Person": [{ "id": "id-1", "name": "Ada" }] }))])
    }

    async fn close(&mut self) -> ConnectorResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn plans_run_as_a_single_statement() {
    let driver = RecordingDriver::default();
    let ctx = context();
    let variables = object(json!({ "data": { "name": "Ada" } }));

    let plan = RequestPlan::mutation(&ctx, "mutation { createPerson }", "createPerson", &variables, Some(&SequentialIds::default()))
        .unwrap();

    let data = execute_plan(&driver, &ctx, plan).await.unwrap();

    assert_eq!(data, json!({ "createPerson": { "id": "id-1", "name": "Ada" } }));
    assert_eq!(driver.statements.lock().unwrap().len(), 1);
}
