use async_trait::async_trait;
use indoc::indoc;
use pretty_assertions::assert_eq;
use query_core::{ConnectorResult, CoreResult, Driver, IdGenerator, IndexConfig, Record, SchemaCache, Session};
use request_handlers::{
    Binding, BindingConfig, HandlerError, Link, Operation, OperationKind, RequestContext, ResolveInfo,
    ResolverMap, ResolverOptions, build_resolvers, execute, register_idl,
};
use serde_json::{Map, Value, json};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

const TYPE_DEFS: &str = indoc! {r#"
    type Person @model {
      id: ID! @unique
      name: String
      friends: [Person] @relation(name: "KNOWS", direction: "OUT")
    }

    type Query {
      Person(name: String): [Person] @GraphBinding
      version: String
    }

    type Mutation {
      createPerson(data: PersonCreateInput!): Person @GraphBinding
      renamePerson(id: ID!, name: String): Person @cypher(statement: "MATCH (p: Person { id: $id }) SET p.name = $name RETURN p")
    }
"#};

#[derive(Default)]
struct Recorded {
    sessions: AtomicUsize,
    closed: AtomicUsize,
    statements: Mutex<Vec<(String, Map<String, Value>)>>,
}

struct StubDriver {
    recorded: Arc<Recorded>,
    response: Value,
}

struct StubSession {
    recorded: Arc<Recorded>,
    response: Value,
}

#[async_trait]
impl Driver for StubDriver {
    async fn session(&self) -> ConnectorResult<Box<dyn Session>> {
        self.recorded.sessions.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(StubSession {
            recorded: self.recorded.clone(),
            response: self.response.clone(),
        }))
    }
}

#[async_trait]
impl Session for StubSession {
    async fn run(&mut self, statement: &str, parameters: &Map<String, Value>) -> ConnectorResult<Vec<Record>> {
        self.recorded
            .statements
            .lock()
            .unwrap()
            .push((statement.to_owned(), parameters.clone()));

        Ok(vec![Record::from(self.response.clone())])
    }

    async fn close(&mut self) -> ConnectorResult<()> {
        self.recorded.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FixedId(&'static str);

impl IdGenerator for FixedId {
    fn generate(&self) -> CoreResult<String> {
        Ok(self.0.to_owned())
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn binding(response: Value, config: &BindingConfig) -> (Binding, Arc<Recorded>) {
    let recorded = Arc::new(Recorded::default());
    let driver = Arc::new(StubDriver {
        recorded: recorded.clone(),
        response,
    });

    let binding = Binding::new(TYPE_DEFS, driver, config, &SchemaCache::default()).unwrap();

    (binding, recorded)
}

#[tokio::test]
async fn generated_create_mutations_are_compiled_and_reconciled() {
    let config = BindingConfig {
        index_config: IndexConfig::custom(FixedId("p1")),
        ..Default::default()
    };

    let (binding, recorded) = binding(json!({ "Person": [{ "id": "p1", "name": "Ada" }] }), &config);

    let person = binding
        .mutation("createPerson", object(json!({ "data": { "name": "Ada" } })), Some("{ id name }"))
        .await
        .unwrap();

    assert_eq!(person, json!({ "id": "p1", "name": "Ada" }));

    let statements = recorded.statements.lock().unwrap();
    let (text, parameters) = &statements[0];

    assert!(text.starts_with("CALL graphql.execute('mutation createPerson($id: ID!, $name: String)"));
    assert_eq!(parameters["variables"], json!({ "name": "Ada", "id": "p1" }));
    assert_eq!(parameters["Person"], json!([{ "id": "p1" }]));
    assert_eq!(recorded.sessions.load(Ordering::SeqCst), 1);
    assert_eq!(recorded.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn other_mutations_are_passed_through() {
    let (binding, recorded) = binding(json!({ "renamePerson": { "name": "Bob" } }), &BindingConfig::default());

    let person = binding
        .mutation("renamePerson", object(json!({ "id": "p1", "name": "Bob" })), Some("{ name }"))
        .await
        .unwrap();

    assert_eq!(person, json!({ "name": "Bob" }));

    let statements = recorded.statements.lock().unwrap();
    let (text, parameters) = &statements[0];

    assert!(text.starts_with("CALL graphql.execute('mutation"));
    assert!(text.ends_with(", {_v0_id: {_v0_id}, _v1_name: {_v1_name}})"));
    assert_eq!(Value::Object(parameters.clone()), json!({ "_v0_id": "p1", "_v1_name": "Bob" }));
}

#[tokio::test]
async fn queries_are_interpreted_by_the_database() {
    let (binding, recorded) = binding(json!({ "Person": [{ "name": "Ada" }] }), &BindingConfig::default());

    let people = binding
        .query("Person", object(json!({ "name": "Ada" })), Some("{ name }"))
        .await
        .unwrap();

    assert_eq!(people, json!([{ "name": "Ada" }]));

    let statements = recorded.statements.lock().unwrap();
    assert!(statements[0].0.starts_with("CALL graphql.query('query"));
    assert!(statements[0].0.ends_with(", {_v0_name: {_v0_name}})"));
}

#[tokio::test]
async fn subscriptions_fail_before_a_session_is_opened() {
    let (binding, recorded) = binding(Value::Null, &BindingConfig::default());
    let operation = Operation::parse("subscription { personAdded { id } }", Map::new()).unwrap();

    let err = binding.link().request(&operation).await.unwrap_err();

    assert!(matches!(err, HandlerError::UnsupportedFeature { .. }));
    assert_eq!(recorded.sessions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn compile_errors_surface_in_the_response() {
    let (binding, recorded) = binding(Value::Null, &BindingConfig::default());
    let operation = Operation::parse(
        "mutation ($data: PersonCreateInput!) { createPerson(data: $data) { id } }",
        object(json!({ "data": "not an object" })),
    )
    .unwrap();

    let response = binding.link().handle(&operation).await;

    assert!(response.has_errors());
    assert!(response.data.is_empty());
    assert_eq!(recorded.sessions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_fields_are_missing_callables() {
    let (binding, _) = binding(Value::Null, &BindingConfig::default());

    let err = binding.mutation("deletePerson", Map::new(), None).await.unwrap_err();

    assert_eq!(err.to_string(), "The binding has no Mutation field named `deletePerson`.");
    assert!(!binding.has_field(OperationKind::Mutation, "deletePerson"));
}

#[tokio::test]
async fn execute_routes_by_parent_type() {
    let (binding, _) = binding(json!({ "Person": [] }), &BindingConfig::default());
    let mut ctx = RequestContext::new().with_binding("neo4j", Arc::new(binding));

    let people = execute(object(json!({})), &mut ctx, &ResolveInfo::new("Query", "Person").with_selection("{ id }"))
        .await
        .unwrap();

    assert_eq!(people, json!([]));
    assert_eq!(ctx.operation_name.as_deref(), Some("Person"));

    let err = execute(Map::new(), &mut ctx, &ResolveInfo::new("Subscription", "personAdded"))
        .await
        .unwrap_err();
    assert!(matches!(err, HandlerError::UnsupportedFeature { feature_name, .. } if feature_name == "Subscriptions"));

    let err = execute(Map::new(), &mut ctx, &ResolveInfo::new("Person", "name")).await.unwrap_err();
    assert!(matches!(err, HandlerError::UnsupportedFeature { .. }));
}

#[tokio::test]
async fn execute_needs_a_binding_on_the_context() {
    let err = execute(Map::new(), &mut RequestContext::new(), &ResolveInfo::new("Query", "Person"))
        .await
        .unwrap_err();

    assert!(matches!(err, HandlerError::MissingBinding(key) if key == "neo4j"));
}

#[test]
fn resolvers_delegate_bound_fields_only() {
    let resolvers = build_resolvers(TYPE_DEFS, &ResolverMap::new(), &ResolverOptions::default()).unwrap();

    let queries: Vec<_> = resolvers["Query"].keys().collect();
    let mutations: Vec<_> = resolvers["Mutation"].keys().collect();

    assert_eq!(queries, ["Person"]);
    assert_eq!(mutations, ["createPerson", "renamePerson"]);
}

#[test]
fn user_resolvers_are_kept_and_roots_can_be_switched_off() {
    let existing = build_resolvers(TYPE_DEFS, &ResolverMap::new(), &ResolverOptions::default()).unwrap();

    let options = ResolverOptions {
        query: false,
        ..Default::default()
    };

    let resolvers = build_resolvers(TYPE_DEFS, &existing, &options).unwrap();

    assert!(!resolvers.contains_key("Query"));
    assert!(resolvers["Mutation"].is_empty());
}

#[tokio::test]
async fn schemas_are_registered_in_one_call() {
    let recorded = Arc::new(Recorded::default());
    let driver = StubDriver {
        recorded: recorded.clone(),
        response: json!("OK"),
    };

    let result = register_idl(&driver, TYPE_DEFS).await.unwrap();

    assert_eq!(result, json!("OK"));

    let statements = recorded.statements.lock().unwrap();
    assert_eq!(statements[0].0, "CALL graphql.idl({schema})");
    assert!(statements[0].1["schema"].as_str().unwrap().contains("type Person @model"));
    assert_eq!(recorded.closed.load(Ordering::SeqCst), 1);
}

#[test]
fn links_plan_without_running() {
    let (binding, recorded) = binding(Value::Null, &BindingConfig::default());
    let link: &Link = binding.link();

    let operation = Operation::parse("{ version }", Map::new()).unwrap();
    let plan = link.plan(&operation).unwrap();

    assert!(plan.statement().text.starts_with("CALL graphql.query("));
    assert_eq!(recorded.sessions.load(Ordering::SeqCst), 0);
}
