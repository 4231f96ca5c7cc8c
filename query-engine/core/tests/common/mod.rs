#![allow(dead_code)]

use indoc::indoc;
use query_core::{CoreResult, IdGenerator, SchemaContext};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TYPE_DEFS: &str = indoc! {r#"
    type Person @model {
      id: ID! @unique
      name: String!
      email: String @unique
      employer: Company @relation(name: "WORKS_AT", direction: "OUT")
      friends: [Person] @relation(name: "KNOWS", direction: "OUT")
      child: Person @relation(name: "PARENT_OF", direction: "OUT")
      rank: Int @cypher(statement: "RETURN 1")
    }

    type Company @model {
      id: ID! @unique
      title: String
    }

    type Mutation {
      createPerson(data: PersonCreateInput!): Person @GraphBinding
      createCompany(data: CompanyCreateInput!): Company @GraphBinding
      addPersonFriends(where: PersonWhereUniqueInput!, friends: [PersonWhereUniqueInput!]!): Person @GraphBinding
      deletePerson(id: ID!): Person
    }
"#};

pub fn context() -> SchemaContext {
    SchemaContext::from_type_defs(TYPE_DEFS).unwrap()
}

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

/// Hands out `id-1`, `id-2`, ... in call order.
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> CoreResult<String> {
        Ok(format!("id-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1))
    }
}
