//! Directive vocabulary understood by the augmentation and the compiler.

use crate::ast::{Directive, Value};
use std::fmt;

/// Marks an object type as a persisted graph node.
pub const MODEL: &str = "model";
/// Marks a field as an edge to another model: `@relation(name: String, direction: IN | OUT | BOTH)`.
pub const RELATION: &str = "relation";
pub const UNIQUE: &str = "unique";
pub const IS_UNIQUE: &str = "isUnique";
/// Computed field or embedded native statement: `@cypher(statement: String)`.
pub const CYPHER: &str = "cypher";
/// Placed on every generated operation field that is resolved by delegating to the binding.
pub const BINDING: &str = "GraphBinding";

pub const STATEMENT_ARGUMENT: &str = "statement";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationDirection {
    In,
    Out,
    Both,
}

impl RelationDirection {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "IN" => Some(Self::In),
            "OUT" => Some(Self::Out),
            "BOTH" => Some(Self::Both),
            _ => None,
        }
    }
}

impl fmt::Display for RelationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => f.write_str("IN"),
            Self::Out => f.write_str("OUT"),
            Self::Both => f.write_str("BOTH"),
        }
    }
}

/// Arguments of a `@relation` directive. Both are optional in the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationInfo {
    pub name: Option<String>,
    pub direction: Option<RelationDirection>,
}

impl RelationInfo {
    pub fn from_directive(directive: &Directive<'_>) -> Self {
        let mut info = Self::default();

        for (name, value) in &directive.arguments {
            match (name.as_str(), value) {
                ("name", Value::String(s)) | ("name", Value::Enum(s)) => info.name = Some(s.clone()),
                ("direction", Value::String(s)) | ("direction", Value::Enum(s)) => {
                    info.direction = RelationDirection::from_str(s)
                }
                _ => (),
            }
        }

        info
    }
}
