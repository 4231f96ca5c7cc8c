use super::*;

pub(crate) mod mutation_type;
pub(crate) mod objects;
pub(crate) mod query_type;
pub(crate) mod schema_definition;
