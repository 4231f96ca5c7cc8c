//! Compiles the operations of an augmented schema into statements for the
//! graph database, and shapes what comes back into GraphQL response data.

pub mod compiler;
pub mod connector;
pub mod executor;
pub mod schema;

mod error;
mod id_generation;
mod plan;
mod reconcile;
mod statement;

pub use compiler::{CompiledMutation, MAX_NESTING_DEPTH, NestedAction, compile_mutation, strip_variable_prefix};
pub use connector::{ConnectorError, ConnectorResult, Driver, Record, Session};
pub use error::CoreError;
pub use executor::{execute_plan, run_statement};
pub use id_generation::{IdGenerator, IdStrategy, IndexConfig};
pub use plan::RequestPlan;
pub use reconcile::reconcile;
pub use schema::{
    ModelInfo, ModelMap, MutationAction, MutationInfo, MutationMap, SchemaCache, SchemaContext, SchemaContextRef,
};
pub use statement::{Statement, VARIABLES_PARAMETER};

pub type CoreResult<T> = Result<T, CoreError>;
