//! Everything between a GraphQL server and the query core: parsing operations,
//! the link that plans and runs them, the binding resolvers delegate to, and
//! schema registration on the database side.

mod binding;
mod config;
mod error;
mod idl;
mod link;
mod operation;
mod resolvers;
mod response;

pub use binding::Binding;
pub use config::{BindingConfig, DEFAULT_BINDING_KEY, ResolverOptions};
pub use error::HandlerError;
pub use idl::{one_line_cypher_statements, register_idl};
pub use link::{Link, plan_operation};
pub use operation::{Operation, OperationKind};
pub use resolvers::{DelegatingResolver, RequestContext, ResolveInfo, Resolver, ResolverMap, build_resolvers, execute};
pub use response::{GQLError, GQLResponse};

pub type Result<T> = std::result::Result<T, HandlerError>;
