//! Helpers over a parsed GraphQL type definition document.
//!
//! The document itself is the `graphql-parser` schema AST, which is already a
//! tagged tree (`Definition`, `TypeDefinition`, `Type`, `Value`, ...). This crate
//! adds what every consumer of an annotated schema needs on top of it:
//!
//! - Directive vocabulary (`@model`, `@relation`, `@unique`, `@cypher`) and queries
//!   over it ([`fields`], [`directives`]).
//! - Indexes of the document by type name, remembering each definition's position
//!   so later passes can splice in place ([`maps`]).
//! - The generated name templates shared by schema augmentation and mutation
//!   compilation ([`names`]).
//! - Constructors for the AST nodes the augmentation synthesizes ([`builders`]).

pub mod builders;
pub mod directives;
pub mod fields;
pub mod maps;
pub mod names;

mod error;

pub use error::{SchemaError, SchemaResult};
pub use maps::{DefinitionRef, ModelEntry, OperationFields, OperationMaps, TypeMaps, build_operation_maps, build_type_maps};

/// Type aliases over the `graphql-parser` schema AST, fixed to owned `String` text.
pub mod ast {
    use graphql_parser::schema;

    pub use graphql_parser::Pos;

    pub type Document<'a> = schema::Document<'a, String>;
    pub type Definition<'a> = schema::Definition<'a, String>;
    pub type TypeDefinition<'a> = schema::TypeDefinition<'a, String>;
    pub type SchemaDefinition<'a> = schema::SchemaDefinition<'a, String>;
    pub type ObjectType<'a> = schema::ObjectType<'a, String>;
    pub type InputObjectType<'a> = schema::InputObjectType<'a, String>;
    pub type EnumType<'a> = schema::EnumType<'a, String>;
    pub type EnumValue<'a> = schema::EnumValue<'a, String>;
    pub type Field<'a> = schema::Field<'a, String>;
    pub type InputValue<'a> = schema::InputValue<'a, String>;
    pub type Directive<'a> = schema::Directive<'a, String>;
    pub type Type<'a> = schema::Type<'a, String>;
    pub type Value<'a> = schema::Value<'a, String>;
}

/// Parses schema definition language text into a document.
pub fn parse_type_defs(type_defs: &str) -> SchemaResult<ast::Document<'_>> {
    Ok(graphql_parser::schema::parse_schema::<String>(type_defs)?)
}

/// Serializes a document back to schema definition language text.
pub fn print_type_defs(document: &ast::Document<'_>) -> String {
    document.to_string()
}

/// Returns the object type definition at the given top-level position, if that
/// definition is an object type.
pub fn object_type_at<'d, 'a>(document: &'d ast::Document<'a>, index: usize) -> Option<&'d ast::ObjectType<'a>> {
    match document.definitions.get(index)? {
        ast::Definition::TypeDefinition(ast::TypeDefinition::Object(object)) => Some(object),
        _ => None,
    }
}

pub fn object_type_at_mut<'d, 'a>(
    document: &'d mut ast::Document<'a>,
    index: usize,
) -> Option<&'d mut ast::ObjectType<'a>> {
    match document.definitions.get_mut(index)? {
        ast::Definition::TypeDefinition(ast::TypeDefinition::Object(object)) => Some(object),
        _ => None,
    }
}

/// Name of a top-level definition, if it declares a named type.
pub fn definition_name<'d>(definition: &'d ast::Definition<'_>) -> Option<&'d str> {
    match definition {
        ast::Definition::TypeDefinition(def) => Some(type_definition_name(def)),
        ast::Definition::SchemaDefinition(_)
        | ast::Definition::TypeExtension(_)
        | ast::Definition::DirectiveDefinition(_) => None,
    }
}

pub fn type_definition_name<'d>(definition: &'d ast::TypeDefinition<'_>) -> &'d str {
    match definition {
        ast::TypeDefinition::Scalar(def) => def.name.as_str(),
        ast::TypeDefinition::Object(def) => def.name.as_str(),
        ast::TypeDefinition::Interface(def) => def.name.as_str(),
        ast::TypeDefinition::Union(def) => def.name.as_str(),
        ast::TypeDefinition::Enum(def) => def.name.as_str(),
        ast::TypeDefinition::InputObject(def) => def.name.as_str(),
    }
}
