//! Constructors for synthesized AST nodes. Generated nodes carry a default position.

use crate::ast::{
    Directive, EnumType, EnumValue, Field, InputObjectType, InputValue, ObjectType, Pos, Type, Value,
};

pub fn pos() -> Pos {
    Pos { line: 1, column: 1 }
}

pub fn named<'a>(name: impl Into<String>) -> Type<'a> {
    Type::NamedType(name.into())
}

pub fn list(inner: Type<'_>) -> Type<'_> {
    Type::ListType(Box::new(inner))
}

pub fn non_null(inner: Type<'_>) -> Type<'_> {
    Type::NonNullType(Box::new(inner))
}

/// `[T!]`
pub fn list_of_non_null<'a>(name: impl Into<String>) -> Type<'a> {
    list(non_null(named(name)))
}

pub fn directive<'a>(name: &str) -> Directive<'a> {
    Directive {
        position: pos(),
        name: name.to_owned(),
        arguments: Vec::new(),
    }
}

/// A directive with a single string argument, e.g. `@cypher(statement: "...")`.
pub fn string_directive<'a>(name: &str, argument: &str, value: impl Into<String>) -> Directive<'a> {
    Directive {
        position: pos(),
        name: name.to_owned(),
        arguments: vec![(argument.to_owned(), Value::String(value.into()))],
    }
}

pub fn input_value<'a>(name: impl Into<String>, value_type: Type<'a>) -> InputValue<'a> {
    InputValue {
        position: pos(),
        description: None,
        name: name.into(),
        value_type,
        default_value: None,
        directives: Vec::new(),
    }
}

pub fn field<'a>(name: impl Into<String>, arguments: Vec<InputValue<'a>>, field_type: Type<'a>) -> Field<'a> {
    Field {
        position: pos(),
        description: None,
        name: name.into(),
        arguments,
        field_type,
        directives: Vec::new(),
    }
}

pub fn enum_value<'a>(name: impl Into<String>) -> EnumValue<'a> {
    EnumValue::new(name.into())
}

pub fn object_type<'a>(name: impl Into<String>) -> ObjectType<'a> {
    ObjectType::new(name.into())
}

pub fn input_object<'a>(name: impl Into<String>, fields: Vec<InputValue<'a>>) -> InputObjectType<'a> {
    let mut input = InputObjectType::new(name.into());
    input.fields = fields;
    input
}

pub fn enum_type<'a>(name: impl Into<String>, values: Vec<EnumValue<'a>>) -> EnumType<'a> {
    let mut enum_type = EnumType::new(name.into());
    enum_type.values = values;
    enum_type
}
