use crate::{
    ast::{Directive, Field, InputValue, ObjectType, Type, Value},
    directives::{self, RelationInfo},
};
use std::fmt::Write;

/// Internal node id exposed on local model types. Never user data.
pub const INTERNAL_ID: &str = "_id";
pub const ID: &str = "id";

/// Unwraps list and non-null wrappers down to the named type.
pub fn named_type<'t>(ty: &'t Type<'_>) -> &'t str {
    match ty {
        Type::NamedType(name) => name.as_str(),
        Type::ListType(inner) | Type::NonNullType(inner) => named_type(inner),
    }
}

/// True if any wrapper on the way to the named type is a list.
pub fn is_list_type(ty: &Type<'_>) -> bool {
    match ty {
        Type::NamedType(_) => false,
        Type::ListType(_) => true,
        Type::NonNullType(inner) => is_list_type(inner),
    }
}

/// Drops the outermost non-null wrapper, leaving inner wrappers untouched.
pub fn strip_non_null<'a>(ty: &Type<'a>) -> Type<'a> {
    match ty {
        Type::NonNullType(inner) => (**inner).clone(),
        other => other.clone(),
    }
}

/// Collapses `[[T]]` to `[T]`. Other shapes are returned as they are.
pub fn reduce_nested_list<'a>(ty: &Type<'a>) -> Type<'a> {
    match ty {
        Type::ListType(inner) if matches!(**inner, Type::ListType(_)) => {
            Type::ListType(Box::new(Type::NamedType(named_type(ty).to_owned())))
        }
        other => other.clone(),
    }
}

pub fn has_directive(directives: &[Directive<'_>], name: &str) -> bool {
    find_directive(directives, name).is_some()
}

pub fn find_directive<'d, 'a>(directives: &'d [Directive<'a>], name: &str) -> Option<&'d Directive<'a>> {
    directives.iter().find(|d| d.name == name)
}

pub fn is_model(object: &ObjectType<'_>) -> bool {
    has_directive(&object.directives, directives::MODEL)
}

pub fn is_relation_field(field: &Field<'_>) -> bool {
    has_directive(&field.directives, directives::RELATION)
}

/// Fields resolved by an embedded `@cypher` statement are never stored.
pub fn is_computed_field(field: &Field<'_>) -> bool {
    has_directive(&field.directives, directives::CYPHER)
}

pub fn is_unique_field(field: &Field<'_>) -> bool {
    field.name == ID || has_unique_directive(field)
}

pub fn has_unique_directive(field: &Field<'_>) -> bool {
    has_directive(&field.directives, directives::UNIQUE) || has_directive(&field.directives, directives::IS_UNIQUE)
}

/// A scalar value stored on the node: not a relation, not computed, not the internal id.
pub fn is_persisted_property(field: &Field<'_>) -> bool {
    !is_relation_field(field) && !is_computed_field(field) && field.name != INTERNAL_ID
}

pub fn relation_info(field: &Field<'_>) -> Option<RelationInfo> {
    find_directive(&field.directives, directives::RELATION).map(RelationInfo::from_directive)
}

pub fn field_type_name<'f>(field: &'f Field<'_>) -> &'f str {
    named_type(&field.field_type)
}

pub fn render_type(ty: &Type<'_>) -> String {
    match ty {
        Type::NamedType(name) => name.clone(),
        Type::ListType(inner) => format!("[{}]", render_type(inner)),
        Type::NonNullType(inner) => format!("{}!", render_type(inner)),
    }
}

pub fn render_value(value: &Value<'_>) -> String {
    match value {
        Value::Variable(name) => format!("${name}"),
        Value::Int(number) => number.as_i64().map(|n| n.to_string()).unwrap_or_default(),
        Value::Float(float) => float.to_string(),
        Value::String(s) => quote_string(s),
        Value::Boolean(b) => b.to_string(),
        Value::Null => "null".to_owned(),
        Value::Enum(name) => name.clone(),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(name, value)| format!("{name}: {}", render_value(value)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

pub fn render_directives(directives: &[Directive<'_>]) -> String {
    let mut out = String::new();

    for directive in directives {
        let _ = write!(out, " @{}", directive.name);

        if !directive.arguments.is_empty() {
            let arguments: Vec<String> = directive
                .arguments
                .iter()
                .map(|(name, value)| format!("{name}: {}", render_value(value)))
                .collect();

            let _ = write!(out, "({})", arguments.join(", "));
        }
    }

    out
}

pub fn render_input_value(value: &InputValue<'_>) -> String {
    let mut out = format!("{}: {}", value.name, render_type(&value.value_type));

    if let Some(default) = &value.default_value {
        let _ = write!(out, " = {}", render_value(default));
    }

    out.push_str(&render_directives(&value.directives));
    out
}

/// Single-line rendering of a field definition, e.g. `id: ID! @unique`.
pub fn render_field(field: &Field<'_>) -> String {
    let mut out = field.name.clone();

    if !field.arguments.is_empty() {
        let arguments: Vec<String> = field.arguments.iter().map(render_input_value).collect();
        let _ = write!(out, "({})", arguments.join(", "));
    }

    let _ = write!(out, ": {}", render_type(&field.field_type));
    out.push_str(&render_directives(&field.directives));
    out
}

fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');

    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }

    out.push('"');
    out
}
