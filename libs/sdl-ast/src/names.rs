//! Name templates for everything the augmentation generates.
//!
//! The compiler looks generated mutations and input types up by these same names,
//! so both sides must go through this module.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    One,
    Many,
}

impl Arity {
    pub fn of(is_list: bool) -> Self {
        if is_list { Self::Many } else { Self::One }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => f.write_str("One"),
            Self::Many => f.write_str("Many"),
        }
    }
}

/// Uppercases the first character: `friends` -> `Friends`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `create<Model>`
pub fn create_mutation(model: &str) -> String {
    format!("create{model}")
}

/// `add<Model><Field>`
pub fn relation_mutation(model: &str, field: &str) -> String {
    format!("add{model}{}", capitalize(field))
}

/// `<Model>CreateInput`
pub fn create_input(model: &str) -> String {
    format!("{model}CreateInput")
}

/// `<Model>WhereUniqueInput`
pub fn where_unique_input(model: &str) -> String {
    format!("{model}WhereUniqueInput")
}

/// `<Model>Create<One|Many>Input`
pub fn create_nested_input(model: &str, arity: Arity) -> String {
    format!("{model}Create{arity}Input")
}

/// `<Model>Connect<One|Many>Input`
pub fn connect_nested_input(model: &str, arity: Arity) -> String {
    format!("{model}Connect{arity}Input")
}

/// `_<Model>Filter`
pub fn filter_type(model: &str) -> String {
    format!("_{model}Filter")
}

/// `_<Model>Ordering`
pub fn ordering_type(model: &str) -> String {
    format!("_{model}Ordering")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("friends"), "Friends");
        assert_eq!(capitalize("élan"), "Élan");
    }

    #[test]
    fn nested_input_names() {
        assert_eq!(create_nested_input("Person", Arity::of(true)), "PersonCreateManyInput");
        assert_eq!(connect_nested_input("Person", Arity::of(false)), "PersonConnectOneInput");
        assert_eq!(relation_mutation("Person", "friends"), "addPersonFriends");
    }
}
