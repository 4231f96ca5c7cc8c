use super::*;

pub(crate) mod create_objects;
pub(crate) mod filter_objects;
pub(crate) mod nested_objects;
