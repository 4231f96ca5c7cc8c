use super::*;

pub(crate) mod fields;
pub(crate) mod objects;
