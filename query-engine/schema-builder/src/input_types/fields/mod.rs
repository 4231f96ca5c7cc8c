use super::*;

pub(crate) mod arguments;
pub(crate) mod field_filter_types;
