use super::*;

pub(crate) mod model;
