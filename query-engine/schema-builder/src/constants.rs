pub mod args {
    pub const FILTER: &str = "filter";
    pub const ORDER_BY: &str = "orderBy";
    pub const FIRST: &str = "first";
    pub const OFFSET: &str = "offset";
    pub const INTERNAL_ID: &str = "_id";
    pub const INTERNAL_IDS: &str = "_ids";
    pub const DATA: &str = "data";
    pub const WHERE: &str = "where";
}

pub mod inputs {
    pub const CREATE: &str = "create";
    pub const CONNECT: &str = "connect";
}

pub mod filters {
    pub const AND: &str = "AND";
    pub const OR: &str = "OR";

    /// Suffixes for filters on a relation field. All take the related model's filter input.
    pub const RELATION: &[&str] = &["", "_not", "_in", "_not_in", "_some", "_none", "_single", "_every"];

    pub const NOT: &str = "_not";
    pub const IN: &str = "_in";
    pub const NOT_IN: &str = "_not_in";

    /// Comparison and string pattern suffixes on a scalar field, after `_in`/`_not_in`.
    pub const SCALAR_COMPARISONS: &[&str] = &[
        "_lt",
        "_lte",
        "_gt",
        "_gte",
        "_contains",
        "_not_contains",
        "_starts_with",
        "_not_starts_with",
        "_ends_with",
        "_not_ends_with",
    ];
}

pub mod ordering {
    pub const ASC: &str = "_asc";
    pub const DESC: &str = "_desc";
}

pub mod scalars {
    pub const INT: &str = "Int";
    pub const ID: &str = "ID";
    pub const BOOLEAN: &str = "Boolean";
}
