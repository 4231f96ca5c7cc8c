use crate::{CoreError, CoreResult, MutationAction};
use serde_json::{Map, Value};

const DATA: &str = "data";

/// Removes the `_<tag>_` prefix request pipelines put on variable names to keep
/// batched operations apart: `_v0_data` -> `data`. Names without such a prefix are
/// returned unchanged.
pub fn strip_variable_prefix(name: &str) -> &str {
    let Some(rest) = name.strip_prefix('_') else {
        return name;
    };

    match rest.split_once('_') {
        Some((tag, logical))
            if !tag.is_empty() && !logical.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            logical
        }
        _ => name,
    }
}

/// Recovers the logical arguments of a generated mutation. A create mutation
/// yields the object under `data`.
pub(super) fn prepare_arguments(action: MutationAction, variables: &Map<String, Value>) -> CoreResult<Map<String, Value>> {
    let mut prepared: Map<String, Value> = variables
        .iter()
        .map(|(name, value)| (strip_variable_prefix(name).to_owned(), value.clone()))
        .collect();

    match action {
        MutationAction::Create => match prepared.remove(DATA) {
            Some(Value::Object(data)) => Ok(data),
            Some(_) | None => Err(CoreError::invalid_arguments(
                "a create mutation expects its `data` argument to be an object",
            )),
        },
        MutationAction::Add => Ok(prepared),
    }
}
