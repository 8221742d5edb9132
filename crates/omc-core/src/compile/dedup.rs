//! Parameter name reconciliation, run before any type building.

use crate::model::operation::{ParamLocation, ParameterSpec};

const BODY_SUFFIX: &str = "Body";

/// Resolve name collisions among declared parameters, returning a new list.
///
/// A body parameter colliding case-insensitively with any non-body
/// parameter is renamed by appending `Body` until the collision clears
/// (each pass strictly lengthens the name, so the loop terminates). A query
/// parameter sharing a name with a path parameter is forced required.
pub fn dedup_parameters(parameters: &[ParameterSpec]) -> Vec<ParameterSpec> {
    let non_body: Vec<String> = parameters
        .iter()
        .filter(|p| p.location != ParamLocation::Body)
        .map(|p| p.name.to_ascii_lowercase())
        .collect();
    let path: Vec<String> = parameters
        .iter()
        .filter(|p| p.location == ParamLocation::Path)
        .map(|p| p.name.to_ascii_lowercase())
        .collect();

    let mut deduped = parameters.to_vec();
    for param in &mut deduped {
        match param.location {
            ParamLocation::Body => {
                while non_body.contains(&param.name.to_ascii_lowercase()) {
                    param.name.push_str(BODY_SUFFIX);
                }
            }
            ParamLocation::Query => {
                if path.contains(&param.name.to_ascii_lowercase()) {
                    param.required = true;
                }
            }
            ParamLocation::Path | ParamLocation::Header => {}
        }
    }
    deduped
}
