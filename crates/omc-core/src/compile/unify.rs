//! Return-type unification across success responses.
//!
//! Each candidate grows an ancestor stack (candidate at the bottom, the
//! generic object ceiling on top); popping all stacks in lock-step while
//! the popped values agree yields the most specific common type.

use crate::model::types::ModelType;
use crate::registry::TypeRegistry;

/// Reduce the per-success-response candidate types to one return-type body.
/// Zero candidates mean "no body"; a single candidate is returned as-is
/// without walking its ancestors.
pub fn unify_return_type(candidates: &[ModelType], registry: &TypeRegistry) -> Option<ModelType> {
    match candidates {
        [] => None,
        [single] => Some(single.clone()),
        many => Some(unify_many(many, registry)),
    }
}

fn unify_many(candidates: &[ModelType], registry: &TypeRegistry) -> ModelType {
    let mut stacks: Vec<Vec<ModelType>> = candidates
        .iter()
        .map(|candidate| ancestor_stack(candidate, registry))
        .collect();

    let mut best: Option<ModelType> = None;
    loop {
        let mut popped: Vec<ModelType> = Vec::with_capacity(stacks.len());
        for stack in &mut stacks {
            match stack.pop() {
                Some(ty) => popped.push(ty),
                None => return best.unwrap_or_else(ModelType::object),
            }
        }

        let first = &popped[0];
        if popped[1..].iter().all(|ty| ty.structurally_equal(first)) {
            best = Some(first.clone());
        } else {
            return best.unwrap_or_else(ModelType::object);
        }
    }
}

/// Walk a candidate's declared base chain, most specific first, then cap
/// the stack with the generic object ceiling. A cycle in the chain stops
/// the walk at the first revisit.
fn ancestor_stack(candidate: &ModelType, registry: &TypeRegistry) -> Vec<ModelType> {
    let mut stack = vec![candidate.clone()];

    if let ModelType::Composite(composite) = candidate {
        let mut visited = vec![composite.name.clone()];
        let mut current = composite.name.clone();
        while let Some(base) = registry.base_type_of(&current) {
            if visited.iter().any(|seen| seen == base) {
                break;
            }
            let Some(ancestor) = registry.composite(base) else {
                break;
            };
            visited.push(base.to_string());
            stack.push(ModelType::Composite(ancestor.clone()));
            current = base.to_string();
        }
    }

    if stack.last().is_none_or(|top| !top.is_object()) {
        stack.push(ModelType::object());
    }
    stack
}
