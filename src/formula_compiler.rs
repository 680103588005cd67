//! Combines rendered condition fragments into a single encoded formula,
//! honoring AND-before-OR precedence.
//!
//! ```text
//! compile([A, and B, or C, and D])
//!   ├─ render each condition through the operator registry
//!   ├─ accumulate consecutive and-joined fragments: [A, B] | [C, D]
//!   ├─ close each group pairwise:  AND(A,B)  AND(C,D)
//!   └─ fold the groups:            OR(AND(A,B),AND(C,D))
//! ```
//!
//! Fragments arrive already percent-encoded, so groups are joined with the
//! literal `%2C` token and the `AND(`/`OR(`/`)` glue stays unencoded.

use crate::condition::{FilterCondition, LogicalOperator, Operator};
use crate::field::FieldType;
use crate::operations;
use log::warn;
use thiserror::Error;

/// Encoded comma joining two already-encoded fragments.
const ENCODED_COMMA: &str = "%2C";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("field type '{0}' does not support filtering")]
    UnsupportedFieldType(FieldType),
    #[error("operator '{operator}' is not valid for field type '{field_type}'")]
    InvalidOperator {
        field_type: FieldType,
        operator: Operator,
    },
    #[error("field name {0:?} contains '}}' and cannot be referenced in a formula")]
    InvalidFieldName(String),
    #[error("condition {index} joins earlier conditions but carries no logical operator")]
    MissingLogicalOperator { index: usize },
}

/// A condition excluded from the compiled formula because its value did not
/// have the shape its operator expects.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedCondition {
    pub index: usize,
    pub field_name: String,
    pub operation: Operator,
}

/// Result of compiling a condition list.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileResult {
    /// Percent-encoded formula, usable directly as the record-query filter
    /// parameter value. Empty when no condition survived; callers must omit
    /// the parameter instead of sending an empty filter.
    pub formula: String,
    /// Conditions dropped for value-shape mismatches, in input order.
    pub dropped: Vec<DroppedCondition>,
}

/// Render a single condition into its percent-encoded fragment.
///
/// Fails when the field type cannot be filtered, the operator is not
/// registered for the type, or the field name would break `{...}` reference
/// syntax. A shape-mismatched value yields an empty fragment; [`compile`]
/// drops such conditions.
pub fn render_condition(condition: &FilterCondition) -> Result<String, CompileError> {
    let field = &condition.field;
    if field.name.contains('}') {
        return Err(CompileError::InvalidFieldName(field.name.clone()));
    }
    let Some(render) = operations::render_fn(field.field_type, condition.operation) else {
        if operations::is_filterable(field.field_type) {
            return Err(CompileError::InvalidOperator {
                field_type: field.field_type,
                operator: condition.operation,
            });
        }
        return Err(CompileError::UnsupportedFieldType(field.field_type));
    };
    Ok(render(field, condition.value.as_ref()))
}

/// Compile an ordered condition list into one encoded formula.
///
/// Consecutive `and`-joined conditions accumulate into AND-groups; each `or`
/// closes the current group and starts a new one. Groups and the final OR
/// combination reduce pairwise, so three AND'd members become
/// `AND(AND(a,b),c)`. A single surviving condition is returned bare, and an
/// empty list compiles to the empty string.
pub fn compile(conditions: &[FilterCondition]) -> Result<CompileResult, CompileError> {
    for (index, condition) in conditions.iter().enumerate().skip(1) {
        if condition.logical_operator.is_none() {
            return Err(CompileError::MissingLogicalOperator { index });
        }
    }

    let mut dropped = Vec::new();
    let mut rendered = Vec::new();
    for (index, condition) in conditions.iter().enumerate() {
        let fragment = render_condition(condition)?;
        if fragment.is_empty() {
            warn!(
                "dropping condition {} on field {:?}: value shape does not match operator '{}'",
                index, condition.field.name, condition.operation
            );
            dropped.push(DroppedCondition {
                index,
                field_name: condition.field.name.clone(),
                operation: condition.operation,
            });
        } else {
            rendered.push((condition.logical_operator, fragment));
        }
    }

    // The first surviving condition heads the first AND-group; its own
    // logical operator is ignored.
    let Some(((_, first), rest)) = rendered.split_first() else {
        return Ok(CompileResult {
            formula: String::new(),
            dropped,
        });
    };

    let mut or_groups: Vec<String> = Vec::new();
    let mut current_and_group: Vec<String> = vec![first.clone()];
    for (logical_operator, fragment) in rest {
        match logical_operator {
            Some(LogicalOperator::And) => current_and_group.push(fragment.clone()),
            Some(LogicalOperator::Or) | None => {
                or_groups.push(build_and_group(current_and_group));
                current_and_group = vec![fragment.clone()];
            }
        }
    }
    or_groups.push(build_and_group(current_and_group));

    Ok(CompileResult {
        formula: build_or_group(or_groups),
        dropped,
    })
}

/// Reduce fragments into a pairwise `AND(AND(a,b),c)` chain; a single
/// fragment stays unwrapped.
fn build_and_group(fragments: Vec<String>) -> String {
    fragments
        .into_iter()
        .reduce(|acc, fragment| format!("AND({acc}{ENCODED_COMMA}{fragment})"))
        .unwrap_or_default()
}

fn build_or_group(groups: Vec<String>) -> String {
    groups
        .into_iter()
        .reduce(|acc, group| format!("OR({acc}{ENCODED_COMMA}{group})"))
        .unwrap_or_default()
}
