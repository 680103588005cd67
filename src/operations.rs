//! Operator registry and per-operator fragment rendering.
//!
//! Each supported (field type, operator) pair maps to a render function that
//! turns one condition into a percent-encoded formula fragment. Only field
//! types with at least one registered operator can be filtered on; adding a
//! new type or operator means adding a registry arm and a render function,
//! nothing else changes.

use crate::condition::Operator;
use crate::field::{Field, FieldType};
use log::warn;
use serde_json::Value;

/// Renders one condition into a percent-encoded formula fragment.
///
/// Returns an empty string when `value` does not have the shape the operator
/// expects; callers must drop the condition rather than emit the fragment.
pub type RenderFn = fn(&Field, Option<&Value>) -> String;

const TEXT_OPERATORS: &[Operator] = &[Operator::Is, Operator::IsNot];
const NUMBER_OPERATORS: &[Operator] = &[Operator::Is, Operator::IsNot];
const LINK_OPERATORS: &[Operator] = &[Operator::Contains, Operator::DoesNotContain];

/// Look up the render function registered for a field type / operator pair.
pub fn render_fn(field_type: FieldType, operator: Operator) -> Option<RenderFn> {
    use FieldType::*;
    match (field_type, operator) {
        (
            SingleLineText | Email | Url | MultilineText | PhoneNumber | SingleSelect,
            Operator::Is,
        ) => Some(text_is),
        (
            SingleLineText | Email | Url | MultilineText | PhoneNumber | SingleSelect,
            Operator::IsNot,
        ) => Some(text_is_not),
        (Number | Currency | Percent | Rating, Operator::Is) => Some(number_is),
        (Number | Currency | Percent | Rating, Operator::IsNot) => Some(number_is_not),
        (MultipleRecordLinks, Operator::Contains) => Some(link_contains),
        (MultipleRecordLinks, Operator::DoesNotContain) => Some(link_does_not_contain),
        _ => None,
    }
}

/// Operator keys registered for `field_type`; empty when the type cannot be
/// filtered on. Types unknown to filtering are not an error.
pub fn valid_operations(field_type: FieldType) -> &'static [Operator] {
    use FieldType::*;
    match field_type {
        SingleLineText | Email | Url | MultilineText | PhoneNumber | SingleSelect => TEXT_OPERATORS,
        Number | Currency | Percent | Rating => NUMBER_OPERATORS,
        MultipleRecordLinks => LINK_OPERATORS,
        _ => &[],
    }
}

/// True iff at least one operator is registered for `field_type`.
pub fn is_filterable(field_type: FieldType) -> bool {
    !valid_operations(field_type).is_empty()
}

/// Human-readable form of an operator key; unrecognized keys pass through
/// unchanged.
pub fn format_operator(operator: &str) -> String {
    operator
        .parse::<Operator>()
        .map(|op| op.label().to_string())
        .unwrap_or_else(|_| operator.to_string())
}

/// Encode a fragment as one unit so fragments can later be combined without
/// double-encoding.
fn encode_fragment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn escape_single_quotes(text: &str) -> String {
    text.replace('\'', "\\'")
}

/// `{Name} = 'value'`, single quotes in the value backslash-escaped.
fn text_is(field: &Field, value: Option<&Value>) -> String {
    let Some(text) = value.and_then(Value::as_str) else {
        warn!(
            "operator 'is' on field {:?} needs a string value, dropping condition",
            field.name
        );
        return String::new();
    };
    encode_fragment(&format!(
        "{{{}}} = '{}'",
        field.name,
        escape_single_quotes(text)
    ))
}

fn text_is_not(field: &Field, value: Option<&Value>) -> String {
    let Some(text) = value.and_then(Value::as_str) else {
        warn!(
            "operator 'isNot' on field {:?} needs a string value, dropping condition",
            field.name
        );
        return String::new();
    };
    encode_fragment(&format!(
        "NOT({{{}}} = '{}')",
        field.name,
        escape_single_quotes(text)
    ))
}

/// `{Name} = 5`, the JSON number rendered verbatim.
fn number_is(field: &Field, value: Option<&Value>) -> String {
    let Some(Value::Number(number)) = value else {
        warn!(
            "operator 'is' on field {:?} needs a numeric value, dropping condition",
            field.name
        );
        return String::new();
    };
    encode_fragment(&format!("{{{}}} = {}", field.name, number))
}

fn number_is_not(field: &Field, value: Option<&Value>) -> String {
    let Some(Value::Number(number)) = value else {
        warn!(
            "operator 'isNot' on field {:?} needs a numeric value, dropping condition",
            field.name
        );
        return String::new();
    };
    encode_fragment(&format!("NOT({{{}}} = {})", field.name, number))
}

/// `FIND("token",ARRAYJOIN({Name},","))` is truthy when `token` appears in
/// the comma-joined display values of the linked records. The linked field is
/// multi-valued, but the searched token must be a single string.
fn link_contains(field: &Field, value: Option<&Value>) -> String {
    let Some(token) = value.and_then(Value::as_str) else {
        warn!(
            "operator 'contains' on field {:?} needs a single record token, dropping condition",
            field.name
        );
        return String::new();
    };
    encode_fragment(&format!(
        "FIND(\"{}\",ARRAYJOIN({{{}}},\",\"))",
        token, field.name
    ))
}

fn link_does_not_contain(field: &Field, value: Option<&Value>) -> String {
    let Some(token) = value.and_then(Value::as_str) else {
        warn!(
            "operator 'doesNotContain' on field {:?} needs a single record token, dropping condition",
            field.name
        );
        return String::new();
    };
    encode_fragment(&format!(
        "NOT(FIND(\"{}\",ARRAYJOIN({{{}}},\",\")))",
        token, field.name
    ))
}
