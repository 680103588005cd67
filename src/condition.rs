//! The filter condition model accepted from form clients.

use crate::field::Field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A filter operator key, as sent in condition payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Is,
    IsNot,
    Contains,
    DoesNotContain,
}

impl Operator {
    /// Every known operator key.
    pub const ALL: &'static [Operator] = &[
        Operator::Is,
        Operator::IsNot,
        Operator::Contains,
        Operator::DoesNotContain,
    ];

    /// The wire key used in condition payloads.
    pub fn key(&self) -> &'static str {
        match self {
            Operator::Is => "is",
            Operator::IsNot => "isNot",
            Operator::Contains => "contains",
            Operator::DoesNotContain => "doesNotContain",
        }
    }

    /// Human-readable form for UI listings.
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Is => "is",
            Operator::IsNot => "is not",
            Operator::Contains => "contains",
            Operator::DoesNotContain => "does not contain",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operator key {0:?}")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "is" => Ok(Operator::Is),
            "isNot" => Ok(Operator::IsNot),
            "contains" => Ok(Operator::Contains),
            "doesNotContain" => Ok(Operator::DoesNotContain),
            _ => Err(UnknownOperator(s.to_string())),
        }
    }
}

/// How a condition joins the result accumulated so far.
///
/// Consecutive `and` conditions absorb into one group before any `or`
/// boundary is resolved, so this describes the join against the running
/// group, not just the immediate neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    And,
    Or,
}

/// One filter clause: a field, the operation to test, an optional value,
/// and the logical operator joining it to the conditions before it.
///
/// The first condition of a list carries no logical operator; every later
/// condition must.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    pub field: Field,
    pub operation: Operator,
    /// Runtime-shaped value; each operator validates the shape it needs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_operator: Option<LogicalOperator>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn condition_list_deserializes_from_wire_json() {
        let payload = r#"[
            {"field":{"id":"fld1","name":"Status","type":"singleLineText"},"operation":"is","value":"Active"},
            {"field":{"name":"Class","type":"multipleRecordLinks"},"operation":"contains","value":"recXYZ","logicalOperator":"and"}
        ]"#;
        let conditions: Vec<FilterCondition> = serde_json::from_str(payload).unwrap();
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].operation, Operator::Is);
        assert_eq!(conditions[0].field.id, "fld1");
        assert_eq!(conditions[0].logical_operator, None);
        assert_eq!(conditions[1].field.id, "");
        assert_eq!(conditions[1].value, Some(json!("recXYZ")));
        assert_eq!(conditions[1].logical_operator, Some(LogicalOperator::And));
    }

    #[test]
    fn unknown_operation_key_is_rejected() {
        let payload =
            r#"{"field":{"name":"Status","type":"singleLineText"},"operation":"startsWith"}"#;
        assert!(serde_json::from_str::<FilterCondition>(payload).is_err());
    }

    #[test]
    fn operator_keys_round_trip_through_from_str() {
        for &operator in Operator::ALL {
            assert_eq!(operator.key().parse::<Operator>().unwrap(), operator);
            assert!(!operator.label().is_empty());
        }
        assert_eq!(
            "equals".parse::<Operator>(),
            Err(UnknownOperator("equals".to_string()))
        );
    }

    #[test]
    fn logical_operator_uses_lowercase_tags() {
        assert_eq!(
            serde_json::to_value(LogicalOperator::And).unwrap(),
            json!("and")
        );
        assert_eq!(
            serde_json::from_value::<LogicalOperator>(json!("or")).unwrap(),
            LogicalOperator::Or
        );
    }

    #[test]
    fn absent_optional_keys_are_not_serialized() {
        let condition = FilterCondition {
            field: crate::field::Field::new("Status", crate::field::FieldType::SingleLineText),
            operation: Operator::Is,
            value: None,
            logical_operator: None,
        };
        let value = serde_json::to_value(&condition).unwrap();
        assert!(value.get("value").is_none());
        assert!(value.get("logicalOperator").is_none());
    }
}
