//! Strict evaluator for compiled match expressions.
//!
//! Operator overloads are strict: comparing mismatched runtime types, looking
//! up an undefined attribute, or producing a non-boolean result is an
//! [`EvaluationError`], never a silent `false`. The router decides how to
//! recover.

use serde_json::Value;
use std::cmp::Ordering;

use super::ast::{AttributePath, BinaryOp, Expr, Literal};
use crate::api::event::Event;
use crate::error::EvaluationError;

const EVENT_ROOT: &str = "event";

pub(crate) fn evaluate(expr: &Expr, event: &Event) -> Result<bool, EvaluationError> {
    expect_bool(evaluate_value(expr, event)?)
}

fn evaluate_value(expr: &Expr, event: &Event) -> Result<Value, EvaluationError> {
    match expr {
        Expr::Literal(literal) => Ok(literal_value(literal)),
        Expr::Attribute(path) => resolve_attribute(path, event),
        Expr::Not(inner) => {
            let operand = expect_bool(evaluate_value(inner, event)?)?;
            Ok(Value::Bool(!operand))
        }
        Expr::Binary { op, lhs, rhs } => evaluate_binary(*op, lhs, rhs, event),
    }
}

fn evaluate_binary(
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
    event: &Event,
) -> Result<Value, EvaluationError> {
    match op {
        BinaryOp::Or => {
            if expect_bool(evaluate_value(lhs, event)?)? {
                Ok(Value::Bool(true))
            } else {
                evaluate_value(rhs, event).and_then(|value| expect_bool(value).map(Value::Bool))
            }
        }
        BinaryOp::And => {
            if !expect_bool(evaluate_value(lhs, event)?)? {
                Ok(Value::Bool(false))
            } else {
                evaluate_value(rhs, event).and_then(|value| expect_bool(value).map(Value::Bool))
            }
        }
        BinaryOp::Eq | BinaryOp::Ne => {
            let lhs_value = evaluate_value(lhs, event)?;
            let rhs_value = evaluate_value(rhs, event)?;
            let equal = values_equal(op, &lhs_value, &rhs_value)?;
            Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }))
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let lhs_value = evaluate_value(lhs, event)?;
            let rhs_value = evaluate_value(rhs, event)?;
            let ordering = compare_values(op, &lhs_value, &rhs_value)?;
            Ok(Value::Bool(op.accepts(ordering)))
        }
    }
}

fn values_equal(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<bool, EvaluationError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(number_as_f64(a) == number_as_f64(b)),
        (Value::Null, Value::Null)
        | (Value::Bool(_), Value::Bool(_))
        | (Value::String(_), Value::String(_))
        | (Value::Array(_), Value::Array(_))
        | (Value::Object(_), Value::Object(_)) => Ok(lhs == rhs),
        _ => Err(EvaluationError::MismatchedOperands {
            operator: op.symbol(),
            lhs: value_type_name(lhs),
            rhs: value_type_name(rhs),
        }),
    }
}

fn compare_values(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Ordering, EvaluationError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => number_as_f64(a)
            .partial_cmp(&number_as_f64(b))
            .ok_or(EvaluationError::MismatchedOperands {
                operator: op.symbol(),
                lhs: value_type_name(lhs),
                rhs: value_type_name(rhs),
            }),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        _ => Err(EvaluationError::MismatchedOperands {
            operator: op.symbol(),
            lhs: value_type_name(lhs),
            rhs: value_type_name(rhs),
        }),
    }
}

fn resolve_attribute(path: &AttributePath, event: &Event) -> Result<Value, EvaluationError> {
    if path.root != EVENT_ROOT {
        return Err(EvaluationError::UnknownRoot {
            name: path.root.clone(),
        });
    }

    let mut segments = path.segments.iter();
    let Some(first) = segments.next() else {
        return Ok(Value::Object(event.attributes().clone()));
    };

    let mut current = event
        .attribute(first)
        .ok_or_else(|| EvaluationError::UndefinedAttribute {
            path: path.to_string(),
        })?;

    for segment in segments {
        current = match current {
            Value::Object(map) => {
                map.get(segment)
                    .ok_or_else(|| EvaluationError::UndefinedAttribute {
                        path: path.to_string(),
                    })?
            }
            _ => {
                return Err(EvaluationError::UndefinedAttribute {
                    path: path.to_string(),
                })
            }
        };
    }

    Ok(current.clone())
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Bool(flag) => Value::Bool(*flag),
        Literal::Int(number) => Value::from(*number),
        Literal::Float(number) => Value::from(*number),
        Literal::String(text) => Value::String(text.clone()),
    }
}

fn number_as_f64(number: &serde_json::Number) -> f64 {
    number.as_f64().unwrap_or(f64::NAN)
}

fn expect_bool(value: Value) -> Result<bool, EvaluationError> {
    match value {
        Value::Bool(flag) => Ok(flag),
        other => Err(EvaluationError::NotBoolean {
            actual: value_type_name(&other),
        }),
    }
}

pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use crate::api::event::Event;
    use crate::error::EvaluationError;
    use crate::expression::MatchExpression;
    use serde_json::json;

    fn evaluate(source: &str, event: &Event) -> Result<bool, EvaluationError> {
        MatchExpression::parse(source).unwrap().evaluate(event)
    }

    #[test]
    fn topic_equality_matches_event_topic() {
        let event = Event::new("orders");
        assert!(evaluate(r#"event.topic == "orders""#, &event).unwrap());
        assert!(!evaluate(r#"event.topic == "billing""#, &event).unwrap());
    }

    #[test]
    fn nested_data_attributes_are_traversed() {
        let event =
            Event::new("orders").with_attribute("data", json!({"amount": 250, "flag": true}));

        assert!(evaluate("event.data.amount >= 100", &event).unwrap());
        assert!(evaluate("event.data.flag && true", &event).unwrap());
    }

    #[test]
    fn integer_and_float_compare_numerically() {
        let event = Event::new("orders").with_attribute("count", json!(3));
        assert!(evaluate("event.count == 3.0", &event).unwrap());
        assert!(evaluate("event.count < 3.5", &event).unwrap());
    }

    #[test]
    fn strings_order_lexicographically() {
        let event = Event::new("orders").with_attribute("region", json!("eu-west"));
        assert!(evaluate(r#"event.region < "us-east""#, &event).unwrap());
    }

    #[test]
    fn undefined_attribute_is_an_error() {
        let event = Event::new("orders");
        let result = evaluate("event.missing == 1", &event);
        assert!(matches!(
            result,
            Err(EvaluationError::UndefinedAttribute { .. })
        ));
    }

    #[test]
    fn unknown_root_is_an_error() {
        let event = Event::new("orders");
        let result = evaluate(r#"message.topic == "orders""#, &event);
        assert!(matches!(result, Err(EvaluationError::UnknownRoot { .. })));
    }

    #[test]
    fn mismatched_types_do_not_silently_compare() {
        let event = Event::new("orders").with_attribute("count", json!(3));
        let result = evaluate(r#"event.count == "3""#, &event);
        assert!(matches!(
            result,
            Err(EvaluationError::MismatchedOperands { .. })
        ));
    }

    #[test]
    fn non_boolean_result_is_an_error() {
        let event = Event::new("orders");
        let result = evaluate("event.topic", &event);
        assert!(matches!(result, Err(EvaluationError::NotBoolean { .. })));
    }

    #[test]
    fn short_circuit_skips_rhs_errors() {
        let event = Event::new("orders");
        assert!(evaluate(r#"event.topic == "orders" || event.missing == 1"#, &event).unwrap());
        assert!(!evaluate(r#"event.topic == "other" && event.missing == 1"#, &event).unwrap());
    }

    #[test]
    fn null_compares_only_to_null() {
        let event = Event::new("orders").with_attribute("optional", json!(null));
        assert!(evaluate("event.optional == null", &event).unwrap());
    }
}
